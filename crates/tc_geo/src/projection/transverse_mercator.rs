// terracoord\crates\tc_geo\src\projection\transverse_mercator.rs
//! 横轴墨卡托投影（经典级数展开）
//!
//! 正向使用子午线弧长 M 与辅助量 T、C、A 的标准级数，逆向使用
//! 垂足纬度（footpoint latitude）级数——两者都是闭式级数，无需
//! 迭代。对标标准 UTM 坐标表精度优于 1 米。
//!
//! # 示例
//!
//! ```
//! use tc_geo::projection::transverse_mercator::{self, TransverseMercatorParams};
//!
//! let params = TransverseMercatorParams::utm(50, true);
//! let (x, y) = transverse_mercator::forward(&params, 116.0, 40.0).unwrap();
//! let (lon, lat) = transverse_mercator::inverse(&params, x, y).unwrap();
//! assert!((lon - 116.0).abs() < 1e-8 && (lat - 40.0).abs() < 1e-8);
//! ```

use crate::ellipsoid::Ellipsoid;
use crate::error::{GeoError, GeoResult};

/// UTM 比例因子
pub const UTM_K0: f64 = 0.9996;

/// 横轴墨卡托投影参数
#[derive(Debug, Clone)]
pub struct TransverseMercatorParams {
    /// 椭球体
    pub ellipsoid: Ellipsoid,
    /// 中央子午线 (度)
    pub central_meridian: f64,
    /// 比例因子
    pub scale_factor: f64,
    /// 假东 (米)
    pub false_easting: f64,
    /// 假北 (米)
    pub false_northing: f64,
}

impl TransverseMercatorParams {
    /// 创建 UTM 参数
    #[must_use]
    pub fn utm(zone: u8, north: bool) -> Self {
        Self {
            ellipsoid: Ellipsoid::WGS84,
            central_meridian: f64::from(zone) * 6.0 - 183.0,
            scale_factor: UTM_K0,
            false_easting: 500_000.0,
            false_northing: if north { 0.0 } else { 10_000_000.0 },
        }
    }

    /// 自定义横轴墨卡托参数
    #[must_use]
    pub fn custom(
        ellipsoid: Ellipsoid,
        central_meridian: f64,
        scale_factor: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        Self {
            ellipsoid,
            central_meridian,
            scale_factor,
            false_easting,
            false_northing,
        }
    }
}

/// 子午线弧长 M (米)，赤道到纬度 φ
fn meridian_arc(ellipsoid: &Ellipsoid, lat_rad: f64) -> f64 {
    let a = ellipsoid.a;
    let e2 = ellipsoid.e2();
    let e4 = e2 * e2;
    let e6 = e4 * e2;

    a * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat_rad
        - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat_rad).sin()
        + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat_rad).sin()
        - (35.0 * e6 / 3072.0) * (6.0 * lat_rad).sin())
}

/// 正向投影：地理坐标 -> 平面坐标
///
/// # Arguments
/// - `lon`: 经度 (度)
/// - `lat`: 纬度 (度)
///
/// # Returns
/// (easting, northing) 含假东/假北偏移 (米)
///
/// # Errors
/// 纬度超出 [-90, 90] 时返回 `OutOfRange`
pub fn forward(params: &TransverseMercatorParams, lon: f64, lat: f64) -> GeoResult<(f64, f64)> {
    GeoError::check_coordinate("纬度", lat, -90.0, 90.0)?;

    let ellipsoid = &params.ellipsoid;
    let e2 = ellipsoid.e2();
    let ep2 = ellipsoid.ep2();
    let k0 = params.scale_factor;

    let lat_rad = lat.to_radians();
    let dlon_rad = (lon - params.central_meridian).to_radians();

    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let tan_lat = lat_rad.tan();

    // 卯酉圈曲率半径与辅助量
    let n = ellipsoid.a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let t = tan_lat * tan_lat;
    let c = ep2 * cos_lat * cos_lat;
    let a = cos_lat * dlon_rad;
    let m = meridian_arc(ellipsoid, lat_rad);

    let easting = k0
        * n
        * (a + (1.0 - t + c) * a.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0)
        + params.false_easting;

    let northing = k0
        * (m + n
            * tan_lat
            * (a * a / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6) / 720.0))
        + params.false_northing;

    Ok((easting, northing))
}

/// 逆向投影：平面坐标 -> 地理坐标
///
/// # Arguments
/// - `x`: 东向坐标 (米，含假东)
/// - `y`: 北向坐标 (米，含假北)
///
/// # Returns
/// (longitude, latitude) 经度和纬度 (度)
///
/// # Errors
/// 结果纬度超出合法范围时返回 `OutOfRange`
pub fn inverse(params: &TransverseMercatorParams, x: f64, y: f64) -> GeoResult<(f64, f64)> {
    let ellipsoid = &params.ellipsoid;
    let a = ellipsoid.a;
    let e2 = ellipsoid.e2();
    let ep2 = ellipsoid.ep2();
    let k0 = params.scale_factor;

    let x = x - params.false_easting;
    let y = y - params.false_northing;

    // 垂足纬度级数
    let m = y / k0;
    let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0));

    let sqrt_1me2 = (1.0 - e2).sqrt();
    let e1 = (1.0 - sqrt_1me2) / (1.0 + sqrt_1me2);
    let j1 = 3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0;
    let j2 = 21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0;
    let j3 = 151.0 * e1.powi(3) / 96.0;
    let j4 = 1097.0 * e1.powi(4) / 512.0;

    let fp = mu
        + j1 * (2.0 * mu).sin()
        + j2 * (4.0 * mu).sin()
        + j3 * (6.0 * mu).sin()
        + j4 * (8.0 * mu).sin();

    let sin_fp = fp.sin();
    let cos_fp = fp.cos();
    let tan_fp = fp.tan();

    let c1 = ep2 * cos_fp * cos_fp;
    let t1 = tan_fp * tan_fp;
    let r1 = a * (1.0 - e2) / (1.0 - e2 * sin_fp * sin_fp).powf(1.5);
    let n1 = a / (1.0 - e2 * sin_fp * sin_fp).sqrt();
    let d = x / (n1 * k0);

    let lat = fp
        - (n1 * tan_fp / r1)
            * (d * d / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                    * d.powi(6)
                    / 720.0);

    let dlon = (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
        + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d.powi(5)
            / 120.0)
        / cos_fp;

    let lat_deg = lat.to_degrees();
    let lon_deg = params.central_meridian + dlon.to_degrees();

    GeoError::check_coordinate("纬度", lat_deg, -90.0, 90.0)?;
    GeoError::check_coordinate("经度", lon_deg, -180.0, 180.0)?;

    Ok((lon_deg, lat_deg))
}

// ============================================================================
// 测试
// ============================================================================
