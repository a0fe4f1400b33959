// terracoord\crates\tc_geo\src\geodesic/mod.rs
//! 大地测量求解器
//!
//! 按地球模型分派到两套相互独立的算法：
//!
//! - [`EarthModel::Sphere`]: Haversine 距离、墨卡托投影方位角、
//!   大圆目标点/中点
//! - [`EarthModel::Wgs84`]: Vincenty 反解（距离+初始方位角）；
//!   正解未实现，WGS84 下的目标点平移返回 `NotImplemented`
//!
//! 两套算法之间没有共享状态，全部是纯函数。
//!
//! # 示例
//!
//! ```
//! use tc_geo::coordinate::Coordinate;
//! use tc_geo::ellipsoid::EarthModel;
//! use tc_geo::geodesic;
//!
//! let nyc = Coordinate::new(40.7128, -74.0060).unwrap();
//! let la = Coordinate::new(34.0522, -118.2437).unwrap();
//!
//! let d = geodesic::distance(&nyc, &la, EarthModel::Wgs84).unwrap();
//! assert!((d - 3_944_422.2).abs() < 1.0);
//! ```

pub mod sphere;
pub mod vincenty;

use crate::coordinate::Coordinate;
use crate::ellipsoid::EarthModel;
use crate::error::{GeoError, GeoResult};

/// 计算两点间距离 (米)
///
/// # Errors
/// WGS84 模型下 Vincenty 迭代不收敛时返回 `ConvergenceFailure`
pub fn distance(from: &Coordinate, to: &Coordinate, model: EarthModel) -> GeoResult<f64> {
    match model {
        EarthModel::Sphere => Ok(sphere::haversine_distance(from, to)),
        EarthModel::Wgs84 => Ok(vincenty::inverse(from, to)?.distance),
    }
}

/// 计算初始方位角 (度, [0, 360))
///
/// # Errors
/// WGS84 模型下 Vincenty 迭代不收敛时返回 `ConvergenceFailure`
pub fn initial_bearing(from: &Coordinate, to: &Coordinate, model: EarthModel) -> GeoResult<f64> {
    match model {
        EarthModel::Sphere => Ok(sphere::bearing(from, to)),
        EarthModel::Wgs84 => Ok(vincenty::inverse(from, to)?.initial_bearing),
    }
}

/// 按方位角和距离平移到目标点
///
/// # Arguments
/// - `bearing`: 方位角 (度，从正北顺时针，先归一化到 [0, 360))
/// - `distance`: 距离 (米)
///
/// # Errors
/// - 球体模型：结果坐标超出合法范围时返回 `OutOfRange`
/// - WGS84 模型：返回 `NotImplemented`（Vincenty 正解未实现）
pub fn destination(
    from: &Coordinate,
    bearing: f64,
    distance: f64,
    model: EarthModel,
) -> GeoResult<Coordinate> {
    match model {
        EarthModel::Sphere => sphere::destination(from, bearing, distance),
        EarthModel::Wgs84 => Err(GeoError::not_implemented("Vincenty正解")),
    }
}

/// 方位角归一化到 [0, 360)
#[inline]
#[must_use]
pub(crate) fn normalize_bearing(bearing: f64) -> f64 {
    let b = bearing % 360.0;
    if b < 0.0 {
        b + 360.0
    } else {
        b
    }
}

// ============================================================================
// 测试
// ============================================================================
