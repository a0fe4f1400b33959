// terracoord\crates\tc_geo\src\coordinate.rs
//! 规范坐标类型
//!
//! [`Coordinate`] 是所有格式互转的枢纽：任意格式先转出规范经纬度，
//! 再由目标格式转入。大地测量算法只消费规范坐标。
//!
//! # 不变量
//!
//! 纬度始终在 [-90, 90]、经度始终在 [-180, 180] 内；任何会破坏
//! 该不变量的构造都会失败，因此字段私有、构造后不可变。
//!
//! # 示例
//!
//! ```
//! use tc_geo::coordinate::Coordinate;
//!
//! let nyc = Coordinate::new(40.7128, -74.0060).unwrap();
//! assert_eq!(format!("{nyc}"), "40.712800, -74.006000");
//!
//! assert!(Coordinate::new(91.0, 0.0).is_err());
//! ```

use crate::ellipsoid::EarthModel;
use crate::error::{GeoError, GeoResult};
use crate::geodesic;
use serde::{Deserialize, Serialize};

/// 纬度合法范围
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// 经度合法范围
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// 规范坐标（十进制度经纬度对）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

/// 反序列化中转结构，重新校验范围不变量
#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// 创建规范坐标
    ///
    /// # Errors
    /// 纬度超出 [-90, 90] 或经度超出 [-180, 180] 时返回 `OutOfRange`
    pub fn new(latitude: f64, longitude: f64) -> GeoResult<Self> {
        GeoError::check_coordinate("纬度", latitude, LATITUDE_RANGE.0, LATITUDE_RANGE.1)?;
        GeoError::check_coordinate("经度", longitude, LONGITUDE_RANGE.0, LONGITUDE_RANGE.1)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// 获取纬度 (度)
    #[inline]
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// 获取经度 (度)
    #[inline]
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    // ========================================================================
    // 大地测量便捷方法
    // ========================================================================

    /// 计算到另一点的距离 (米)，默认 WGS84 模型
    ///
    /// # Errors
    /// Vincenty 迭代不收敛时返回 `ConvergenceFailure`
    pub fn distance_to(&self, other: &Self) -> GeoResult<f64> {
        geodesic::distance(self, other, EarthModel::Wgs84)
    }

    /// 计算到另一点的初始方位角 (度, [0, 360))，默认 WGS84 模型
    ///
    /// # Errors
    /// Vincenty 迭代不收敛时返回 `ConvergenceFailure`
    pub fn bearing_to(&self, other: &Self) -> GeoResult<f64> {
        geodesic::initial_bearing(self, other, EarthModel::Wgs84)
    }

    /// 按方位角和距离平移到目标点，默认球体模型
    ///
    /// # Arguments
    /// - `bearing`: 方位角 (度，从正北顺时针)
    /// - `distance`: 距离 (米)
    ///
    /// # Errors
    /// 结果坐标超出合法范围时返回 `OutOfRange`
    pub fn destination(&self, bearing: f64, distance: f64) -> GeoResult<Self> {
        geodesic::destination(self, bearing, distance, EarthModel::Sphere)
    }

    /// 计算与另一点的大圆中点（球面几何）
    ///
    /// # Errors
    /// 结果坐标超出合法范围时返回 `OutOfRange`
    pub fn midpoint_with(&self, other: &Self) -> GeoResult<Self> {
        geodesic::sphere::midpoint(self, other)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let c = Coordinate::new(40.7128, -74.0060).expect("合法坐标");
        assert_eq!(c.latitude(), 40.7128);
        assert_eq!(c.longitude(), -74.0060);
    }

    #[test]
    fn test_new_boundary() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_latitude_out_of_range() {
        let err = Coordinate::new(91.0, 0.0).unwrap_err();
        match err {
            GeoError::OutOfRange { axis, value, .. } => {
                assert_eq!(axis, "纬度");
                assert_eq!(value, 91.0);
            }
            _ => panic!("错误的错误类型"),
        }
    }

    #[test]
    fn test_longitude_out_of_range() {
        assert!(Coordinate::new(0.0, 180.001).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_display() {
        let c = Coordinate::new(40.7128, -74.0060).expect("合法坐标");
        assert_eq!(format!("{c}"), "40.712800, -74.006000");
    }

    #[test]
    fn test_deserialize_revalidates() {
        let ok: Result<Coordinate, _> =
            serde_json::from_str(r#"{"latitude": 40.0, "longitude": 116.0}"#);
        assert!(ok.is_ok());

        let bad: Result<Coordinate, _> =
            serde_json::from_str(r#"{"latitude": 95.0, "longitude": 116.0}"#);
        assert!(bad.is_err());
    }
}
