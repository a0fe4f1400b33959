// terracoord\crates\tc_geo\src\ellipsoid.rs
//! 地球模型定义
//!
//! 提供球体/椭球体两种地球模型的常量参数。所有大地测量与投影算法
//! 都以这里的参数为唯一配置输入。
//!
//! # 示例
//!
//! ```
//! use tc_geo::ellipsoid::{EarthModel, Ellipsoid};
//!
//! let wgs84 = Ellipsoid::WGS84;
//! assert!((wgs84.b() - 6_356_752.314_245).abs() < 0.001);
//!
//! let model: EarthModel = "sphere".parse().unwrap();
//! assert_eq!(model, EarthModel::Sphere);
//! ```

use crate::error::GeoError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 球体模型地球半径 (m)
///
/// Haversine 距离与大圆目标点计算使用的半径。
pub const SPHERE_RADIUS: f64 = 6_371_000.0;

// ============================================================================
// 椭球体
// ============================================================================

/// 地球椭球体
///
/// 定义椭球体的几何参数，并提供派生参数的计算方法。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// 长半轴 (m)
    pub a: f64,
    /// 扁率 (flattening)
    pub f: f64,
}

impl Ellipsoid {
    /// WGS84 椭球体 (GPS 标准)
    ///
    /// - 长半轴: 6378137.0 m
    /// - 扁率: 1/298.257223563
    pub const WGS84: Self = Self {
        a: 6_378_137.0,
        f: 1.0 / 298.257_223_563,
    };

    /// 从长半轴和扁率创建椭球体
    #[must_use]
    pub const fn new(a: f64, f: f64) -> Self {
        Self { a, f }
    }

    /// 短半轴 b = a(1-f)
    #[inline]
    #[must_use]
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// 第一偏心率的平方 e² = 2f - f²
    #[inline]
    #[must_use]
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// 第一偏心率 e = √e²
    #[inline]
    #[must_use]
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// 第二偏心率的平方 e'² = e²/(1-e²)
    #[inline]
    #[must_use]
    pub fn ep2(&self) -> f64 {
        let e2 = self.e2();
        e2 / (1.0 - e2)
    }

    /// 卯酉圈曲率半径（在纬度 φ 处）
    ///
    /// N = a / √(1-e²sin²φ)
    #[inline]
    #[must_use]
    pub fn prime_vertical_radius(&self, lat_rad: f64) -> f64 {
        let sin_lat = lat_rad.sin();
        let e2 = self.e2();
        self.a / (1.0 - e2 * sin_lat * sin_lat).sqrt()
    }

    /// 子午圈曲率半径（在纬度 φ 处）
    ///
    /// M = a(1-e²) / (1-e²sin²φ)^(3/2)
    #[inline]
    #[must_use]
    pub fn meridional_radius(&self, lat_rad: f64) -> f64 {
        let sin_lat = lat_rad.sin();
        let e2 = self.e2();
        self.a * (1.0 - e2) / (1.0 - e2 * sin_lat * sin_lat).powf(1.5)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

impl std::fmt::Display for Ellipsoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ellipsoid(a={}, f=1/{:.6})", self.a, 1.0 / self.f)
    }
}

// ============================================================================
// 地球模型选择器
// ============================================================================

/// 地球模型
///
/// 大地测量算法按模型选择求解策略：球体用 Haversine/大圆公式，
/// WGS84 用 Vincenty 公式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarthModel {
    /// 正球体（半径 [`SPHERE_RADIUS`]）
    Sphere,
    /// WGS84 椭球体
    #[default]
    Wgs84,
}

impl EarthModel {
    /// 获取模型对应的椭球体参数（球体模型无椭球）
    #[must_use]
    pub fn ellipsoid(&self) -> Option<Ellipsoid> {
        match self {
            Self::Sphere => None,
            Self::Wgs84 => Some(Ellipsoid::WGS84),
        }
    }

    /// 模型名称
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Wgs84 => "wgs84",
        }
    }
}

impl FromStr for EarthModel {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sphere" => Ok(Self::Sphere),
            "wgs84" | "wgs-84" => Ok(Self::Wgs84),
            _ => Err(GeoError::unsupported_earth_model(s)),
        }
    }
}

impl std::fmt::Display for EarthModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_parameters() {
        let e = Ellipsoid::WGS84;

        // 验证长半轴
        assert!((e.a - 6_378_137.0).abs() < 1e-6);

        // 验证短半轴 (标准值约 6356752.314245)
        assert!((e.b() - 6_356_752.314_245).abs() < 0.001);

        // 验证第一偏心率平方 (约 0.00669437999014)
        assert!((e.e2() - 0.006_694_379_990_14).abs() < 1e-12);

        // 验证第二偏心率平方 (约 0.00673949674228)
        assert!((e.ep2() - 0.006_739_496_742_28).abs() < 1e-12);
    }

    #[test]
    fn test_curvature_radius() {
        let e = Ellipsoid::WGS84;

        // 赤道处 N(0) = a，且 N > M
        let m_equator = e.meridional_radius(0.0);
        let n_equator = e.prime_vertical_radius(0.0);
        assert!(n_equator > m_equator);
        assert!((n_equator - e.a).abs() < 1e-6);
    }

    #[test]
    fn test_earth_model_from_str() {
        assert_eq!("sphere".parse::<EarthModel>().unwrap(), EarthModel::Sphere);
        assert_eq!("WGS84".parse::<EarthModel>().unwrap(), EarthModel::Wgs84);
        assert_eq!("wgs-84".parse::<EarthModel>().unwrap(), EarthModel::Wgs84);
    }

    #[test]
    fn test_earth_model_unsupported() {
        let err = "mars".parse::<EarthModel>().unwrap_err();
        match err {
            GeoError::UnsupportedEarthModel { name } => assert_eq!(name, "mars"),
            _ => panic!("错误的错误类型"),
        }
    }

    #[test]
    fn test_earth_model_default() {
        assert_eq!(EarthModel::default(), EarthModel::Wgs84);
        assert_eq!(EarthModel::Sphere.name(), "sphere");
        assert!(EarthModel::Sphere.ellipsoid().is_none());
        assert_eq!(EarthModel::Wgs84.ellipsoid(), Some(Ellipsoid::WGS84));
    }
}
