// terracoord\crates\tc_geo\src\geodesic\sphere.rs
//! 球体模型大地测量
//!
//! 将地球视为半径 [`SPHERE_RADIUS`] 的正球体：
//!
//! - 距离：Haversine 公式
//! - 方位角：墨卡托投影方位角公式
//! - 目标点：标准球面正解公式
//! - 中点：大圆中点
//!
//! 精度约 0.5%，适用于快速估算；高精度场景使用 WGS84 模型。

use crate::coordinate::Coordinate;
use crate::ellipsoid::SPHERE_RADIUS;
use crate::error::GeoResult;
use crate::geodesic::normalize_bearing;
use std::f64::consts::PI;

/// Haversine 公式计算大圆距离 (米)
///
/// `a = sin²(Δφ/2) + cosφ₁·cosφ₂·sin²(Δλ/2)`，
/// `d = R·2·atan2(√a, √(1-a))`
#[must_use]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let dlat = lat2 - lat1;
    let dlon = (to.longitude() - from.longitude()).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    SPHERE_RADIUS * c
}

/// 墨卡托投影方位角 (度, [0, 360))
///
/// `θ = atan2(Δλ, ln(tan(φ₂/2+π/4)/tan(φ₁/2+π/4)))`，
/// Δλ 先回卷到 (-π, π]。
#[must_use]
pub fn bearing(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let mut dlon = (to.longitude() - from.longitude()).to_radians();

    // 经度差回卷，取较短一侧
    if dlon.abs() > PI {
        dlon -= (2.0 * PI).copysign(dlon);
    }

    let dpsi = ((lat2 / 2.0 + PI / 4.0).tan() / (lat1 / 2.0 + PI / 4.0).tan()).ln();
    normalize_bearing(dlon.atan2(dpsi).to_degrees())
}

/// 大圆正解：按方位角和距离计算目标点
///
/// # Arguments
/// - `bearing`: 方位角 (度，从正北顺时针)
/// - `distance`: 距离 (米)
///
/// # Errors
/// 结果坐标超出合法范围时返回 `OutOfRange`
pub fn destination(from: &Coordinate, bearing: f64, distance: f64) -> GeoResult<Coordinate> {
    let lat1 = from.latitude().to_radians();
    let lon1 = from.longitude().to_radians();
    let theta = normalize_bearing(bearing).to_radians();
    let delta = distance / SPHERE_RADIUS;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    Coordinate::new(lat2.to_degrees(), normalize_longitude(lon2.to_degrees()))
}

/// 大圆中点（球面几何）
///
/// # Errors
/// 结果坐标超出合法范围时返回 `OutOfRange`
pub fn midpoint(from: &Coordinate, to: &Coordinate) -> GeoResult<Coordinate> {
    let lat1 = from.latitude().to_radians();
    let lon1 = from.longitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let dlon = (to.longitude() - from.longitude()).to_radians();

    let bx = lat2.cos() * dlon.cos();
    let by = lat2.cos() * dlon.sin();

    let lat3 = (lat1.sin() + lat2.sin()).atan2(((lat1.cos() + bx).powi(2) + by.powi(2)).sqrt());
    let lon3 = lon1 + by.atan2(lat1.cos() + bx);

    Coordinate::new(lat3.to_degrees(), normalize_longitude(lon3.to_degrees()))
}

/// 经度归一化到 [-180, 180]
#[inline]
fn normalize_longitude(lon: f64) -> f64 {
    let mut x = lon % 360.0;
    if x < -180.0 {
        x += 360.0;
    }
    if x > 180.0 {
        x -= 360.0;
    }
    x
}

// ============================================================================
// 测试
// ============================================================================
