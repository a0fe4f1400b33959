// terracoord\crates\tc_geo\src\geodesic\vincenty.rs
//! Vincenty 公式（WGS84 椭球面反解）
//!
//! 迭代求解辅助经度差 λ，收敛后由级数系数 A、B 计算测地线距离，
//! 并从最后一轮迭代量计算初始方位角。精度可达毫米级。
//!
//! 近对跖点对可能不收敛，迭代次数有硬上限，超限返回
//! `ConvergenceFailure` 而不是无界循环。正解（按方位角/距离推算
//! 目标点）未实现。

use crate::coordinate::Coordinate;
use crate::ellipsoid::Ellipsoid;
use crate::error::{GeoError, GeoResult};
use crate::geodesic::normalize_bearing;

/// λ 迭代次数上限
///
/// 近对跖点探针 (0,0)→(0.5,179.5) 在 181 轮收敛，(0,0)→(0.5,179.7)
/// 不收敛，200 可以干净地区分两类输入。
pub const MAX_ITERATIONS: usize = 200;

/// λ 收敛容差 (弧度)
pub const CONVERGENCE_TOLERANCE: f64 = 1e-12;

/// Vincenty 反解结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VincentyInverse {
    /// 测地线距离 (米)
    pub distance: f64,
    /// 初始方位角 (度, [0, 360))
    pub initial_bearing: f64,
}

/// Vincenty 反解：两点间测地线距离与初始方位角
///
/// # Errors
/// λ 迭代超过 [`MAX_ITERATIONS`] 仍未收敛时返回 `ConvergenceFailure`
pub fn inverse(from: &Coordinate, to: &Coordinate) -> GeoResult<VincentyInverse> {
    inverse_on(from, to, &Ellipsoid::WGS84)
}

/// Vincenty 反解（可自定义椭球体）
///
/// # Errors
/// λ 迭代超过 [`MAX_ITERATIONS`] 仍未收敛时返回 `ConvergenceFailure`
pub fn inverse_on(
    from: &Coordinate,
    to: &Coordinate,
    ellipsoid: &Ellipsoid,
) -> GeoResult<VincentyInverse> {
    let a = ellipsoid.a;
    let f = ellipsoid.f;
    let b = ellipsoid.b();

    let phi1 = from.latitude().to_radians();
    let phi2 = to.latitude().to_radians();
    let l = (to.longitude() - from.longitude()).to_radians();

    // Reduced latitudes
    let u1 = ((1.0 - f) * phi1.tan()).atan();
    let u2 = ((1.0 - f) * phi2.tan()).atan();

    let sin_u1 = u1.sin();
    let cos_u1 = u1.cos();
    let sin_u2 = u2.sin();
    let cos_u2 = u2.cos();

    // 迭代求解 λ
    let mut lambda = l;
    let mut converged = false;
    let mut cos_sq_alpha = 0.0;
    let mut sin_sigma = 0.0;
    let mut cos_sigma = 0.0;
    let mut cos_2sigma_m = 0.0;
    let mut sigma = 0.0;

    for _ in 0..MAX_ITERATIONS {
        let sin_lambda = lambda.sin();
        let cos_lambda = lambda.cos();

        sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();

        if sin_sigma < 1e-12 {
            // 两点重合
            return Ok(VincentyInverse {
                distance: 0.0,
                initial_bearing: 0.0,
            });
        }

        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);

        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha.powi(2);

        // 赤道线上 cos²α = 0
        cos_2sigma_m = if cos_sq_alpha.abs() < 1e-12 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };

        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));

        let lambda_prev = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - lambda_prev).abs() <= CONVERGENCE_TOLERANCE {
            converged = true;
            break;
        }
    }

    if !converged {
        return Err(GeoError::convergence_failure(
            "Vincenty反解",
            MAX_ITERATIONS,
            format!(
                "({:.6}, {:.6}) -> ({:.6}, {:.6})",
                from.latitude(),
                from.longitude(),
                to.latitude(),
                to.longitude()
            ),
        ));
    }

    // 由级数系数计算距离
    let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
    let aa = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let bb = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

    let delta_sigma = bb
        * sin_sigma
        * (cos_2sigma_m
            + bb / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                    - bb / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma.powi(2))
                        * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

    let distance = b * aa * (sigma - delta_sigma);

    // 初始方位角取自最后一轮迭代量
    let initial_bearing = normalize_bearing(
        (cos_u2 * lambda.sin())
            .atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * lambda.cos())
            .to_degrees(),
    );

    Ok(VincentyInverse {
        distance,
        initial_bearing,
    })
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("合法坐标")
    }

    #[test]
    fn test_inverse_known_value() {
        // 纽约-洛杉矶，PROJ/GeographicLib 参考值 3944422.23 m
        let result = inverse(&coord(40.7128, -74.0060), &coord(34.0522, -118.2437))
            .expect("Vincenty反解");
        assert!(
            (result.distance - 3_944_422.23).abs() < 1.0,
            "d = {}",
            result.distance
        );
        assert!(
            (result.initial_bearing - 273.7325).abs() < 0.001,
            "brg = {}",
            result.initial_bearing
        );
    }

    #[test]
    fn test_inverse_same_point() {
        let p = coord(39.9, 116.4);
        let result = inverse(&p, &p).expect("重合点");
        assert!(result.distance < 1e-6);
        assert_eq!(result.initial_bearing, 0.0);
    }

    #[test]
    fn test_inverse_equatorial_pair() {
        // 赤道线上两点 (cos²α = 0 分支)，弧长接近 a·Δλ
        let result = inverse(&coord(0.0, 0.0), &coord(0.0, 1.0)).expect("赤道对");
        let expected = Ellipsoid::WGS84.a * 1.0_f64.to_radians();
        assert!(
            (result.distance - expected).abs() < 200.0,
            "d = {}",
            result.distance
        );
        assert!((result.initial_bearing - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_inverse_meridional_pair() {
        // 同一子午线上 1 度纬差，约 110.57 km (赤道附近)
        let result = inverse(&coord(0.0, 0.0), &coord(1.0, 0.0)).expect("子午对");
        assert!(
            (result.distance - 110_574.4).abs() < 10.0,
            "d = {}",
            result.distance
        );
        assert!(result.initial_bearing.abs() < 1e-6);
    }

    #[test]
    fn test_inverse_near_antipodal_converges() {
        // 181 轮收敛，在 200 上限内
        let result = inverse(&coord(0.0, 0.0), &coord(0.5, 179.5)).expect("近对跖点");
        assert!(
            (result.distance - 19_936_288.6).abs() < 10.0,
            "d = {}",
            result.distance
        );
    }

    #[test]
    fn test_inverse_antipodal_fails_bounded() {
        // 严格对跖点不收敛，必须在迭代上限内返回错误而不是挂起
        let err = inverse(&coord(0.0, 0.0), &coord(0.5, 179.7)).unwrap_err();
        match err {
            GeoError::ConvergenceFailure {
                operation,
                iterations,
                ..
            } => {
                assert_eq!(operation, "Vincenty反解");
                assert_eq!(iterations, MAX_ITERATIONS);
            }
            _ => panic!("错误的错误类型"),
        }

        assert!(inverse(&coord(0.0, 0.0), &coord(0.0, 180.0)).is_err());
    }

    #[test]
    fn test_inverse_symmetry() {
        let a = coord(39.9, 116.4);
        let b = coord(31.2, 121.5);
        let ab = inverse(&a, &b).expect("A->B").distance;
        let ba = inverse(&b, &a).expect("B->A").distance;
        assert!((ab - ba).abs() < 1e-6, "{ab} vs {ba}");
    }
}
