// terracoord\crates\tc_geo\src\format\dd.rs
//! DD (十进制度) 格式
//!
//! 度数直接等于规范坐标字段，往返转换精确无损。

use super::{check_axis_kinds, split_axes, tokenize, CoordinateFormat};
use crate::coordinate::Coordinate;
use crate::error::{GeoError, GeoResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 十进制度坐标
///
/// # 示例
///
/// ```
/// use tc_geo::format::Dd;
///
/// let dd: Dd = "40.7128, -74.0060".parse().unwrap();
/// assert_eq!(dd.coordinate().latitude(), 40.7128);
///
/// let with_cardinals: Dd = "N40.7128 W74.0060".parse().unwrap();
/// assert_eq!(with_cardinals.coordinate().longitude(), -74.0060);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dd {
    coordinate: Coordinate,
}

impl Dd {
    /// 从规范坐标创建
    #[must_use]
    pub const fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }

    /// 获取规范坐标
    #[inline]
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

impl CoordinateFormat for Dd {
    fn from_canonical(coordinate: Coordinate) -> GeoResult<Self> {
        Ok(Self::new(coordinate))
    }

    fn to_canonical(&self) -> GeoResult<Coordinate> {
        Ok(self.coordinate)
    }
}

impl FromStr for Dd {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s)?;
        let (lat, lon) = split_axes(s, &tokens, 1)?;
        check_axis_kinds(s, &lat, &lon)?;

        // 方位字母与负号不能同时使用
        let axis_value = |axis: &super::Axis| -> GeoResult<f64> {
            let raw = axis.numbers[0];
            match axis.cardinal {
                Some(c) => {
                    if raw < 0.0 {
                        Err(GeoError::parse(s, "方位字母与负号不能同时使用"))
                    } else {
                        Ok(c.sign() * raw)
                    }
                }
                None => Ok(raw),
            }
        };

        let coordinate = Coordinate::new(axis_value(&lat)?, axis_value(&lon)?)?;
        Ok(Self::new(coordinate))
    }
}

impl std::fmt::Display for Dd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.coordinate)
    }
}

// ============================================================================
// 测试
// ============================================================================
