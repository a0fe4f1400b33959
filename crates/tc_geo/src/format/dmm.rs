// terracoord\crates\tc_geo\src\format\dmm.rs
//! DMM (度-十进制分) 格式
//!
//! 每轴表示为 `半球字母 + 整数度 + 十进制分`，派生关系
//! `规范值 = 符号 × (度 + 分/60)`。六十进制字段在构造时由规范值
//! 一次性算出，不与规范值双向同步，避免双态不一致。
//!
//! 显示格式：`N12°34.567' E012°34.567'`（纬度 2 位、经度 3 位
//! 补零度数，分固定 3 位小数）。

use super::{check_axis_kinds, split_axes, tokenize, Axis, Cardinal, CoordinateFormat};
use crate::coordinate::Coordinate;
use crate::error::{GeoError, GeoResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// DMM 单轴
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DmmAxis {
    cardinal: Cardinal,
    degrees: u16,
    minutes: f64,
}

impl DmmAxis {
    /// 创建 DMM 单轴
    ///
    /// # Errors
    /// 分不在 [0, 60) 内或总值超出轴范围时返回 `OutOfRange`
    pub fn new(cardinal: Cardinal, degrees: u16, minutes: f64) -> GeoResult<Self> {
        if !(0.0..60.0).contains(&minutes) {
            return Err(GeoError::out_of_range("分", minutes, 0.0, 60.0));
        }
        let max = if cardinal.is_latitude() { 90.0 } else { 180.0 };
        let magnitude = f64::from(degrees) + minutes / 60.0;
        let axis = if cardinal.is_latitude() {
            "纬度"
        } else {
            "经度"
        };
        GeoError::check_coordinate(axis, cardinal.sign() * magnitude, -max, max)?;
        Ok(Self {
            cardinal,
            degrees,
            minutes,
        })
    }

    /// 由规范纬度值拆出 DMM 轴
    fn from_latitude(value: f64) -> Self {
        let (degrees, minutes) = split_value(value);
        Self {
            cardinal: Cardinal::for_latitude(value),
            degrees,
            minutes,
        }
    }

    /// 由规范经度值拆出 DMM 轴
    fn from_longitude(value: f64) -> Self {
        let (degrees, minutes) = split_value(value);
        Self {
            cardinal: Cardinal::for_longitude(value),
            degrees,
            minutes,
        }
    }

    /// 半球方位
    #[inline]
    #[must_use]
    pub const fn cardinal(&self) -> Cardinal {
        self.cardinal
    }

    /// 整数度
    #[inline]
    #[must_use]
    pub const fn degrees(&self) -> u16 {
        self.degrees
    }

    /// 十进制分
    #[inline]
    #[must_use]
    pub const fn minutes(&self) -> f64 {
        self.minutes
    }

    /// 带符号规范值 (度)
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.cardinal.sign() * (f64::from(self.degrees) + self.minutes / 60.0)
    }
}

/// 绝对值拆为 (整数度, 十进制分)
fn split_value(value: f64) -> (u16, f64) {
    let abs = value.abs();
    let degrees = abs.trunc();
    (degrees as u16, (abs - degrees) * 60.0)
}

impl std::fmt::Display for DmmAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = if self.cardinal.is_latitude() { 2 } else { 3 };
        write!(
            f,
            "{}{:0width$}°{:06.3}'",
            self.cardinal, self.degrees, self.minutes
        )
    }
}

/// 度-十进制分坐标
///
/// # 示例
///
/// ```
/// use tc_geo::coordinate::Coordinate;
/// use tc_geo::format::{CoordinateFormat, Dmm};
///
/// let nyc = Coordinate::new(40.7128, -74.0060).unwrap();
/// let dmm = Dmm::from_canonical(nyc).unwrap();
/// assert_eq!(format!("{dmm}"), "N40°42.768' W074°00.360'");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dmm {
    latitude: DmmAxis,
    longitude: DmmAxis,
}

impl Dmm {
    /// 从两个已校验的轴创建
    ///
    /// # Errors
    /// 轴方位种类不匹配时返回 `Parse`
    pub fn new(latitude: DmmAxis, longitude: DmmAxis) -> GeoResult<Self> {
        if !latitude.cardinal.is_latitude() || longitude.cardinal.is_latitude() {
            return Err(GeoError::parse(
                format!("{latitude} {longitude}"),
                "轴方位种类不匹配",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// 纬度轴
    #[inline]
    #[must_use]
    pub const fn latitude(&self) -> DmmAxis {
        self.latitude
    }

    /// 经度轴
    #[inline]
    #[must_use]
    pub const fn longitude(&self) -> DmmAxis {
        self.longitude
    }
}

impl CoordinateFormat for Dmm {
    fn from_canonical(coordinate: Coordinate) -> GeoResult<Self> {
        Ok(Self {
            latitude: DmmAxis::from_latitude(coordinate.latitude()),
            longitude: DmmAxis::from_longitude(coordinate.longitude()),
        })
    }

    fn to_canonical(&self) -> GeoResult<Coordinate> {
        Coordinate::new(self.latitude.value(), self.longitude.value())
    }
}

impl FromStr for Dmm {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s)?;
        let (lat, lon) = split_axes(s, &tokens, 2)?;
        check_axis_kinds(s, &lat, &lon)?;

        let latitude = axis_from_numbers(s, &lat, Cardinal::North)?;
        let longitude = axis_from_numbers(s, &lon, Cardinal::East)?;
        Self::new(latitude, longitude)
    }
}

/// 由"度 分"数值对构造单轴，方位缺省为正半球
fn axis_from_numbers(text: &str, axis: &Axis, default: Cardinal) -> GeoResult<DmmAxis> {
    let degrees = integer_degrees(text, axis.numbers[0])?;
    DmmAxis::new(axis.cardinal.unwrap_or(default), degrees, axis.numbers[1])
}

/// 度数必须是非负整数
pub(super) fn integer_degrees(text: &str, value: f64) -> GeoResult<u16> {
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u16::MAX) {
        return Err(GeoError::parse(
            text,
            format!("度数必须是非负整数，得到 {value}"),
        ));
    }
    Ok(value as u16)
}

impl std::fmt::Display for Dmm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.latitude, self.longitude)
    }
}

// ============================================================================
// 测试
// ============================================================================
