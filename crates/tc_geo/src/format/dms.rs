// terracoord\crates\tc_geo\src\format\dms.rs
//! DMS (度-分-秒) 格式
//!
//! 每轴表示为 `半球字母 + 整数度 + 整数分 + 十进制秒`，派生关系
//! `规范值 = 符号 × (度 + 分/60 + 秒/3600)`。与 DMM 相同，六十进制
//! 字段由规范值单向派生。
//!
//! 显示格式：`N12°34'56" E012°34'56"`（秒四舍五入为整数，仅显示
//! 层面，存储的秒保持 f64）。

use super::dmm::integer_degrees;
use super::{check_axis_kinds, split_axes, tokenize, Axis, Cardinal, CoordinateFormat};
use crate::coordinate::Coordinate;
use crate::error::{GeoError, GeoResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// DMS 单轴
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DmsAxis {
    cardinal: Cardinal,
    degrees: u16,
    minutes: u8,
    seconds: f64,
}

impl DmsAxis {
    /// 创建 DMS 单轴
    ///
    /// # Errors
    /// 分或秒不在 [0, 60) 内、或总值超出轴范围时返回 `OutOfRange`
    pub fn new(cardinal: Cardinal, degrees: u16, minutes: u8, seconds: f64) -> GeoResult<Self> {
        if minutes >= 60 {
            return Err(GeoError::out_of_range("分", f64::from(minutes), 0.0, 60.0));
        }
        if !(0.0..60.0).contains(&seconds) {
            return Err(GeoError::out_of_range("秒", seconds, 0.0, 60.0));
        }
        let max = if cardinal.is_latitude() { 90.0 } else { 180.0 };
        let magnitude = f64::from(degrees) + f64::from(minutes) / 60.0 + seconds / 3600.0;
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
            seconds,
        })
    }

    /// 由规范纬度值拆出 DMS 轴
    fn from_latitude(value: f64) -> Self {
        let (degrees, minutes, seconds) = split_value(value);
        Self {
            cardinal: Cardinal::for_latitude(value),
            degrees,
            minutes,
            seconds,
        }
    }

    /// 由规范经度值拆出 DMS 轴
    fn from_longitude(value: f64) -> Self {
        let (degrees, minutes, seconds) = split_value(value);
        Self {
            cardinal: Cardinal::for_longitude(value),
            degrees,
            minutes,
            seconds,
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

    /// 整数分
    #[inline]
    #[must_use]
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    /// 十进制秒
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> f64 {
        self.seconds
    }

    /// 带符号规范值 (度)
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.cardinal.sign()
            * (f64::from(self.degrees) + f64::from(self.minutes) / 60.0 + self.seconds / 3600.0)
    }
}

/// 绝对值拆为 (整数度, 整数分, 十进制秒)
fn split_value(value: f64) -> (u16, u8, f64) {
    let abs = value.abs();
    let degrees = abs.trunc();
    let rem_minutes = (abs - degrees) * 60.0;
    let minutes = rem_minutes.trunc();
    let seconds = (rem_minutes - minutes) * 60.0;
    (degrees as u16, minutes as u8, seconds)
}

impl std::fmt::Display for DmsAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = if self.cardinal.is_latitude() { 2 } else { 3 };
        write!(
            f,
            "{}{:0width$}°{:02}'{:02.0}\"",
            self.cardinal, self.degrees, self.minutes, self.seconds
        )
    }
}

/// 度-分-秒坐标
///
/// # 示例
///
/// ```
/// use tc_geo::coordinate::Coordinate;
/// use tc_geo::format::{CoordinateFormat, Dms};
///
/// let nyc = Coordinate::new(40.7128, -74.0060).unwrap();
/// let dms = Dms::from_canonical(nyc).unwrap();
/// assert_eq!(format!("{dms}"), "N40°42'46\" W074°00'22\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    latitude: DmsAxis,
    longitude: DmsAxis,
}

impl Dms {
    /// 从两个已校验的轴创建
    ///
    /// # Errors
    /// 轴方位种类不匹配时返回 `Parse`
    pub fn new(latitude: DmsAxis, longitude: DmsAxis) -> GeoResult<Self> {
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
    pub const fn latitude(&self) -> DmsAxis {
        self.latitude
    }

    /// 经度轴
    #[inline]
    #[must_use]
    pub const fn longitude(&self) -> DmsAxis {
        self.longitude
    }
}

impl CoordinateFormat for Dms {
    fn from_canonical(coordinate: Coordinate) -> GeoResult<Self> {
        Ok(Self {
            latitude: DmsAxis::from_latitude(coordinate.latitude()),
            longitude: DmsAxis::from_longitude(coordinate.longitude()),
        })
    }

    fn to_canonical(&self) -> GeoResult<Coordinate> {
        Coordinate::new(self.latitude.value(), self.longitude.value())
    }
}

impl FromStr for Dms {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s)?;
        let (lat, lon) = split_axes(s, &tokens, 3)?;
        check_axis_kinds(s, &lat, &lon)?;

        let latitude = axis_from_numbers(s, &lat, Cardinal::North)?;
        let longitude = axis_from_numbers(s, &lon, Cardinal::East)?;
        Self::new(latitude, longitude)
    }
}

/// 由"度 分 秒"数值组构造单轴，方位缺省为正半球
fn axis_from_numbers(text: &str, axis: &Axis, default: Cardinal) -> GeoResult<DmsAxis> {
    let degrees = integer_degrees(text, axis.numbers[0])?;
    let minutes = axis.numbers[1];
    if minutes < 0.0 || minutes.fract() != 0.0 {
        return Err(GeoError::parse(
            text,
            format!("分必须是非负整数，得到 {minutes}"),
        ));
    }
    DmsAxis::new(
        axis.cardinal.unwrap_or(default),
        degrees,
        minutes as u8,
        axis.numbers[2],
    )
}

impl std::fmt::Display for Dms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.latitude, self.longitude)
    }
}

// ============================================================================
// 测试
// ============================================================================
