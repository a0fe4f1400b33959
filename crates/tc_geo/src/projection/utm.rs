// terracoord\crates\tc_geo\src\projection\utm.rs
//! UTM (Universal Transverse Mercator) 坐标
//!
//! 带号 1-60、纬度带字母 C-X（不含 I/O）、东向/北向坐标。经纬度
//! 不做缓存，每次通过逆向投影按需重算——UTM 是派生的有损视图。
//!
//! 南半球（带字母 C-M）的假北 10,000,000 m 由带字母推得，不单独
//! 存储半球标志；逆向转换时的假北扣除只发生在该次调用内部，
//! 存储值从不被修改。
//!
//! # 示例
//!
//! ```
//! use tc_geo::coordinate::Coordinate;
//! use tc_geo::format::CoordinateFormat;
//! use tc_geo::projection::Utm;
//!
//! let nyc = Coordinate::new(40.7128, -74.0060).unwrap();
//! let utm = Utm::from_canonical(nyc).unwrap();
//! assert_eq!(format!("{utm}"), "18T 583959 4507351");
//!
//! let parsed: Utm = "18T 583959 4507351".parse().unwrap();
//! ```

use super::transverse_mercator::{self, TransverseMercatorParams};
use crate::coordinate::Coordinate;
use crate::error::{GeoError, GeoResult};
use crate::format::CoordinateFormat;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// UTM 建模的纬度范围（极冠区不在纬度带内）
pub const UTM_LATITUDE_RANGE: (f64, f64) = (-80.0, 84.0);

/// 南半球假北 (米)
pub const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// 纬度带字母表：每带 8 度，从 80°S 起，不含 I/O，X 带延伸到 84°N
const BAND_LETTERS: &[u8] = b"CDEFGHJKLMNPQRSTUVWX";

/// UTM 坐标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Utm {
    zone_number: u8,
    zone_letter: char,
    easting: f64,
    northing: f64,
}

impl Utm {
    /// 从各字段创建 UTM 坐标
    ///
    /// # Errors
    /// 带号不在 [1, 60] 或带字母无效时返回错误
    pub fn new(zone_number: u8, zone_letter: char, easting: f64, northing: f64) -> GeoResult<Self> {
        GeoError::check_utm_zone(zone_number)?;
        let zone_letter = zone_letter.to_ascii_uppercase();
        if !zone_letter.is_ascii() || !BAND_LETTERS.contains(&(zone_letter as u8)) {
            return Err(GeoError::parse(
                zone_letter.to_string(),
                "带字母必须是 C-X (不含 I/O)",
            ));
        }
        Ok(Self {
            zone_number,
            zone_letter,
            easting,
            northing,
        })
    }

    /// UTM 带号 (1-60)
    #[inline]
    #[must_use]
    pub const fn zone_number(&self) -> u8 {
        self.zone_number
    }

    /// 纬度带字母
    #[inline]
    #[must_use]
    pub const fn zone_letter(&self) -> char {
        self.zone_letter
    }

    /// 东向坐标 (米)
    #[inline]
    #[must_use]
    pub const fn easting(&self) -> f64 {
        self.easting
    }

    /// 北向坐标 (米)
    #[inline]
    #[must_use]
    pub const fn northing(&self) -> f64 {
        self.northing
    }

    /// 半球：带字母 N 及之后为北半球
    #[inline]
    #[must_use]
    pub const fn is_northern(&self) -> bool {
        self.zone_letter >= 'N'
    }
}

impl CoordinateFormat for Utm {
    fn from_canonical(coordinate: Coordinate) -> GeoResult<Self> {
        let lat = coordinate.latitude();
        let lon = coordinate.longitude();

        let zone_number = zone_for_longitude(lon);
        let zone_letter = band_letter(lat)?;

        let params = TransverseMercatorParams::utm(zone_number, lat >= 0.0);
        let (easting, northing) = transverse_mercator::forward(&params, lon, lat)?;

        Ok(Self {
            zone_number,
            zone_letter,
            easting,
            northing,
        })
    }

    fn to_canonical(&self) -> GeoResult<Coordinate> {
        // 假北扣除由参数局部完成，不触碰存储值
        let params = TransverseMercatorParams::utm(self.zone_number, self.is_northern());
        let (lon, lat) = transverse_mercator::inverse(&params, self.easting, self.northing)?;
        Coordinate::new(lat, lon)
    }
}

impl FromStr for Utm {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();

        let (zone_text, letter_text, easting_text, northing_text) = match parts.as_slice() {
            // "18T 583959 4507351"
            [zone_letter, e, n] if zone_letter.chars().count() >= 2 => {
                // 在最后一个字符的边界上切开，带字母可能是多字节字符
                let boundary = zone_letter
                    .char_indices()
                    .last()
                    .map_or(0, |(index, _)| index);
                let (digits, letter) = zone_letter.split_at(boundary);
                (digits, letter, *e, *n)
            }
            // "18 T 583959 4507351"
            [zone, letter, e, n] => (*zone, *letter, *e, *n),
            _ => {
                return Err(GeoError::parse(
                    s,
                    "期望格式 \"<带号><带字母> <东向> <北向>\"",
                ))
            }
        };

        let zone_number: u8 = zone_text
            .parse()
            .map_err(|_| GeoError::parse(s, format!("无法识别的带号 \"{zone_text}\"")))?;

        let mut letters = letter_text.chars();
        let zone_letter = match (letters.next(), letters.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(GeoError::parse(
                    s,
                    format!("无法识别的带字母 \"{letter_text}\""),
                ))
            }
        };

        let parse_meters = |text: &str, axis: &'static str| -> GeoResult<f64> {
            text.replace(',', ".")
                .parse()
                .map_err(|_| GeoError::parse(s, format!("无法识别的{axis} \"{text}\"")))
        };

        Self::new(
            zone_number,
            zone_letter,
            parse_meters(easting_text, "东向坐标")?,
            parse_meters(northing_text, "北向坐标")?,
        )
    }
}

impl std::fmt::Display for Utm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {:.0} {:.0}",
            self.zone_number, self.zone_letter, self.easting, self.northing
        )
    }
}

// ============================================================================
// 带号/带字母辅助函数
// ============================================================================

/// 从经度计算 UTM 带号
///
/// 经度 180 属于第 60 带（公式值 61 收到 60）。
#[must_use]
pub fn zone_for_longitude(lon: f64) -> u8 {
    let zone = ((lon + 180.0) / 6.0).floor() as i32 + 1;
    zone.clamp(1, 60) as u8
}

/// 获取 UTM 带的中央子午线 (度)
#[must_use]
pub fn central_meridian(zone: u8) -> f64 {
    f64::from(zone) * 6.0 - 183.0
}

/// 从纬度计算纬度带字母
///
/// 8 度一带，从 80°S 的 C 带到 72°N 起的 X 带（X 带延伸到 84°N）。
///
/// # Errors
/// 纬度在极冠区（< -80 或 > 84）时返回 `OutOfRange`
pub fn band_letter(lat: f64) -> GeoResult<char> {
    GeoError::check_coordinate("纬度", lat, UTM_LATITUDE_RANGE.0, UTM_LATITUDE_RANGE.1)?;

    // X 带覆盖 [72, 84]
    let index = (((lat + 80.0) / 8.0).floor() as usize).min(BAND_LETTERS.len() - 1);
    Ok(BAND_LETTERS[index] as char)
}

/// 纬度带字母在带字母表中的序号
pub(crate) fn band_index(letter: char) -> Option<usize> {
    if !letter.is_ascii() {
        return None;
    }
    BAND_LETTERS.iter().position(|&b| b == letter as u8)
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
    fn test_zone_for_longitude() {
        assert_eq!(zone_for_longitude(116.0), 50);
        assert_eq!(zone_for_longitude(-122.0), 10);
        assert_eq!(zone_for_longitude(0.0), 31);
        assert_eq!(zone_for_longitude(-180.0), 1);
        assert_eq!(zone_for_longitude(180.0), 60);
    }

    #[test]
    fn test_central_meridian() {
        assert!((central_meridian(50) - 117.0).abs() < 1e-10);
        assert!((central_meridian(31) - 3.0).abs() < 1e-10);
        assert!((central_meridian(1) - (-177.0)).abs() < 1e-10);
    }

    #[test]
    fn test_band_letter() {
        assert_eq!(band_letter(40.7128).expect("T带"), 'T');
        assert_eq!(band_letter(-33.8688).expect("H带"), 'H');
        assert_eq!(band_letter(0.0).expect("N带"), 'N');
        assert_eq!(band_letter(-0.0001).expect("M带"), 'M');
        assert_eq!(band_letter(-80.0).expect("C带"), 'C');
        assert_eq!(band_letter(72.0).expect("X带"), 'X');
        assert_eq!(band_letter(84.0).expect("X带"), 'X');
    }

    #[test]
    fn test_band_letter_polar_caps_rejected() {
        assert!(band_letter(84.1).is_err());
        assert!(band_letter(-80.1).is_err());
    }

    #[test]
    fn test_from_canonical_reference_value() {
        // 纽约，对标标准 UTM 表（亚米级）
        let utm = Utm::from_canonical(coord(40.7128, -74.0060)).expect("转入");
        assert_eq!(utm.zone_number(), 18);
        assert_eq!(utm.zone_letter(), 'T');
        assert!((utm.easting() - 583_959.37).abs() < 1.0, "e = {}", utm.easting());
        assert!(
            (utm.northing() - 4_507_351.0).abs() < 1.0,
            "n = {}",
            utm.northing()
        );
    }

    #[test]
    fn test_from_canonical_southern() {
        // 悉尼：南半球北向坐标含假北
        let utm = Utm::from_canonical(coord(-33.8688, 151.2093)).expect("转入");
        assert_eq!(utm.zone_number(), 56);
        assert_eq!(utm.zone_letter(), 'H');
        assert!(!utm.is_northern());
        assert!((utm.easting() - 334_368.63).abs() < 1.0);
        assert!((utm.northing() - 6_250_948.35).abs() < 1.0);
    }

    #[test]
    fn test_canonical_roundtrip() {
        let cases = [
            (40.7128, -74.0060),
            (-33.8688, 151.2093),
            (0.5, 0.5),
            (-0.5, -0.5),
            (83.9, 126.0),
            (-79.9, -60.0),
        ];
        for (lat, lon) in cases {
            let utm = Utm::from_canonical(coord(lat, lon)).expect("转入");
            let back = utm.to_canonical().expect("转出");
            // 1e-7 度约 1cm，远优于 1m 要求
            assert!((back.latitude() - lat).abs() < 1e-7, "lat: {lat}");
            assert!((back.longitude() - lon).abs() < 1e-7, "lon: {lon}");
        }
    }

    #[test]
    fn test_polar_rejected() {
        let err = Utm::from_canonical(coord(85.0, 0.0)).unwrap_err();
        assert!(matches!(err, GeoError::OutOfRange { .. }));
        assert!(Utm::from_canonical(coord(-81.0, 0.0)).is_err());
    }

    #[test]
    fn test_parse_compact_and_spaced() {
        let compact: Utm = "18T 583959.37 4507351.00".parse().expect("紧凑");
        let spaced: Utm = "18 T 583959.37 4507351.00".parse().expect("分隔");
        assert_eq!(compact, spaced);
        assert_eq!(compact.zone_number(), 18);
        assert_eq!(compact.zone_letter(), 'T');
    }

    #[test]
    fn test_parse_lowercase_letter() {
        let utm: Utm = "18t 583959 4507351".parse().expect("小写");
        assert_eq!(utm.zone_letter(), 'T');
    }

    #[test]
    fn test_parse_malformed() {
        // 词元数不对
        assert!("18T 583959".parse::<Utm>().is_err());
        assert!("18T 583959 4507351 extra".parse::<Utm>().is_err());
        // 非数字
        assert!("abT 583959 4507351".parse::<Utm>().is_err());
        assert!("18T abc 4507351".parse::<Utm>().is_err());
        // 多字节字符不得引起崩溃
        assert!("18° 583959 4507351".parse::<Utm>().is_err());
        // 非法带号/带字母
        assert!("0T 583959 4507351".parse::<Utm>().is_err());
        assert!("61T 583959 4507351".parse::<Utm>().is_err());
        assert!("18I 583959 4507351".parse::<Utm>().is_err());
        assert!("18A 583959 4507351".parse::<Utm>().is_err());
    }

    #[test]
    fn test_parse_roundtrip_via_display() {
        let utm = Utm::from_canonical(coord(-33.8688, 151.2093)).expect("转入");
        let text = format!("{utm}");
        assert_eq!(text, "56H 334369 6250948");
        let parsed: Utm = text.parse().expect("往返");
        let back = parsed.to_canonical().expect("转出");
        // 显示截断到整米，往返误差 < 1m (约 1e-5 度)
        assert!((back.latitude() + 33.8688).abs() < 2e-5);
        assert!((back.longitude() - 151.2093).abs() < 2e-5);
    }

    #[test]
    fn test_to_canonical_does_not_mutate() {
        let utm = Utm::from_canonical(coord(-33.8688, 151.2093)).expect("转入");
        let n_before = utm.northing();
        let _ = utm.to_canonical().expect("转出");
        let _ = utm.to_canonical().expect("再次转出");
        assert_eq!(utm.northing(), n_before);
    }
}
