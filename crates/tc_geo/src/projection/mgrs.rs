// terracoord\crates\tc_geo\src\projection\mgrs.rs
//! MGRS (Military Grid Reference System) 坐标
//!
//! 在 UTM 之上叠加 100 km 网格方格双字母码：列字母取自 24 字母表
//! (A-Z 不含 I/O)，行字母取自 20 字母表 (A-V 不含 I/O)。数字字段
//! 是东向/北向对 100 km 的余数，位数编码精度（1-5 位 ⇒ 10 km-1 m）。
//!
//! 解码是最难的路径：行字母每 2,000,000 m 循环一次，从赤道到极点
//! 重复五轮，需要用按带字母查表的最小北向值消除歧义；列字母按
//! 带号的 6 组循环起始字母走查还原绝对东向。所有非法字母都以
//! `InvalidGridReference` 报告，不允许中止。

use super::utm::{band_index, Utm};
use crate::coordinate::Coordinate;
use crate::error::{GeoError, GeoResult};
use crate::format::CoordinateFormat;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 100 km 方格列字母表 (24 字母，不含 I/O)
const GRID_LETTERS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

/// 100 km 方格行字母表 (20 字母，不含 I/O)
const ROW_LETTERS: &[u8] = b"ABCDEFGHJKLMNPQRSTUV";

/// 行字母循环周期 (米)：20 行 × 100 km
const ROW_CYCLE: f64 = 2_000_000.0;

/// 100 km 方格边长 (米)
const SQUARE_SIZE: f64 = 100_000.0;

/// 各纬度带的最小北向值 (米)，与带字母表 C-X 同序
///
/// 南半球带 (C-M) 的值包含假北。
const MIN_NORTHING: [f64; 20] = [
    1_100_000.0, // C
    2_000_000.0, // D
    2_800_000.0, // E
    3_700_000.0, // F
    4_600_000.0, // G
    5_500_000.0, // H
    6_400_000.0, // J
    7_300_000.0, // K
    8_200_000.0, // L
    9_100_000.0, // M
    0.0,         // N
    800_000.0,   // P
    1_700_000.0, // Q
    2_600_000.0, // R
    3_500_000.0, // S
    4_400_000.0, // T
    5_300_000.0, // U
    6_200_000.0, // V
    7_000_000.0, // W
    7_900_000.0, // X
];

/// 缺省精度：5 位数字 = 1 米
pub const DEFAULT_PRECISION: usize = 5;

/// MGRS 坐标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mgrs {
    zone_number: u8,
    zone_letter: char,
    column: char,
    row: char,
    easting: u32,
    northing: u32,
    precision: usize,
}

impl Mgrs {
    /// 从各字段创建 MGRS 坐标
    ///
    /// 方格内东向/北向按精度截断后存储。
    ///
    /// # Errors
    /// - 带号超出 [1, 60] 时返回 `OutOfRange`
    /// - 带字母缺少最小北向表项、或列/行字母不在有效字母表内时
    ///   返回 `InvalidGridReference`
    /// - 精度不在 [1, 5] 内时返回 `OutOfRange`
    pub fn new(
        zone_number: u8,
        zone_letter: char,
        column: char,
        row: char,
        easting: u32,
        northing: u32,
        precision: usize,
    ) -> GeoResult<Self> {
        GeoError::check_utm_zone(zone_number)?;
        check_precision(precision)?;

        let zone_letter = zone_letter.to_ascii_uppercase();
        if band_index(zone_letter).is_none() {
            return Err(GeoError::invalid_grid_reference(
                zone_letter.to_string(),
                "带字母缺少最小北向表项",
            ));
        }

        let column = column.to_ascii_uppercase();
        let row = row.to_ascii_uppercase();
        if !column.is_ascii() || !GRID_LETTERS.contains(&(column as u8)) {
            return Err(GeoError::invalid_grid_reference(
                column.to_string(),
                "列字母不在有效字母表内 (A-Z 不含 I/O)",
            ));
        }
        if !row.is_ascii() || !ROW_LETTERS.contains(&(row as u8)) {
            return Err(GeoError::invalid_grid_reference(
                row.to_string(),
                "行字母不在有效字母表内 (A-V 不含 I/O)",
            ));
        }

        let step = resolution(precision);
        Ok(Self {
            zone_number,
            zone_letter,
            column,
            row,
            easting: easting / step * step,
            northing: northing / step * step,
            precision,
        })
    }

    /// 从 UTM 坐标编码，指定精度
    ///
    /// # Errors
    /// 精度不在 [1, 5] 内时返回 `OutOfRange`
    pub fn from_utm(utm: &Utm, precision: usize) -> GeoResult<Self> {
        check_precision(precision)?;

        let zone = utm.zone_number();
        let column_100k = (utm.easting() / SQUARE_SIZE).floor() as i64;
        let row_100k = (utm.northing() / SQUARE_SIZE).floor() as i64;

        // 列：每带 8 列，首列对齐本带字母组的起始字母
        let column_index =
            ((i64::from(zone) - 1) * 8 + column_100k - 1).rem_euclid(GRID_LETTERS.len() as i64);
        // 行：偶数带起始字母后移 5 位（奇偶带假原点交替）
        let row_shift = if zone % 2 == 0 { 5 } else { 0 };
        let row_index = (row_100k + row_shift).rem_euclid(ROW_LETTERS.len() as i64);

        let easting = (utm.easting() - column_100k as f64 * SQUARE_SIZE) as u32;
        let northing = (utm.northing() - row_100k as f64 * SQUARE_SIZE) as u32;

        let step = resolution(precision);
        Ok(Self {
            zone_number: zone,
            zone_letter: utm.zone_letter(),
            column: GRID_LETTERS[column_index as usize] as char,
            row: ROW_LETTERS[row_index as usize] as char,
            easting: easting / step * step,
            northing: northing / step * step,
            precision,
        })
    }

    /// 还原为 UTM 坐标（走查字母表 + 最小北向消歧）
    ///
    /// # Errors
    /// 列字母在本带 8 列内走查不到、或带字母缺少最小北向表项时
    /// 返回 `InvalidGridReference`
    pub fn to_utm(&self) -> GeoResult<Utm> {
        let square_easting = self.walk_column()?;
        let square_northing = self.walk_row()?;

        // 行字母每 2,000,000 m 重复，按带的最小北向值消歧
        let min_northing = band_index(self.zone_letter)
            .map(|i| MIN_NORTHING[i])
            .ok_or_else(|| {
                GeoError::invalid_grid_reference(
                    self.zone_letter.to_string(),
                    "带字母缺少最小北向表项",
                )
            })?;

        let mut northing = square_northing;
        while northing < min_northing {
            northing += ROW_CYCLE;
        }

        Utm::new(
            self.zone_number,
            self.zone_letter,
            square_easting + f64::from(self.easting),
            northing + f64::from(self.northing),
        )
    }

    /// 列字母走查：从本带起始列字母沿 24 字母表数 100 km 增量
    fn walk_column(&self) -> GeoResult<f64> {
        let origin = match self.zone_number % 6 {
            1 | 4 => b'A',
            2 | 5 => b'J',
            _ => b'S',
        };
        let mut index = letter_index(GRID_LETTERS, origin);
        let mut easting = SQUARE_SIZE;

        // 每带只有 8 列，走出本组即为畸形引用
        for _ in 0..8 {
            if GRID_LETTERS[index] == self.column as u8 {
                return Ok(easting);
            }
            index = (index + 1) % GRID_LETTERS.len();
            easting += SQUARE_SIZE;
        }

        Err(GeoError::invalid_grid_reference(
            format!("{}{}", self.column, self.row),
            format!("列字母 {} 不属于第 {} 带", self.column, self.zone_number),
        ))
    }

    /// 行字母走查：从本带起始行字母沿 20 字母表数 100 km 增量
    fn walk_row(&self) -> GeoResult<f64> {
        let origin = if self.zone_number % 2 == 1 { b'A' } else { b'F' };
        let mut index = letter_index(ROW_LETTERS, origin);
        let mut northing = 0.0;

        for _ in 0..ROW_LETTERS.len() {
            if ROW_LETTERS[index] == self.row as u8 {
                return Ok(northing);
            }
            index = (index + 1) % ROW_LETTERS.len();
            northing += SQUARE_SIZE;
        }

        // 构造时已校验行字母表成员资格，走查必定命中
        Err(GeoError::invalid_grid_reference(
            format!("{}{}", self.column, self.row),
            format!("行字母 {} 无法定位", self.row),
        ))
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

    /// 100 km 方格双字母码
    #[must_use]
    pub fn digraph(&self) -> String {
        format!("{}{}", self.column, self.row)
    }

    /// 方格内东向 (米，已按精度截断)
    #[inline]
    #[must_use]
    pub const fn easting(&self) -> u32 {
        self.easting
    }

    /// 方格内北向 (米，已按精度截断)
    #[inline]
    #[must_use]
    pub const fn northing(&self) -> u32 {
        self.northing
    }

    /// 精度位数 (1-5)
    #[inline]
    #[must_use]
    pub const fn precision(&self) -> usize {
        self.precision
    }
}

/// 精度位数对应的步长 (米)：5 位 → 1，1 位 → 10000
fn resolution(precision: usize) -> u32 {
    10_u32.pow(5 - precision as u32)
}

fn check_precision(precision: usize) -> GeoResult<()> {
    if !(1..=5).contains(&precision) {
        return Err(GeoError::out_of_range("精度位数", precision as f64, 1.0, 5.0));
    }
    Ok(())
}

fn letter_index(alphabet: &[u8], letter: u8) -> usize {
    // 起始字母来自固定集合，必在字母表内
    alphabet.iter().position(|&b| b == letter).unwrap_or(0)
}

impl CoordinateFormat for Mgrs {
    fn from_canonical(coordinate: Coordinate) -> GeoResult<Self> {
        Self::from_utm(&Utm::from_canonical(coordinate)?, DEFAULT_PRECISION)
    }

    fn to_canonical(&self) -> GeoResult<Coordinate> {
        self.to_utm()?.to_canonical()
    }
}

impl FromStr for Mgrs {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // 空白不敏感，统一大写
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let zone_digits: String = compact.chars().take_while(char::is_ascii_digit).collect();
        if zone_digits.is_empty() {
            return Err(GeoError::invalid_grid_reference(s, "缺少带号数字"));
        }
        let zone_number: u8 = zone_digits
            .parse()
            .map_err(|_| GeoError::parse(s, format!("无法识别的带号 \"{zone_digits}\"")))?;

        let mut rest = compact[zone_digits.len()..].chars();
        let (zone_letter, column, row) = match (rest.next(), rest.next(), rest.next()) {
            (Some(band), Some(column), Some(row))
                if band.is_ascii_alphabetic()
                    && column.is_ascii_alphabetic()
                    && row.is_ascii_alphabetic() =>
            {
                (band, column, row)
            }
            _ => {
                return Err(GeoError::invalid_grid_reference(
                    s,
                    "期望带字母后跟两位方格字母",
                ))
            }
        };

        let digits: String = rest.collect();
        if digits.is_empty() || digits.len() % 2 != 0 || digits.len() > 10 {
            return Err(GeoError::parse(
                s,
                format!("数字字段应为 2-10 位偶数个数字，得到 {} 位", digits.len()),
            ));
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(GeoError::parse(s, "数字字段含非数字字符"));
        }

        let precision = digits.len() / 2;
        let step = resolution(precision);
        let parse_half = |half: &str| -> GeoResult<u32> {
            half.parse::<u32>()
                .map(|v| v * step)
                .map_err(|_| GeoError::parse(s, format!("无法识别的数字字段 \"{half}\"")))
        };
        let easting = parse_half(&digits[..precision])?;
        let northing = parse_half(&digits[precision..])?;

        Self::new(
            zone_number, zone_letter, column, row, easting, northing, precision,
        )
    }
}

impl std::fmt::Display for Mgrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let step = resolution(self.precision);
        write!(
            f,
            "{}{} {}{} {:0width$} {:0width$}",
            self.zone_number,
            self.zone_letter,
            self.column,
            self.row,
            self.easting / step,
            self.northing / step,
            width = self.precision
        )
    }
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
    fn test_decode_reference_cell() {
        // 对标公开 MGRS 计算器参考方格：21M SQ 67286 46576 = (-5, -60)
        let mgrs: Mgrs = "21M SQ 67286 46576".parse().expect("解析");
        let utm = mgrs.to_utm().expect("还原UTM");
        assert_eq!(utm.zone_number(), 21);
        assert!((utm.easting() - 167_286.0).abs() < 0.5, "e = {}", utm.easting());
        assert!(
            (utm.northing() - 9_446_576.0).abs() < 0.5,
            "n = {}",
            utm.northing()
        );

        let c = mgrs.to_canonical().expect("转出");
        // 1e-5 度约 1.1 m
        assert!((c.latitude() + 5.0).abs() < 1e-5, "lat = {}", c.latitude());
        assert!(
            (c.longitude() + 60.0).abs() < 1e-5,
            "lon = {}",
            c.longitude()
        );
    }

    #[test]
    fn test_encode_reference_cell() {
        // 纽约的 100 km 方格与方格内余数
        let mgrs = Mgrs::from_canonical(coord(40.7128, -74.0060)).expect("编码");
        assert_eq!(format!("{mgrs}"), "18T WL 83959 07350");
    }

    #[test]
    fn test_parse_whitespace_insensitive() {
        let spaced: Mgrs = "18T WL 83959 07350".parse().expect("带空白");
        let compact: Mgrs = "18TWL8395907350".parse().expect("紧凑");
        let messy: Mgrs = " 18t wl 83959   07350 ".parse().expect("混杂");
        assert_eq!(spaced, compact);
        assert_eq!(spaced, messy);
    }

    #[test]
    fn test_canonical_roundtrip() {
        let cases = [
            (40.7128, -74.0060),
            (-33.8688, 151.2093),
            (63.99, 10.01),
            (0.5, 0.5),
            (-0.5, -0.5),
            (71.0, 25.0),
            (-79.5, -59.5),
            (83.5, 100.0),
        ];
        for (lat, lon) in cases {
            let mgrs = Mgrs::from_canonical(coord(lat, lon)).expect("编码");
            let back = mgrs.to_canonical().expect("解码");
            // 1 米精度方格，往返误差应在 1 个网格单位内 (约 1e-5 度)
            assert!(
                (back.latitude() - lat).abs() < 2e-5,
                "lat: {lat} -> {}",
                back.latitude()
            );
            assert!(
                (back.longitude() - lon).abs() < 1e-4,
                "lon: {lon} -> {}",
                back.longitude()
            );
        }
    }

    #[test]
    fn test_precision_levels() {
        let c = coord(40.7128, -74.0060);
        let utm = Utm::from_canonical(c).expect("UTM");

        let p5 = Mgrs::from_utm(&utm, 5).expect("5位");
        assert_eq!(format!("{p5}"), "18T WL 83959 07350");

        let p3 = Mgrs::from_utm(&utm, 3).expect("3位");
        assert_eq!(format!("{p3}"), "18T WL 839 073");
        assert_eq!(p3.easting(), 83_900);

        let p1 = Mgrs::from_utm(&utm, 1).expect("1位");
        assert_eq!(format!("{p1}"), "18T WL 8 0");

        // 精度越低，还原误差越大，但都应落在该精度的网格单位内
        let back = p3.to_canonical().expect("解码");
        assert!((back.latitude() - 40.7128).abs() < 0.01);
    }

    #[test]
    fn test_precision_out_of_range() {
        let utm = Utm::from_canonical(coord(40.0, 116.0)).expect("UTM");
        assert!(Mgrs::from_utm(&utm, 0).is_err());
        assert!(Mgrs::from_utm(&utm, 6).is_err());
    }

    #[test]
    fn test_parse_precision_from_digit_count() {
        let p2: Mgrs = "18T WL 83 07".parse().expect("2位");
        assert_eq!(p2.precision(), 2);
        assert_eq!(p2.easting(), 83_000);
        assert_eq!(p2.northing(), 7_000);
    }

    #[test]
    fn test_invalid_grid_reference() {
        // 带号缺失（字母开头）
        let err = "ZZ ZZ 00000 00000".parse::<Mgrs>().unwrap_err();
        assert!(
            matches!(err, GeoError::InvalidGridReference { .. }),
            "err = {err}"
        );

        // 带字母不在最小北向表内 (Z 是极区字母)
        let err = "18Z WL 83959 07350".parse::<Mgrs>().unwrap_err();
        assert!(matches!(err, GeoError::InvalidGridReference { .. }));

        // 列/行字母含 I/O
        assert!("18T IL 83959 07350".parse::<Mgrs>().is_err());
        assert!("18T WO 83959 07350".parse::<Mgrs>().is_err());

        // 行字母超出 20 字母表 (W-Z 不是合法行字母)
        let err = "18T WX 83959 07350".parse::<Mgrs>().unwrap_err();
        assert!(matches!(err, GeoError::InvalidGridReference { .. }));
    }

    #[test]
    fn test_column_not_in_zone_set() {
        // 'A' 是合法列字母，但不属于第 18 带的字母组 (S-Z)
        let mgrs = Mgrs::new(18, 'T', 'A', 'L', 0, 0, 5).expect("构造");
        let err = mgrs.to_utm().unwrap_err();
        assert!(matches!(err, GeoError::InvalidGridReference { .. }));
    }

    #[test]
    fn test_parse_malformed_digits() {
        // 奇数个数字
        assert!("18T WL 839 07".parse::<Mgrs>().is_err());
        // 数字过多
        assert!("18T WL 839590 073500".parse::<Mgrs>().is_err());
        // 缺少数字
        assert!("18T WL".parse::<Mgrs>().is_err());
    }

    #[test]
    fn test_display_zero_padding() {
        let mgrs: Mgrs = "18T WL 00042 00007".parse().expect("解析");
        assert_eq!(format!("{mgrs}"), "18T WL 00042 00007");
    }

    #[test]
    fn test_southern_hemisphere_roundtrip() {
        // 悉尼：南半球行字母消歧需要含假北的最小北向值
        let mgrs = Mgrs::from_canonical(coord(-33.8688, 151.2093)).expect("编码");
        let utm = mgrs.to_utm().expect("还原");
        assert!((utm.northing() - 6_250_948.0).abs() < 1.5, "n = {}", utm.northing());
    }
}
