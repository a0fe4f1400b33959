// terracoord\crates\tc_geo\src\format/mod.rs
//! 文本坐标格式
//!
//! 提供 DD（十进制度）、DMM（度-十进制分）、DMS（度-分-秒）三种
//! 六十进制文本编码，以及所有格式共用的转换契约
//! [`CoordinateFormat`]。
//!
//! # 转换契约
//!
//! 任意格式 A 到格式 B 的转换都必须走规范坐标：
//! `A.to_canonical()` 然后 `B::from_canonical(...)`。不允许 A→B
//! 直连捷径，正确性集中在规范坐标一处。
//!
//! # 文本约定
//!
//! - 半球字母 N/S/E/W，大小写不敏感，前缀或后缀，缺省为正半球
//! - 度分秒符号 `°` `'` `"` 及其常见变体 `º` `´` `′` `″`
//! - 小数点或小数逗号
//! - 空白可选

mod dd;
mod dmm;
mod dms;

pub use dd::Dd;
pub use dmm::{Dmm, DmmAxis};
pub use dms::{Dms, DmsAxis};

use crate::coordinate::Coordinate;
use crate::error::{GeoError, GeoResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// 转换契约
// ============================================================================

/// 坐标格式转换契约
///
/// 每个格式变体都必须能转出/转入规范坐标。跨格式转换统一通过
/// [`CoordinateFormat::convert`] 完成。
pub trait CoordinateFormat: Sized {
    /// 从规范坐标构造本格式
    ///
    /// # Errors
    /// 坐标超出本格式可表示的范围时返回 `OutOfRange`
    fn from_canonical(coordinate: Coordinate) -> GeoResult<Self>;

    /// 转出规范坐标
    ///
    /// # Errors
    /// 逆向转换失败时返回对应错误
    fn to_canonical(&self) -> GeoResult<Coordinate>;

    /// 跨格式转换（唯一的 A→B 路径，始终经过规范坐标）
    ///
    /// # Errors
    /// 两步转换中的任一步失败时返回对应错误
    fn convert<T: CoordinateFormat>(&self) -> GeoResult<T> {
        T::from_canonical(self.to_canonical()?)
    }
}

// ============================================================================
// 半球方位
// ============================================================================

/// 半球方位字母
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinal {
    /// 北纬
    North,
    /// 南纬
    South,
    /// 东经
    East,
    /// 西经
    West,
}

impl Cardinal {
    /// 符号：北/东为 +1，南/西为 -1
    #[inline]
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::North | Self::East => 1.0,
            Self::South | Self::West => -1.0,
        }
    }

    /// 是否为纬度方位 (N/S)
    #[inline]
    #[must_use]
    pub const fn is_latitude(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// 从字符解析 (大小写不敏感)
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Self::North),
            'S' => Some(Self::South),
            'E' => Some(Self::East),
            'W' => Some(Self::West),
            _ => None,
        }
    }

    /// 按符号选择纬度方位
    #[inline]
    #[must_use]
    pub fn for_latitude(value: f64) -> Self {
        if value < 0.0 {
            Self::South
        } else {
            Self::North
        }
    }

    /// 按符号选择经度方位
    #[inline]
    #[must_use]
    pub fn for_longitude(value: f64) -> Self {
        if value < 0.0 {
            Self::West
        } else {
            Self::East
        }
    }

    /// 方位字母
    #[inline]
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
            Self::East => 'E',
            Self::West => 'W',
        }
    }
}

impl std::fmt::Display for Cardinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

// ============================================================================
// 词法扫描
// ============================================================================

/// 坐标文本词法单元
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token {
    /// 数值
    Number(f64),
    /// 半球方位字母
    Cardinal(Cardinal),
}

/// 度/分/秒符号及其常见变体
fn is_symbol(c: char) -> bool {
    matches!(c, '°' | 'º' | '\'' | '´' | '′' | '"' | '″')
}

/// 将坐标文本拆为数值与方位字母的词法单元序列
///
/// 度分秒符号与空白只作分隔符；小数逗号归一化为小数点。
pub(crate) fn tokenize(text: &str) -> GeoResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() || is_symbol(c) {
            chars.next();
        } else if let Some(cardinal) = Cardinal::from_char(c) {
            chars.next();
            tokens.push(Token::Cardinal(cardinal));
        } else if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' {
            let mut buf = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() || matches!(d, '-' | '+' | '.' | ',') {
                    buf.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            // 结尾的分隔符属于语法而非数值（如 "40.7128, -74"）
            let trimmed = buf.trim_end_matches(['.', ',']).replace(',', ".");
            let value: f64 = trimmed
                .parse()
                .map_err(|_| GeoError::parse(text, format!("无法识别的数字 \"{buf}\"")))?;
            tokens.push(Token::Number(value));
        } else {
            return Err(GeoError::parse(text, format!("无法识别的字符 '{c}'")));
        }
    }

    Ok(tokens)
}

/// 单轴解析结果：可选方位 + 定长数值序列
pub(crate) struct Axis {
    pub cardinal: Option<Cardinal>,
    pub numbers: Vec<f64>,
}

/// 按"[方位] 数值×n"或"数值×n [方位]"切出两个坐标轴
///
/// `numbers_per_axis`: DD 为 1，DMM 为 2，DMS 为 3。
pub(crate) fn split_axes(
    text: &str,
    tokens: &[Token],
    numbers_per_axis: usize,
) -> GeoResult<(Axis, Axis)> {
    let mut pos = 0;
    let mut read_axis = || -> GeoResult<Axis> {
        let mut cardinal = None;
        if let Some(Token::Cardinal(c)) = tokens.get(pos) {
            cardinal = Some(*c);
            pos += 1;
        }
        let mut numbers = Vec::with_capacity(numbers_per_axis);
        for _ in 0..numbers_per_axis {
            match tokens.get(pos) {
                Some(Token::Number(n)) => {
                    numbers.push(*n);
                    pos += 1;
                }
                _ => {
                    return Err(GeoError::parse(
                        text,
                        format!("每个坐标轴需要 {numbers_per_axis} 个数值"),
                    ))
                }
            }
        }
        // 后缀方位（仅在没有前缀方位时）
        if cardinal.is_none() {
            if let Some(Token::Cardinal(c)) = tokens.get(pos) {
                cardinal = Some(*c);
                pos += 1;
            }
        }
        Ok(Axis { cardinal, numbers })
    };

    let first = read_axis()?;
    let second = read_axis()?;

    if pos != tokens.len() {
        return Err(GeoError::parse(text, "存在多余的输入"));
    }

    Ok((first, second))
}

/// 校验轴方位的种类：第一轴必须是纬度方位，第二轴必须是经度方位
pub(crate) fn check_axis_kinds(text: &str, lat: &Axis, lon: &Axis) -> GeoResult<()> {
    if let Some(c) = lat.cardinal {
        if !c.is_latitude() {
            return Err(GeoError::parse(text, format!("纬度轴不能使用方位 {c}")));
        }
    }
    if let Some(c) = lon.cardinal {
        if c.is_latitude() {
            return Err(GeoError::parse(text, format!("经度轴不能使用方位 {c}")));
        }
    }
    Ok(())
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_sign() {
        assert_eq!(Cardinal::North.sign(), 1.0);
        assert_eq!(Cardinal::South.sign(), -1.0);
        assert_eq!(Cardinal::East.sign(), 1.0);
        assert_eq!(Cardinal::West.sign(), -1.0);
    }

    #[test]
    fn test_cardinal_from_char_case_insensitive() {
        assert_eq!(Cardinal::from_char('n'), Some(Cardinal::North));
        assert_eq!(Cardinal::from_char('W'), Some(Cardinal::West));
        assert_eq!(Cardinal::from_char('X'), None);
    }

    #[test]
    fn test_tokenize_dmm_text() {
        let tokens = tokenize("N40°42.768' W074°00.360'").expect("词法");
        assert_eq!(
            tokens,
            vec![
                Token::Cardinal(Cardinal::North),
                Token::Number(40.0),
                Token::Number(42.768),
                Token::Cardinal(Cardinal::West),
                Token::Number(74.0),
                Token::Number(0.36),
            ]
        );
    }

    #[test]
    fn test_tokenize_unicode_lookalikes() {
        let tokens = tokenize("N40º42.768´ E10º5.1´").expect("词法");
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_tokenize_decimal_comma() {
        let tokens = tokenize("40,7128 -74,0060").expect("词法");
        assert_eq!(tokens, vec![Token::Number(40.7128), Token::Number(-74.006)]);
    }

    #[test]
    fn test_tokenize_rejects_garbage() {
        assert!(tokenize("40.7 & 74.0").is_err());
        assert!(tokenize("4-0.7 74.0").is_err());
    }

    #[test]
    fn test_split_axes_prefix_and_suffix() {
        let text = "40.7128 N 74.0060 W";
        let tokens = tokenize(text).expect("词法");
        let (lat, lon) = split_axes(text, &tokens, 1).expect("切轴");
        assert_eq!(lat.cardinal, Some(Cardinal::North));
        assert_eq!(lon.cardinal, Some(Cardinal::West));
    }

    #[test]
    fn test_split_axes_missing_number() {
        let text = "N40°42.768'";
        let tokens = tokenize(text).expect("词法");
        assert!(split_axes(text, &tokens, 2).is_err());
    }

    #[test]
    fn test_split_axes_trailing_garbage() {
        let text = "40.0 50.0 60.0";
        let tokens = tokenize(text).expect("词法");
        assert!(split_axes(text, &tokens, 1).is_err());
    }

    #[test]
    fn test_check_axis_kinds() {
        let text = "E40 N74";
        let tokens = tokenize(text).expect("词法");
        let (lat, lon) = split_axes(text, &tokens, 1).expect("切轴");
        assert!(check_axis_kinds(text, &lat, &lon).is_err());
    }
}
