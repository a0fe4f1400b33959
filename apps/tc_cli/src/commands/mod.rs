// terracoord\apps\tc_cli\src\commands/mod.rs

//! 子命令实现

pub mod convert;
pub mod distance;
pub mod translate;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tc_geo::prelude::*;

/// 支持的坐标格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatKind {
    /// 十进制度
    Dd,
    /// 度-十进制分
    Dmm,
    /// 度-分-秒
    Dms,
    /// UTM 投影坐标
    Utm,
    /// MGRS 网格引用
    Mgrs,
}

/// 按指定格式解析输入文本为规范坐标
pub fn parse_canonical(text: &str, kind: FormatKind) -> Result<Coordinate> {
    let coordinate = match kind {
        FormatKind::Dd => text.parse::<Dd>()?.to_canonical()?,
        FormatKind::Dmm => text.parse::<Dmm>()?.to_canonical()?,
        FormatKind::Dms => text.parse::<Dms>()?.to_canonical()?,
        FormatKind::Utm => text.parse::<Utm>()?.to_canonical()?,
        FormatKind::Mgrs => text.parse::<Mgrs>()?.to_canonical()?,
    };
    Ok(coordinate)
}

/// 解析地球模型名称
pub fn parse_model(name: &str) -> Result<EarthModel> {
    name.parse::<EarthModel>()
        .with_context(|| format!("无法识别的地球模型 \"{name}\""))
}
