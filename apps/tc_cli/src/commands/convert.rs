// terracoord\apps\tc_cli\src\commands\convert.rs

//! 坐标格式互转命令

use super::{parse_canonical, FormatKind};
use anyhow::Result;
use clap::Args;
use tc_geo::prelude::*;
use tc_geo::projection::mgrs;
use tracing::debug;

/// 格式互转参数
#[derive(Args)]
pub struct ConvertArgs {
    /// 输入坐标文本
    pub input: String,

    /// 输入格式
    #[arg(short, long, value_enum)]
    pub from: FormatKind,

    /// 输出格式
    #[arg(short, long, value_enum)]
    pub to: FormatKind,

    /// MGRS 输出精度位数 (1-5)
    #[arg(short, long, default_value_t = mgrs::DEFAULT_PRECISION)]
    pub precision: usize,
}

/// 执行格式互转
pub fn execute(args: ConvertArgs) -> Result<()> {
    let coordinate = parse_canonical(&args.input, args.from)?;
    debug!("规范坐标: {coordinate}");

    let output = match args.to {
        FormatKind::Dd => Dd::from_canonical(coordinate)?.to_string(),
        FormatKind::Dmm => Dmm::from_canonical(coordinate)?.to_string(),
        FormatKind::Dms => Dms::from_canonical(coordinate)?.to_string(),
        FormatKind::Utm => Utm::from_canonical(coordinate)?.to_string(),
        FormatKind::Mgrs => {
            let utm = Utm::from_canonical(coordinate)?;
            Mgrs::from_utm(&utm, args.precision)?.to_string()
        }
    };

    println!("{output}");
    Ok(())
}
