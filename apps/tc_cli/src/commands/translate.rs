// terracoord\apps\tc_cli\src\commands\translate.rs

//! 目标点平移命令

use super::{parse_canonical, parse_model, FormatKind};
use anyhow::Result;
use clap::Args;
use tc_geo::geodesic;
use tracing::debug;

/// 平移参数
#[derive(Args)]
pub struct TranslateArgs {
    /// 起点坐标
    pub from: String,

    /// 方位角 (度，从正北顺时针)
    #[arg(short, long)]
    pub bearing: f64,

    /// 距离 (米)
    #[arg(short, long)]
    pub distance: f64,

    /// 坐标格式
    #[arg(short, long, value_enum, default_value = "dd")]
    pub format: FormatKind,

    /// 地球模型 (sphere, wgs84)──WGS84 正解未实现，缺省球体
    #[arg(short, long, default_value = "sphere")]
    pub model: String,
}

/// 执行平移
pub fn execute(args: TranslateArgs) -> Result<()> {
    let from = parse_canonical(&args.from, args.format)?;
    let model = parse_model(&args.model)?;
    debug!("{from} + {}° × {} m ({model})", args.bearing, args.distance);

    let destination = geodesic::destination(&from, args.bearing, args.distance, model)?;

    println!("{destination}");
    Ok(())
}
