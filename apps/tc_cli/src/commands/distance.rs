// terracoord\apps\tc_cli\src\commands\distance.rs

//! 距离与方位角命令

use super::{parse_canonical, parse_model, FormatKind};
use anyhow::Result;
use clap::Args;
use tc_geo::geodesic;
use tracing::debug;

/// 距离计算参数
#[derive(Args)]
pub struct DistanceArgs {
    /// 起点坐标
    pub from: String,

    /// 终点坐标
    pub to: String,

    /// 坐标格式
    #[arg(short, long, value_enum, default_value = "dd")]
    pub format: FormatKind,

    /// 地球模型 (sphere, wgs84)
    #[arg(short, long, default_value = "wgs84")]
    pub model: String,
}

/// 执行距离计算
pub fn execute(args: DistanceArgs) -> Result<()> {
    let from = parse_canonical(&args.from, args.format)?;
    let to = parse_canonical(&args.to, args.format)?;
    let model = parse_model(&args.model)?;
    debug!("{from} -> {to} ({model})");

    let distance = geodesic::distance(&from, &to, model)?;
    let bearing = geodesic::initial_bearing(&from, &to, model)?;

    println!("距离: {distance:.3} m");
    println!("方位角: {bearing:.4}°");
    Ok(())
}
