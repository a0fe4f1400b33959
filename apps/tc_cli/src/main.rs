// terracoord\apps\tc_cli\src/main.rs

//! TerraCoord 命令行界面
//!
//! 提供坐标格式互转与大地测量计算的命令行工具。核心计算全部在
//! `tc_geo` 中完成，本层只负责参数解析、日志与输出。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// TerraCoord 坐标转换命令行工具
#[derive(Parser)]
#[command(name = "tc_cli")]
#[command(author = "TerraCoord Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "TerraCoord coordinate conversion toolkit", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 坐标格式互转
    Convert(commands::convert::ConvertArgs),
    /// 两点间距离与方位角
    Distance(commands::distance::DistanceArgs),
    /// 按方位角和距离平移
    Translate(commands::translate::TranslateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Convert(args) => commands::convert::execute(args),
        Commands::Distance(args) => commands::distance::execute(args),
        Commands::Translate(args) => commands::translate::execute(args),
    }
}
