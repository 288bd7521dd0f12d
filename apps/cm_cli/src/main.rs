// apps/cm_cli/src/main.rs

//! CeseMesh 命令行界面
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 5: Application**：
//! - 零泛型语法：仅使用 `BuildConfig` 和 `Box<dyn DynBlock>`
//! - 通过 `Precision` 枚举选择精度

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// CeseMesh 非结构网格块工具
#[derive(Parser)]
#[command(name = "cm_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Unstructured mesh block builder", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 显示单元类型表
    Elements(commands::elements::ElementsArgs),
    /// 构建网格块
    Build(commands::build::BuildArgs),
    /// 生成网格定义
    Generate(commands::generate::GenerateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

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

    match cli.command {
        Commands::Elements(args) => commands::elements::execute(args),
        Commands::Build(args) => commands::build::execute(args),
        Commands::Generate(args) => commands::generate::execute(args),
    }
}
