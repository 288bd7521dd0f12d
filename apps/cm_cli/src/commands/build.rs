// apps/cm_cli/src/commands/build.rs

//! 网格块构建命令
//!
//! 加载网格定义，依次执行三个构建阶段，输出统计和一致性检查结果。

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use cm_config::{BuildConfig, Precision};
use cm_mesh::{BlockBuilder, MeshDefinition};
use tracing::{info, warn};

/// 构建参数
#[derive(Args)]
pub struct BuildArgs {
    /// 网格定义文件 (JSON)
    #[arg(short, long)]
    pub mesh: PathBuf,

    /// 构建配置文件 (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 浮点精度 (f32, f64)，覆盖配置文件
    #[arg(short, long)]
    pub precision: Option<Precision>,

    /// 以 JSON 输出统计信息
    #[arg(long)]
    pub json: bool,
}

/// 执行构建命令
pub fn execute(args: BuildArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => BuildConfig::from_file(path)
            .with_context(|| format!("加载配置文件失败: {}", path.display()))?,
        None => BuildConfig::default(),
    };
    let mut builder = BlockBuilder::new(config);
    if let Some(precision) = args.precision {
        builder = builder.precision(precision);
    }

    let def = MeshDefinition::from_file(&args.mesh)
        .with_context(|| format!("加载网格定义失败: {}", args.mesh.display()))?;
    info!(
        path = %args.mesh.display(),
        nnode = def.nodes.len(),
        ncell = def.cells.len(),
        precision = %builder.config().precision,
        "开始构建"
    );

    let block = builder.build(&def).context("网格块构建失败")?;
    let stats = block.statistics();
    let report = block.validate();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", block);
        println!("{}", stats);
        println!();
        println!("=== 边界条件 ===");
        for (name, kind, nface) in block.boundary_summary() {
            println!("  {:<16} {:<14} {} 个面", name, kind, nface);
        }
    }

    for warning in &report.warnings {
        warn!("{}", warning);
    }
    if report.has_errors() {
        bail!("一致性检查失败:\n{}", report);
    }
    Ok(())
}
