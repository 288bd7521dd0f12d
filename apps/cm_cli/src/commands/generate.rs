// apps/cm_cli/src/commands/generate.rs

//! 网格生成命令

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use cm_mesh::generation::{line_segments, BoxGenerator, RectangleGenerator};
use cm_mesh::MeshDefinition;
use tracing::info;

/// 生成参数
#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    pub shape: Shape,

    /// 输出文件（缺省时打印到标准输出）
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,
}

/// 生成的区域形状
#[derive(Subcommand)]
pub enum Shape {
    /// 矩形
    Rect {
        /// x 方向单元数
        #[arg(long, default_value_t = 4)]
        nx: usize,
        /// y 方向单元数
        #[arg(long, default_value_t = 4)]
        ny: usize,
        /// x 方向长度
        #[arg(long, default_value_t = 1.0)]
        lx: f64,
        /// y 方向长度
        #[arg(long, default_value_t = 1.0)]
        ly: f64,
        /// 生成三角形而非四边形
        #[arg(long)]
        triangles: bool,
    },
    /// 长方体
    Box {
        /// 各方向单元数
        #[arg(long, num_args = 3, default_values_t = [2, 2, 2])]
        n: Vec<usize>,
        /// 各方向长度
        #[arg(long, num_args = 3, default_values_t = [1.0, 1.0, 1.0])]
        l: Vec<f64>,
    },
    /// 一维线段
    Line {
        /// 段数
        #[arg(long, default_value_t = 4)]
        n: usize,
        /// 长度
        #[arg(long, default_value_t = 1.0)]
        length: f64,
    },
}

/// 执行生成命令
pub fn execute(args: GenerateArgs) -> Result<()> {
    let def: MeshDefinition = match args.shape {
        Shape::Rect {
            nx,
            ny,
            lx,
            ly,
            triangles,
        } => {
            let generator = RectangleGenerator::new(nx, ny, lx, ly);
            if triangles {
                generator.triangles()
            } else {
                generator.quads()
            }
        }
        Shape::Box { n, l } => BoxGenerator::new([n[0], n[1], n[2]], [l[0], l[1], l[2]]).hexes(),
        Shape::Line { n, length } => line_segments(n, length),
    };

    match &args.output {
        Some(path) => {
            def.save_to_file(path)
                .with_context(|| format!("写入失败: {}", path.display()))?;
            info!(
                path = %path.display(),
                nnode = def.nodes.len(),
                ncell = def.cells.len(),
                "网格定义已写入"
            );
        }
        None => println!("{}", def.to_json()?),
    }
    Ok(())
}
