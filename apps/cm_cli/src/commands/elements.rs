// apps/cm_cli/src/commands/elements.rs

//! 单元类型表显示命令

use anyhow::Result;
use clap::Args;
use cm_mesh::{ElementType, CLMFC, CLMND, ELEMENT_TABLE, FCMND, FCREL};

/// 单元类型表参数
#[derive(Args)]
pub struct ElementsArgs {
    /// 同时列出每种单元的局部面
    #[arg(long)]
    pub faces: bool,
}

/// 执行单元类型表命令
pub fn execute(args: ElementsArgs) -> Result<()> {
    println!("=== 单元类型表 ===");
    println!("{:>3} {:<12} {:>4} {:>6} {:>6} {:>6}", "id", "name", "dim", "nnode", "nedge", "nface");
    for info in &ELEMENT_TABLE {
        println!(
            "{:>3} {:<12} {:>4} {:>6} {:>6} {:>6}",
            info.id, info.name, info.dim, info.nnode, info.nedge, info.nface
        );
    }
    println!();
    println!("FCMND = {}, CLMND = {}, CLMFC = {}, FCREL = {}", FCMND, CLMND, CLMFC, FCREL);

    if args.faces {
        println!();
        for ty in ElementType::ALL {
            let faces = ty.local_faces();
            if faces.is_empty() {
                continue;
            }
            println!("{} ({} 个面):", ty, faces.len());
            for (fty, local) in faces {
                println!("  {:<10} {:?}", fty.name(), local);
            }
        }
    }
    Ok(())
}
