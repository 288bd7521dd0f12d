// crates/cm_mesh/src/statistics.rs

//! 网格块统计

use std::fmt;

use cm_foundation::ScalarOps;
use serde::Serialize;

use crate::block::{Block, BuildStage};

/// 网格块统计信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStatistics {
    pub ndim: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blkn: Option<u32>,
    pub stage: &'static str,
    pub nnode: usize,
    pub nface: usize,
    pub n_interior_faces: usize,
    pub ncell: usize,
    pub nbound: usize,
    pub nbc: usize,
    pub ngstnode: usize,
    pub ngstface: usize,
    pub ngstcell: usize,
    pub total_volume: f64,
    pub min_volume: f64,
    pub max_volume: f64,
}

impl<S: ScalarOps> Block<S> {
    /// 统计信息
    pub fn statistics(&self) -> BlockStatistics {
        let mut min_volume = f64::MAX;
        let mut max_volume = f64::MIN;
        let mut total_volume = 0.0;
        if self.stage >= BuildStage::Interior {
            for &vol in self.clvol.interior() {
                let vol = vol.to_f64();
                min_volume = min_volume.min(vol);
                max_volume = max_volume.max(vol);
                total_volume += vol;
            }
        }
        if self.ncell() == 0 || self.stage < BuildStage::Interior {
            min_volume = 0.0;
            max_volume = 0.0;
        }

        let n_interior_faces = (0..self.nface())
            .filter(|&ifc| self.fccls.interior_row(ifc)[1] >= 0)
            .count();

        BlockStatistics {
            ndim: self.ndim,
            blkn: self.blkn,
            stage: self.stage.name(),
            nnode: self.nnode(),
            nface: self.nface(),
            n_interior_faces,
            ncell: self.ncell(),
            nbound: self.nbound(),
            nbc: self.bclist.len(),
            ngstnode: self.ngstnode(),
            ngstface: self.ngstface(),
            ngstcell: self.ngstcell(),
            total_volume,
            min_volume,
            max_volume,
        }
    }
}

impl fmt::Display for BlockStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== 网格块统计 ({}D, 阶段: {}) ===", self.ndim, self.stage)?;
        if let Some(blkn) = self.blkn {
            writeln!(f, "块序号: {}", blkn)?;
        }
        writeln!(f, "节点数: {} (幽灵: {})", self.nnode, self.ngstnode)?;
        writeln!(
            f,
            "面数: {} (内部: {}, 幽灵: {})",
            self.nface, self.n_interior_faces, self.ngstface
        )?;
        writeln!(f, "单元数: {} (幽灵: {})", self.ncell, self.ngstcell)?;
        writeln!(f, "边界面数: {} ({} 个边界条件)", self.nbound, self.nbc)?;
        writeln!(f, "总体积: {:.6}", self.total_volume)?;
        write!(f, "单元体积: [{:.6}, {:.6}]", self.min_volume, self.max_volume)
    }
}
