// crates/cm_mesh/src/boundary.rs

//! 边界面分类
//!
//! 候选边界面为 neighbor 为负的面，按面索引升序。边界条件按列表顺序
//! 依次写入边界面数组；未被认领的候选面按面索引升序归入一个自动补齐的
//! "未指定"边界条件并追加到列表末尾。该顺序决定幽灵单元编号。

use cm_config::BoundaryConfig;
use cm_foundation::ScalarOps;
use tracing::{info, warn};

use crate::block::{Block, BuildStage};
use crate::boundcond::BoundaryCondition;
use crate::error::{MeshError, MeshResult};

impl<S: ScalarOps> Block<S> {
    /// 候选边界面（neighbor 为负），升序
    pub fn boundary_candidates(&self) -> Vec<i32> {
        (0..self.nface())
            .filter(|&ifc| self.fccls.interior_row(ifc)[1] < 0)
            .map(|ifc| ifc as i32)
            .collect()
    }

    /// 分类边界面（默认配置）
    pub fn build_boundary(&mut self) -> MeshResult<()> {
        self.build_boundary_with(&BoundaryConfig::default())
    }

    /// 分类边界面
    ///
    /// 可在 `Boundary` 阶段重复调用：上次自动补齐的边界条件不参与认领，
    /// 邻接关系和边界条件列表不变时结果完全相同。出错时网格块保持原状。
    ///
    /// 宽松模式下被跳过的面从边界条件中移除，`faces()` 与 `positions()`
    /// 逐项对应。
    pub fn build_boundary_with(&mut self, config: &BoundaryConfig) -> MeshResult<()> {
        self.require_stage("build_boundary", &[BuildStage::Interior, BuildStage::Boundary])?;

        let candidates = self.boundary_candidates();
        let declared: Vec<&BoundaryCondition> =
            self.bclist.iter().filter(|bc| !bc.is_synthetic()).collect();
        let mut claimed: Vec<Option<usize>> = vec![None; candidates.len()];
        let mut bndfcs: Vec<[i32; 2]> = Vec::with_capacity(candidates.len());
        let mut assignments: Vec<(Vec<i32>, Vec<usize>)> = Vec::with_capacity(declared.len());

        for (sern, bc) in declared.iter().enumerate() {
            let mut kept = Vec::with_capacity(bc.len());
            let mut assigned = Vec::with_capacity(bc.len());
            for &face in bc.faces() {
                let Ok(ic) = candidates.binary_search(&face) else {
                    if config.strict {
                        return Err(MeshError::InvalidBoundaryFace {
                            bc: bc.name().to_string(),
                            face,
                        });
                    }
                    warn!(bc = bc.name(), face, "边界条件引用了非边界面, 已跳过");
                    continue;
                };
                if let Some(first) = claimed[ic] {
                    return Err(MeshError::DuplicateBoundaryFace {
                        face,
                        first_bc: declared[first].name().to_string(),
                        second_bc: bc.name().to_string(),
                    });
                }
                claimed[ic] = Some(sern);
                kept.push(face);
                assigned.push(bndfcs.len());
                bndfcs.push([face, sern as i32]);
            }
            assignments.push((kept, assigned));
        }

        let remainder: Vec<i32> = candidates
            .iter()
            .zip(&claimed)
            .filter(|(_, owner)| owner.is_none())
            .map(|(&face, _)| face)
            .collect();

        self.bclist.remove_synthetic();
        for (bc, (kept, assigned)) in self.bclist.iter_mut().zip(assignments) {
            bc.assign(kept, assigned);
        }
        if !remainder.is_empty() {
            let sern = self.bclist.len();
            warn!(
                name = %config.unspecified_name,
                kind = %config.unspecified_kind,
                nface = remainder.len(),
                "未被认领的边界面归入自动补齐的边界条件"
            );
            let start = bndfcs.len();
            bndfcs.extend(remainder.iter().map(|&face| [face, sern as i32]));
            let mut synthetic = BoundaryCondition::synthetic(
                config.unspecified_name.clone(),
                config.unspecified_kind.clone(),
                remainder,
            );
            synthetic.assign_positions((start..bndfcs.len()).collect());
            self.bclist.push(synthetic);
        }

        self.bndfcs = bndfcs;
        self.stage = BuildStage::Boundary;
        info!(
            nbound = self.nbound(),
            nbc = self.bclist.len(),
            "边界面分类完成"
        );
        Ok(())
    }
}
