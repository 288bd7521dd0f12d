// crates/cm_mesh/src/ghost.rs

//! 幽灵实体构建
//!
//! 四个步骤严格按序执行：
//!
//! 1. 计数：幽灵单元数 = 边界面数；幽灵面数 = Σ(边界邻接单元面数 - 1)；
//!    幽灵节点数 = Σ边界邻接单元节点数 - Σ边界面节点数；
//! 2. 分配共享数组：每个属性 `幽灵数 + 内部数` 行，连接性填 `-1`；
//! 3. 幽灵区：共享数组的低位区，构造顺序第 k 个位于 `g-1-k`；
//! 4. 内部区：原内部数组拷入高位区，原数组丢弃。
//!
//! 之后调用核函数填充幽灵区。全部成功才提交到网格块，失败时网格块保持
//! `Boundary` 阶段不变。

use cm_foundation::ScalarOps;
use tracing::info;

use crate::block::{Block, BuildStage};
use crate::error::{MeshError, MeshResult};
use crate::kernel::{GhostBuffers, MeshKernel, NativeKernel};
use crate::shared::SharedArray;

/// 幽灵实体计数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GhostCounts {
    /// 幽灵节点数
    pub ngstnode: usize,
    /// 幽灵面数
    pub ngstface: usize,
    /// 幽灵单元数
    pub ngstcell: usize,
}

/// 幽灵计数累加器
///
/// 每个边界面贡献一个幽灵单元，按 owner 单元的面数/节点数和边界面节点数累加。
#[derive(Debug, Clone, Copy, Default)]
pub struct GhostTally {
    nodes: i64,
    faces: i64,
    cells: i64,
}

impl GhostTally {
    /// 累加一个边界面
    pub fn add(&mut self, cell_nfaces: usize, cell_nnodes: usize, face_nnodes: usize) {
        self.faces += cell_nfaces as i64 - 1;
        self.nodes += cell_nnodes as i64 - face_nnodes as i64;
        self.cells += 1;
    }

    /// 结束累加；任一计数为负说明连接性畸形
    pub fn finish(self) -> MeshResult<GhostCounts> {
        if self.nodes < 0 || self.faces < 0 {
            return Err(MeshError::internal(format!(
                "幽灵计数为负: 节点 {}, 面 {}",
                self.nodes, self.faces
            )));
        }
        Ok(GhostCounts {
            ngstnode: self.nodes as usize,
            ngstface: self.faces as usize,
            ngstcell: self.cells as usize,
        })
    }
}

/// 打包好的共享数组，核函数成功后整体提交
struct Packed<S> {
    ndcrd: SharedArray<S>,
    fctpn: SharedArray<i32>,
    fcnds: SharedArray<i32>,
    fccls: SharedArray<i32>,
    fccnd: SharedArray<S>,
    fcnml: SharedArray<S>,
    fcara: SharedArray<S>,
    cltpn: SharedArray<i32>,
    clgrp: SharedArray<i32>,
    clnds: SharedArray<i32>,
    clfcs: SharedArray<i32>,
    clcnd: SharedArray<S>,
    clvol: SharedArray<S>,
}

impl<S: ScalarOps> Block<S> {
    /// 统计幽灵实体数
    pub fn count_ghost(&self) -> MeshResult<GhostCounts> {
        let mut tally = GhostTally::default();
        for (ibnd, &[ifc, _]) in self.bndfcs.iter().enumerate() {
            if ifc < 0 || ifc as usize >= self.nface() {
                return Err(MeshError::malformed(
                    "boundary",
                    ibnd,
                    format!("面索引 {} 超出 [0, {})", ifc, self.nface()),
                ));
            }
            let ifc = ifc as usize;
            let icl = self.fccls.interior_row(ifc)[0];
            if icl < 0 || icl as usize >= self.ncell() {
                return Err(MeshError::malformed(
                    "face",
                    ifc,
                    format!("owner {} 超出 [0, {})", icl, self.ncell()),
                ));
            }
            let icl = icl as usize;
            tally.add(
                self.cell_faces(icl).len(),
                self.cell_nodes(icl).len(),
                self.face_nodes(ifc).len(),
            );
        }
        tally.finish()
    }

    /// 构建幽灵实体（默认核函数）
    pub fn build_ghost(&mut self) -> MeshResult<()> {
        self.build_ghost_with(&NativeKernel)
    }

    /// 构建幽灵实体
    pub fn build_ghost_with<K: MeshKernel>(&mut self, kernel: &K) -> MeshResult<()> {
        self.require_stage("build_ghost", &[BuildStage::Boundary])?;
        let counts = self.count_ghost()?;
        let mut packed = self.pack_shared(&counts)?;

        let mut shape = self.create_shape();
        shape.ngstnode = counts.ngstnode as i32;
        shape.ngstface = counts.ngstface as i32;
        shape.ngstcell = counts.ngstcell as i32;
        kernel.build_ghost(
            shape,
            &self.bndfcs,
            GhostBuffers {
                fctpn: packed.fctpn.as_mut_slice(),
                cltpn: packed.cltpn.as_mut_slice(),
                clgrp: packed.clgrp.as_mut_slice(),
                fcnds: packed.fcnds.as_mut_slice(),
                fccls: packed.fccls.as_mut_slice(),
                clnds: packed.clnds.as_mut_slice(),
                clfcs: packed.clfcs.as_mut_slice(),
                ndcrd: packed.ndcrd.as_mut_slice(),
                fccnd: packed.fccnd.as_mut_slice(),
                fcnml: packed.fcnml.as_mut_slice(),
                fcara: packed.fcara.as_mut_slice(),
                clcnd: packed.clcnd.as_mut_slice(),
                clvol: packed.clvol.as_mut_slice(),
            },
        )?;

        self.commit(packed);
        self.stage = BuildStage::Ghost;
        info!(
            ngstnode = self.ngstnode(),
            ngstface = self.ngstface(),
            ngstcell = self.ngstcell(),
            kernel = kernel.name(),
            "幽灵实体构建完成"
        );
        Ok(())
    }

    /// 分配共享数组并把内部区拷入高位区
    fn pack_shared(&self, counts: &GhostCounts) -> MeshResult<Packed<S>> {
        let (gnd, gfc, gcl) = (counts.ngstnode, counts.ngstface, counts.ngstcell);
        Ok(Packed {
            ndcrd: self.ndcrd.repack_with_ghost(gnd, S::ZERO)?,
            fctpn: self.fctpn.repack_with_ghost(gfc, -1)?,
            fcnds: self.fcnds.repack_with_ghost(gfc, -1)?,
            fccls: self.fccls.repack_with_ghost(gfc, -1)?,
            fccnd: self.fccnd.repack_with_ghost(gfc, S::ZERO)?,
            fcnml: self.fcnml.repack_with_ghost(gfc, S::ZERO)?,
            fcara: self.fcara.repack_with_ghost(gfc, S::ZERO)?,
            cltpn: self.cltpn.repack_with_ghost(gcl, -1)?,
            clgrp: self.clgrp.repack_with_ghost(gcl, -1)?,
            clnds: self.clnds.repack_with_ghost(gcl, -1)?,
            clfcs: self.clfcs.repack_with_ghost(gcl, -1)?,
            clcnd: self.clcnd.repack_with_ghost(gcl, S::ZERO)?,
            clvol: self.clvol.repack_with_ghost(gcl, S::ZERO)?,
        })
    }

    /// 以共享数组替换原内部数组
    fn commit(&mut self, packed: Packed<S>) {
        self.ndcrd = packed.ndcrd;
        self.fctpn = packed.fctpn;
        self.fcnds = packed.fcnds;
        self.fccls = packed.fccls;
        self.fccnd = packed.fccnd;
        self.fcnml = packed.fcnml;
        self.fcara = packed.fcara;
        self.cltpn = packed.cltpn;
        self.clgrp = packed.clgrp;
        self.clnds = packed.clnds;
        self.clfcs = packed.clfcs;
        self.clcnd = packed.clcnd;
        self.clvol = packed.clvol;
    }
}
