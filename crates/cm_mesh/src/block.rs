// crates/cm_mesh/src/block.rs

//! 非结构网格块
//!
//! 网格块独占全部节点/面/单元数组。每个属性只有一块 [`SharedArray`]：
//! `build_ghost` 之前幽灵区为空，内部区即整个数组；之后幽灵区在前、
//! 内部区在后，内部视图就是共享数组的上半区。
//!
//! # 构建阶段
//!
//! ```text
//! Allocated --build_interior--> Interior --build_boundary--> Boundary --build_ghost--> Ghost
//!                                            (Boundary 阶段可重复 build_boundary)
//! ```
//!
//! 每个网格块只构建一次，不支持重建；需要重建时构造新的网格块。

use std::fmt;

use cm_config::{BcKind, Precision};
use cm_foundation::ScalarOps;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::boundcond::{BcList, BoundaryCondition};
use crate::elemtype::{ElementType, CLMFC, CLMND, FCMND, FCREL};
use crate::error::{MeshError, MeshResult};
use crate::shape::BlockShape;
use crate::shared::SharedArray;

/// 网格块声明的实体数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockSpec {
    /// 空间维度（1..=3）
    pub ndim: usize,
    /// 节点数
    pub nnode: usize,
    /// 面数（`build_interior` 会按推导结果重新分配）
    pub nface: usize,
    /// 单元数
    pub ncell: usize,
    /// 边界面数
    pub nbound: usize,
}

/// 构建阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildStage {
    /// 已分配，等待填充单元
    Allocated,
    /// 内部连接性和度量已就绪
    Interior,
    /// 边界面已分类
    Boundary,
    /// 幽灵实体已构建
    Ghost,
}

impl BuildStage {
    /// 阶段名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Allocated => "allocated",
            Self::Interior => "interior",
            Self::Boundary => "boundary",
            Self::Ghost => "ghost",
        }
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 非结构网格块
#[derive(Debug, Clone)]
pub struct Block<S: ScalarOps = f64> {
    // ===== 元数据 =====
    pub(crate) ndim: usize,
    /// 块序号（多块分解预留）
    pub(crate) blkn: Option<u32>,
    /// 单元分组名称
    pub(crate) grpnames: Vec<String>,
    pub(crate) bclist: BcList,
    /// 边界面记录 `(面索引, 边界条件序号)`
    pub(crate) bndfcs: Vec<[i32; 2]>,
    pub(crate) stage: BuildStage,

    // ===== 节点 =====
    pub(crate) ndcrd: SharedArray<S>,

    // ===== 面 =====
    pub(crate) fctpn: SharedArray<i32>,
    pub(crate) fcnds: SharedArray<i32>,
    pub(crate) fccls: SharedArray<i32>,
    pub(crate) fccnd: SharedArray<S>,
    pub(crate) fcnml: SharedArray<S>,
    pub(crate) fcara: SharedArray<S>,

    // ===== 单元 =====
    pub(crate) cltpn: SharedArray<i32>,
    pub(crate) clgrp: SharedArray<i32>,
    pub(crate) clnds: SharedArray<i32>,
    pub(crate) clfcs: SharedArray<i32>,
    pub(crate) clcnd: SharedArray<S>,
    pub(crate) clvol: SharedArray<S>,
}

impl<S: ScalarOps> Block<S> {
    /// 按声明的实体数分配网格块
    ///
    /// 连接性与类型填充 `-1`，浮点数组填充 0，单元分组填充 `-1`（未分组）。
    pub fn new(spec: BlockSpec) -> MeshResult<Self> {
        if !(1..=3).contains(&spec.ndim) {
            return Err(MeshError::malformed(
                "block",
                0,
                format!("空间维度必须为 1..=3, 实际 {}", spec.ndim),
            ));
        }
        let ndim = spec.ndim;
        Ok(Self {
            ndim,
            blkn: None,
            grpnames: Vec::new(),
            bclist: BcList::new(),
            bndfcs: vec![[-1, -1]; spec.nbound],
            stage: BuildStage::Allocated,
            ndcrd: SharedArray::filled(spec.nnode, ndim, S::ZERO),
            fctpn: SharedArray::filled(spec.nface, 1, -1),
            fcnds: SharedArray::filled(spec.nface, FCMND + 1, -1),
            fccls: SharedArray::filled(spec.nface, FCREL, -1),
            fccnd: SharedArray::filled(spec.nface, ndim, S::ZERO),
            fcnml: SharedArray::filled(spec.nface, ndim, S::ZERO),
            fcara: SharedArray::filled(spec.nface, 1, S::ZERO),
            cltpn: SharedArray::filled(spec.ncell, 1, -1),
            clgrp: SharedArray::filled(spec.ncell, 1, -1),
            clnds: SharedArray::filled(spec.ncell, CLMND + 1, -1),
            clfcs: SharedArray::filled(spec.ncell, CLMFC + 1, -1),
            clcnd: SharedArray::filled(spec.ncell, ndim, S::ZERO),
            clvol: SharedArray::filled(spec.ncell, 1, S::ZERO),
        })
    }

    // =========================================================================
    // 计数（由数组形状导出）
    // =========================================================================

    /// 空间维度
    #[inline]
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// 内部节点数
    #[inline]
    pub fn nnode(&self) -> usize {
        self.ndcrd.n_interior()
    }

    /// 内部面数
    #[inline]
    pub fn nface(&self) -> usize {
        self.fctpn.n_interior()
    }

    /// 内部单元数
    #[inline]
    pub fn ncell(&self) -> usize {
        self.cltpn.n_interior()
    }

    /// 边界面数
    #[inline]
    pub fn nbound(&self) -> usize {
        self.bndfcs.len()
    }

    /// 幽灵节点数
    #[inline]
    pub fn ngstnode(&self) -> usize {
        self.ndcrd.n_ghost()
    }

    /// 幽灵面数
    #[inline]
    pub fn ngstface(&self) -> usize {
        self.fctpn.n_ghost()
    }

    /// 幽灵单元数
    #[inline]
    pub fn ngstcell(&self) -> usize {
        self.cltpn.n_ghost()
    }

    /// 浮点精度
    pub fn precision(&self) -> Precision {
        if S::SIZE_BYTES == 4 {
            Precision::F32
        } else {
            Precision::F64
        }
    }

    /// 当前构建阶段
    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    /// 生成形状描述
    pub fn create_shape(&self) -> BlockShape {
        BlockShape {
            ndim: self.ndim as i32,
            fcmnd: FCMND as i32,
            clmnd: CLMND as i32,
            clmfc: CLMFC as i32,
            nnode: self.nnode() as i32,
            nface: self.nface() as i32,
            ncell: self.ncell() as i32,
            nbound: self.nbound() as i32,
            ngstnode: self.ngstnode() as i32,
            ngstface: self.ngstface() as i32,
            ngstcell: self.ngstcell() as i32,
        }
    }

    // =========================================================================
    // 元数据
    // =========================================================================

    /// 块序号
    pub fn blkn(&self) -> Option<u32> {
        self.blkn
    }

    /// 设置块序号
    pub fn set_blkn(&mut self, blkn: u32) {
        self.blkn = Some(blkn);
    }

    /// 单元分组名称
    pub fn grpnames(&self) -> &[String] {
        &self.grpnames
    }

    /// 登记分组名称，返回分组编号
    pub fn add_group(&mut self, name: impl Into<String>) -> i32 {
        let name = name.into();
        if let Some(pos) = self.grpnames.iter().position(|g| *g == name) {
            return pos as i32;
        }
        self.grpnames.push(name);
        self.grpnames.len() as i32 - 1
    }

    /// 边界条件列表
    pub fn bclist(&self) -> &BcList {
        &self.bclist
    }

    /// 追加边界条件（`build_ghost` 之前），返回序号
    ///
    /// 在 `Boundary` 阶段追加会使已有的边界面分类失效，阶段退回
    /// `Interior`，须重新执行 `build_boundary`。
    pub fn add_boundary_condition(&mut self, bc: BoundaryCondition) -> MeshResult<usize> {
        self.require_stage(
            "add_boundary_condition",
            &[BuildStage::Allocated, BuildStage::Interior, BuildStage::Boundary],
        )?;
        if self.stage == BuildStage::Boundary {
            self.bclist.remove_synthetic();
            self.bndfcs.clear();
            self.stage = BuildStage::Interior;
            debug!(bc = bc.name(), "追加边界条件, 边界面分类需重建");
        }
        Ok(self.bclist.push(bc))
    }

    /// 边界面记录 `(面索引, 边界条件序号)`
    pub fn bndfcs(&self) -> &[[i32; 2]] {
        &self.bndfcs
    }

    /// 第 `ibnd` 个边界面的条件类型
    pub fn boundary_kind(&self, ibnd: usize) -> Option<&BcKind> {
        let sern = self.bndfcs.get(ibnd)?[1];
        if sern < 0 {
            return None;
        }
        self.bclist.get(sern as usize).map(|bc| bc.kind())
    }

    // =========================================================================
    // 数组访问
    // =========================================================================

    /// 节点坐标
    pub fn ndcrd(&self) -> &SharedArray<S> {
        &self.ndcrd
    }

    /// 面类型
    pub fn fctpn(&self) -> &SharedArray<i32> {
        &self.fctpn
    }

    /// 面节点列表
    pub fn fcnds(&self) -> &SharedArray<i32> {
        &self.fcnds
    }

    /// 面-单元关系 `(owner, neighbor, 邻块, 邻块内索引)`
    pub fn fccls(&self) -> &SharedArray<i32> {
        &self.fccls
    }

    /// 面中心
    pub fn fccnd(&self) -> &SharedArray<S> {
        &self.fccnd
    }

    /// 面单位法向
    pub fn fcnml(&self) -> &SharedArray<S> {
        &self.fcnml
    }

    /// 面积
    pub fn fcara(&self) -> &SharedArray<S> {
        &self.fcara
    }

    /// 单元类型
    pub fn cltpn(&self) -> &SharedArray<i32> {
        &self.cltpn
    }

    /// 单元分组
    pub fn clgrp(&self) -> &SharedArray<i32> {
        &self.clgrp
    }

    /// 单元节点列表
    pub fn clnds(&self) -> &SharedArray<i32> {
        &self.clnds
    }

    /// 单元面列表
    pub fn clfcs(&self) -> &SharedArray<i32> {
        &self.clfcs
    }

    /// 单元中心
    pub fn clcnd(&self) -> &SharedArray<S> {
        &self.clcnd
    }

    /// 单元体积
    pub fn clvol(&self) -> &SharedArray<S> {
        &self.clvol
    }

    /// 内部单元 `icl` 的节点
    pub fn cell_nodes(&self, icl: usize) -> &[i32] {
        counted(self.clnds.interior_row(icl))
    }

    /// 内部单元 `icl` 的面
    pub fn cell_faces(&self, icl: usize) -> &[i32] {
        counted(self.clfcs.interior_row(icl))
    }

    /// 内部面 `ifc` 的节点
    pub fn face_nodes(&self, ifc: usize) -> &[i32] {
        counted(self.fcnds.interior_row(ifc))
    }

    /// 按节点集合查找内部面（与节点顺序无关）
    pub fn find_face(&self, nodes: &[i32]) -> Option<usize> {
        let mut key = nodes.to_vec();
        key.sort_unstable();
        (0..self.nface()).find(|&ifc| {
            let mut fnodes = self.face_nodes(ifc).to_vec();
            fnodes.sort_unstable();
            fnodes == key
        })
    }

    // =========================================================================
    // 填充（仅 Allocated 阶段）
    // =========================================================================

    /// 设置节点坐标
    pub fn set_node(&mut self, ind: usize, coords: &[S]) -> MeshResult<()> {
        self.require_stage("set_node", &[BuildStage::Allocated])?;
        if ind >= self.nnode() {
            return Err(MeshError::malformed("node", ind, format!("节点数为 {}", self.nnode())));
        }
        if coords.len() != self.ndim {
            return Err(MeshError::malformed(
                "node",
                ind,
                format!("坐标维度 {} 与网格维度 {} 不符", coords.len(), self.ndim),
            ));
        }
        self.ndcrd.interior_row_mut(ind).copy_from_slice(coords);
        Ok(())
    }

    /// 设置单元类型和节点列表
    pub fn set_cell(&mut self, icl: usize, ty: ElementType, nodes: &[i32]) -> MeshResult<()> {
        self.require_stage("set_cell", &[BuildStage::Allocated])?;
        if icl >= self.ncell() {
            return Err(MeshError::malformed("cell", icl, format!("单元数为 {}", self.ncell())));
        }
        if nodes.len() != ty.nnode() {
            return Err(MeshError::malformed(
                "cell",
                icl,
                format!("{} 需要 {} 个节点, 实际 {}", ty, ty.nnode(), nodes.len()),
            ));
        }
        self.cltpn.interior_mut()[icl] = ty.id();
        let row = self.clnds.interior_row_mut(icl);
        row.fill(-1);
        row[0] = nodes.len() as i32;
        row[1..=nodes.len()].copy_from_slice(nodes);
        Ok(())
    }

    /// 设置单元分组（`-1` 为未分组）
    pub fn set_cell_group(&mut self, icl: usize, group: i32) -> MeshResult<()> {
        self.require_stage("set_cell_group", &[BuildStage::Allocated])?;
        if icl >= self.ncell() {
            return Err(MeshError::malformed("cell", icl, format!("单元数为 {}", self.ncell())));
        }
        self.clgrp.interior_mut()[icl] = group;
        Ok(())
    }

    // =========================================================================
    // 阶段检查
    // =========================================================================

    pub(crate) fn require_stage(
        &self,
        operation: &'static str,
        allowed: &[BuildStage],
    ) -> MeshResult<()> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(MeshError::StageViolation {
                operation,
                stage: self.stage.name(),
            })
        }
    }
}

/// 去掉计数槽和哨兵，只保留有效元素
#[inline]
fn counted(row: &[i32]) -> &[i32] {
    let n = row[0].max(0) as usize;
    &row[1..=n.min(row.len() - 1)]
}

impl<S: ScalarOps> fmt::Display for Block<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Block ({}D): {} nodes, {} faces ({} BC), {} cells]",
            self.ndim,
            self.nnode(),
            self.nface(),
            self.nbound(),
            self.ncell()
        )
    }
}
