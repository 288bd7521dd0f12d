// crates/cm_mesh/src/kernel/mod.rs

//! 数值核函数接口
//!
//! 网格块把浮点计算和底层连接性推导委托给核函数。三个例程都是
//! 纯输出参数填充器：输入 [`BlockShape`]（按值）和若干连续缓冲区，
//! 原地写入输出缓冲区。缓冲区布局即二进制接口：
//!
//! - 行主序，每个实体定宽一行；
//! - 变长列表第 0 槽为计数，未用槽为哨兵 `-1`；
//! - 共享数组中的连接性值为相对索引（幽灵实体为负）。
//!
//! 网格块在调用前按形状核对每个缓冲区长度，违规即返回
//! [`MeshError::KernelContract`]。

mod faces;
mod geom;
mod ghost;
mod metric;
mod native;

pub use native::NativeKernel;

use cm_foundation::ScalarOps;

use crate::error::{MeshError, MeshResult};
use crate::shape::BlockShape;

/// 面推导例程的输出缓冲区
pub struct FaceBuffers<'a> {
    /// 单元面列表，`ncell × (CLMFC+1)`
    pub clfcs: &'a mut [i32],
    /// 面类型，`max_nface`
    pub fctpn: &'a mut [i32],
    /// 面节点列表，`max_nface × (FCMND+1)`
    pub fcnds: &'a mut [i32],
    /// 面-单元关系，`max_nface × FCREL`
    pub fccls: &'a mut [i32],
}

impl FaceBuffers<'_> {
    /// 核对缓冲区长度
    pub fn check(&self, shape: &BlockShape, max_nface: usize) -> MeshResult<()> {
        const ROUTINE: &str = "faces_from_cells";
        MeshError::check_buffer(
            ROUTINE,
            "clfcs",
            shape.ncell as usize * shape.clfcs_stride(),
            self.clfcs.len(),
        )?;
        MeshError::check_buffer(ROUTINE, "fctpn", max_nface, self.fctpn.len())?;
        MeshError::check_buffer(
            ROUTINE,
            "fcnds",
            max_nface * shape.fcnds_stride(),
            self.fcnds.len(),
        )?;
        MeshError::check_buffer(
            ROUTINE,
            "fccls",
            max_nface * shape.fccls_stride(),
            self.fccls.len(),
        )
    }
}

/// 度量例程的缓冲区
pub struct MetricBuffers<'a, S> {
    /// 节点坐标（输入）
    pub ndcrd: &'a [S],
    /// 面-单元关系（输入）
    pub fccls: &'a [i32],
    /// 单元节点列表（输入）
    pub clnds: &'a [i32],
    /// 单元面列表（输入）
    pub clfcs: &'a [i32],
    /// 面节点列表（输入/输出：法向翻转时节点逆序）
    pub fcnds: &'a mut [i32],
    /// 面中心
    pub fccnd: &'a mut [S],
    /// 面单位法向
    pub fcnml: &'a mut [S],
    /// 面积
    pub fcara: &'a mut [S],
    /// 单元中心
    pub clcnd: &'a mut [S],
    /// 单元体积
    pub clvol: &'a mut [S],
}

impl<S> MetricBuffers<'_, S> {
    /// 核对缓冲区长度（仅内部区）
    pub fn check(&self, shape: &BlockShape) -> MeshResult<()> {
        const ROUTINE: &str = "calc_metric";
        let ndim = shape.ndim();
        let nnode = shape.nnode as usize;
        let nface = shape.nface as usize;
        let ncell = shape.ncell as usize;
        MeshError::check_buffer(ROUTINE, "ndcrd", nnode * ndim, self.ndcrd.len())?;
        MeshError::check_buffer(ROUTINE, "fccls", nface * shape.fccls_stride(), self.fccls.len())?;
        MeshError::check_buffer(ROUTINE, "clnds", ncell * shape.clnds_stride(), self.clnds.len())?;
        MeshError::check_buffer(ROUTINE, "clfcs", ncell * shape.clfcs_stride(), self.clfcs.len())?;
        MeshError::check_buffer(ROUTINE, "fcnds", nface * shape.fcnds_stride(), self.fcnds.len())?;
        MeshError::check_buffer(ROUTINE, "fccnd", nface * ndim, self.fccnd.len())?;
        MeshError::check_buffer(ROUTINE, "fcnml", nface * ndim, self.fcnml.len())?;
        MeshError::check_buffer(ROUTINE, "fcara", nface, self.fcara.len())?;
        MeshError::check_buffer(ROUTINE, "clcnd", ncell * ndim, self.clcnd.len())?;
        MeshError::check_buffer(ROUTINE, "clvol", ncell, self.clvol.len())
    }
}

/// 幽灵构建例程的共享缓冲区（幽灵区 + 内部区）
pub struct GhostBuffers<'a, S> {
    /// 面类型
    pub fctpn: &'a mut [i32],
    /// 单元类型
    pub cltpn: &'a mut [i32],
    /// 单元分组
    pub clgrp: &'a mut [i32],
    /// 面节点列表
    pub fcnds: &'a mut [i32],
    /// 面-单元关系
    pub fccls: &'a mut [i32],
    /// 单元节点列表
    pub clnds: &'a mut [i32],
    /// 单元面列表
    pub clfcs: &'a mut [i32],
    /// 节点坐标
    pub ndcrd: &'a mut [S],
    /// 面中心
    pub fccnd: &'a mut [S],
    /// 面单位法向
    pub fcnml: &'a mut [S],
    /// 面积
    pub fcara: &'a mut [S],
    /// 单元中心
    pub clcnd: &'a mut [S],
    /// 单元体积
    pub clvol: &'a mut [S],
}

impl<S> GhostBuffers<'_, S> {
    /// 核对共享缓冲区长度
    pub fn check(&self, shape: &BlockShape, bndfcs: &[[i32; 2]]) -> MeshResult<()> {
        const ROUTINE: &str = "build_ghost";
        let ndim = shape.ndim();
        let nnd = shape.total_nodes();
        let nfc = shape.total_faces();
        let ncl = shape.total_cells();
        MeshError::check_buffer(ROUTINE, "bndfcs", shape.nbound as usize, bndfcs.len())?;
        MeshError::check_buffer(ROUTINE, "shfctpn", nfc, self.fctpn.len())?;
        MeshError::check_buffer(ROUTINE, "shcltpn", ncl, self.cltpn.len())?;
        MeshError::check_buffer(ROUTINE, "shclgrp", ncl, self.clgrp.len())?;
        MeshError::check_buffer(ROUTINE, "shfcnds", nfc * shape.fcnds_stride(), self.fcnds.len())?;
        MeshError::check_buffer(ROUTINE, "shfccls", nfc * shape.fccls_stride(), self.fccls.len())?;
        MeshError::check_buffer(ROUTINE, "shclnds", ncl * shape.clnds_stride(), self.clnds.len())?;
        MeshError::check_buffer(ROUTINE, "shclfcs", ncl * shape.clfcs_stride(), self.clfcs.len())?;
        MeshError::check_buffer(ROUTINE, "shndcrd", nnd * ndim, self.ndcrd.len())?;
        MeshError::check_buffer(ROUTINE, "shfccnd", nfc * ndim, self.fccnd.len())?;
        MeshError::check_buffer(ROUTINE, "shfcnml", nfc * ndim, self.fcnml.len())?;
        MeshError::check_buffer(ROUTINE, "shfcara", nfc, self.fcara.len())?;
        MeshError::check_buffer(ROUTINE, "shclcnd", ncl * ndim, self.clcnd.len())?;
        MeshError::check_buffer(ROUTINE, "shclvol", ncl, self.clvol.len())
    }
}

/// 数值核函数
///
/// 三个例程分别对应内部连接性推导、度量计算和幽灵实体填充。
pub trait MeshKernel {
    /// 核函数名称（用于日志）
    fn name(&self) -> &'static str;

    /// 由单元节点列表推导面，返回实际面数（不超过 `max_nface`）
    ///
    /// 输出缓冲区按 `max_nface` 行分配并预填 `-1`。
    fn faces_from_cells(
        &self,
        shape: BlockShape,
        cltpn: &[i32],
        clnds: &[i32],
        max_nface: usize,
        out: FaceBuffers<'_>,
    ) -> MeshResult<usize>;

    /// 计算面中心/法向/面积和单元中心/体积
    fn calc_metric<S: ScalarOps>(
        &self,
        shape: BlockShape,
        buffers: MetricBuffers<'_, S>,
    ) -> MeshResult<()>;

    /// 填充共享数组的幽灵区
    fn build_ghost<S: ScalarOps>(
        &self,
        shape: BlockShape,
        bndfcs: &[[i32; 2]],
        buffers: GhostBuffers<'_, S>,
    ) -> MeshResult<()>;
}
