// crates/cm_mesh/src/shape.rs

//! 网格块形状描述
//!
//! 定长记录，按值传给数值核函数，约定各缓冲区的行数与行宽。
//! 字段顺序固定，`#[repr(C)]` 布局可直接按字节交给外部例程。

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::elemtype::FCREL;

/// 网格块形状
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct BlockShape {
    /// 空间维度
    pub ndim: i32,
    /// 面最大节点数
    pub fcmnd: i32,
    /// 单元最大节点数
    pub clmnd: i32,
    /// 单元最大面数
    pub clmfc: i32,
    /// 内部节点数
    pub nnode: i32,
    /// 内部面数
    pub nface: i32,
    /// 内部单元数
    pub ncell: i32,
    /// 边界面数
    pub nbound: i32,
    /// 幽灵节点数
    pub ngstnode: i32,
    /// 幽灵面数
    pub ngstface: i32,
    /// 幽灵单元数
    pub ngstcell: i32,
}

impl BlockShape {
    /// 按字节查看（外部例程的二进制接口）
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// 空间维度
    #[inline]
    pub fn ndim(&self) -> usize {
        self.ndim as usize
    }

    /// 面节点列表行宽（计数槽 + FCMND）
    #[inline]
    pub fn fcnds_stride(&self) -> usize {
        self.fcmnd as usize + 1
    }

    /// 单元节点列表行宽
    #[inline]
    pub fn clnds_stride(&self) -> usize {
        self.clmnd as usize + 1
    }

    /// 单元面列表行宽
    #[inline]
    pub fn clfcs_stride(&self) -> usize {
        self.clmfc as usize + 1
    }

    /// 面-单元关系行宽
    #[inline]
    pub fn fccls_stride(&self) -> usize {
        FCREL
    }

    /// 节点总数（幽灵 + 内部）
    #[inline]
    pub fn total_nodes(&self) -> usize {
        (self.ngstnode + self.nnode) as usize
    }

    /// 面总数（幽灵 + 内部）
    #[inline]
    pub fn total_faces(&self) -> usize {
        (self.ngstface + self.nface) as usize
    }

    /// 单元总数（幽灵 + 内部）
    #[inline]
    pub fn total_cells(&self) -> usize {
        (self.ngstcell + self.ncell) as usize
    }
}
