// crates/cm_mesh/src/elemtype.rs

//! 单元类型表
//!
//! 8 种拓扑单元（点、线、四边形、三角形、六面体、四面体、三棱柱、金字塔）
//! 的静态元数据：空间维度、节点数、棱数、面数。
//!
//! 表中数据决定了网格块所有定宽连接性数组的列数：
//!
//! | 常量 | 含义 | 取值 |
//! |------|------|------|
//! | [`FCMND`] | 面最大节点数（维度 < 3 的单元） | 4 |
//! | [`CLMND`] | 单元最大节点数 | 8 |
//! | [`CLMFC`] | 单元最大面数（2D 取棱数，3D 取面数） | 6 |
//!
//! 三个常量由 [`ELEMENT_TABLE`] 在编译期推导，表变化时自动更新。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 单元类型元数据（表中一行）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementInfo {
    /// 序号（即类型编号）
    pub id: i32,
    /// 拓扑维度
    pub dim: usize,
    /// 节点数
    pub nnode: usize,
    /// 棱数
    pub nedge: usize,
    /// 面数
    pub nface: usize,
    /// 名称
    pub name: &'static str,
}

/// 单元类型表
pub const ELEMENT_TABLE: [ElementInfo; 8] = [
    ElementInfo { id: 0, dim: 0, nnode: 1, nedge: 0, nface: 0, name: "point" },
    ElementInfo { id: 1, dim: 1, nnode: 2, nedge: 0, nface: 0, name: "line" },
    ElementInfo { id: 2, dim: 2, nnode: 4, nedge: 4, nface: 0, name: "quad" },
    ElementInfo { id: 3, dim: 2, nnode: 3, nedge: 3, nface: 0, name: "triangle" },
    ElementInfo { id: 4, dim: 3, nnode: 8, nedge: 12, nface: 6, name: "hexahedron" },
    ElementInfo { id: 5, dim: 3, nnode: 4, nedge: 6, nface: 4, name: "tetrahedron" },
    ElementInfo { id: 6, dim: 3, nnode: 6, nedge: 9, nface: 5, name: "prism" },
    ElementInfo { id: 7, dim: 3, nnode: 5, nedge: 8, nface: 5, name: "pyramid" },
];

const fn max_face_nodes() -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < ELEMENT_TABLE.len() {
        let row = &ELEMENT_TABLE[i];
        if row.dim < 3 && row.nnode > max {
            max = row.nnode;
        }
        i += 1;
    }
    max
}

const fn max_cell_nodes() -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < ELEMENT_TABLE.len() {
        if ELEMENT_TABLE[i].nnode > max {
            max = ELEMENT_TABLE[i].nnode;
        }
        i += 1;
    }
    max
}

const fn max_cell_faces() -> usize {
    let mut max2 = 0;
    let mut max3 = 0;
    let mut i = 0;
    while i < ELEMENT_TABLE.len() {
        let row = &ELEMENT_TABLE[i];
        if row.dim == 2 && row.nedge > max2 {
            max2 = row.nedge;
        }
        if row.dim == 3 && row.nface > max3 {
            max3 = row.nface;
        }
        i += 1;
    }
    if max2 > max3 { max2 } else { max3 }
}

/// 面最大节点数
pub const FCMND: usize = max_face_nodes();
/// 单元最大节点数
pub const CLMND: usize = max_cell_nodes();
/// 单元最大面数
pub const CLMFC: usize = max_cell_faces();
/// 面-单元关系列数：owner, neighbor, 邻块编号, 邻块内单元索引
pub const FCREL: usize = 4;

/// 拓扑单元类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum ElementType {
    /// 点
    Point = 0,
    /// 线段
    Line = 1,
    /// 四边形
    #[serde(alias = "quadrilateral")]
    Quad = 2,
    /// 三角形
    #[serde(alias = "tri")]
    Triangle = 3,
    /// 六面体
    #[serde(alias = "hex", alias = "brick")]
    Hexahedron = 4,
    /// 四面体
    #[serde(alias = "tet")]
    Tetrahedron = 5,
    /// 三棱柱
    #[serde(alias = "wedge")]
    Prism = 6,
    /// 金字塔
    Pyramid = 7,
}

impl ElementType {
    /// 全部类型（按编号排序）
    pub const ALL: [ElementType; 8] = [
        Self::Point,
        Self::Line,
        Self::Quad,
        Self::Triangle,
        Self::Hexahedron,
        Self::Tetrahedron,
        Self::Prism,
        Self::Pyramid,
    ];

    /// 由类型编号查表
    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// 类型编号
    #[inline]
    pub fn id(self) -> i32 {
        self as i32
    }

    /// 表中对应行
    #[inline]
    pub fn info(self) -> &'static ElementInfo {
        &ELEMENT_TABLE[self as usize]
    }

    /// 拓扑维度
    #[inline]
    pub fn dim(self) -> usize {
        self.info().dim
    }

    /// 节点数
    #[inline]
    pub fn nnode(self) -> usize {
        self.info().nnode
    }

    /// 作为单元时的面数
    ///
    /// 1D 单元的面是端点（取节点数），2D 单元的面是棱（取棱数），
    /// 3D 单元取面数。
    pub fn cell_face_count(self) -> usize {
        let info = self.info();
        match info.dim {
            0 => 0,
            1 => info.nnode,
            2 => info.nedge,
            _ => info.nface,
        }
    }

    /// 名称
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// 局部面定义：`(面类型, 局部节点序号)`
    ///
    /// 节点顺序使 2D 逆时针单元、3D 右手单元的面法向朝外。
    pub fn local_faces(self) -> &'static [LocalFace] {
        match self {
            Self::Point => &[],
            Self::Line => &LINE_FACES,
            Self::Quad => &QUAD_FACES,
            Self::Triangle => &TRIANGLE_FACES,
            Self::Hexahedron => &HEXAHEDRON_FACES,
            Self::Tetrahedron => &TETRAHEDRON_FACES,
            Self::Prism => &PRISM_FACES,
            Self::Pyramid => &PYRAMID_FACES,
        }
    }
}

/// 局部面：面类型及其在单元节点列表中的局部序号
pub type LocalFace = (ElementType, &'static [usize]);

const LINE_FACES: [LocalFace; 2] = [(ElementType::Point, &[0]), (ElementType::Point, &[1])];

const QUAD_FACES: [LocalFace; 4] = [
    (ElementType::Line, &[0, 1]),
    (ElementType::Line, &[1, 2]),
    (ElementType::Line, &[2, 3]),
    (ElementType::Line, &[3, 0]),
];

const TRIANGLE_FACES: [LocalFace; 3] = [
    (ElementType::Line, &[0, 1]),
    (ElementType::Line, &[1, 2]),
    (ElementType::Line, &[2, 0]),
];

const HEXAHEDRON_FACES: [LocalFace; 6] = [
    (ElementType::Quad, &[0, 3, 2, 1]),
    (ElementType::Quad, &[1, 2, 6, 5]),
    (ElementType::Quad, &[4, 5, 6, 7]),
    (ElementType::Quad, &[0, 4, 7, 3]),
    (ElementType::Quad, &[0, 1, 5, 4]),
    (ElementType::Quad, &[2, 3, 7, 6]),
];

const TETRAHEDRON_FACES: [LocalFace; 4] = [
    (ElementType::Triangle, &[0, 2, 1]),
    (ElementType::Triangle, &[0, 1, 3]),
    (ElementType::Triangle, &[1, 2, 3]),
    (ElementType::Triangle, &[0, 3, 2]),
];

const PRISM_FACES: [LocalFace; 5] = [
    (ElementType::Triangle, &[0, 2, 1]),
    (ElementType::Triangle, &[3, 4, 5]),
    (ElementType::Quad, &[0, 1, 4, 3]),
    (ElementType::Quad, &[1, 2, 5, 4]),
    (ElementType::Quad, &[0, 3, 5, 2]),
];

const PYRAMID_FACES: [LocalFace; 5] = [
    (ElementType::Quad, &[0, 3, 2, 1]),
    (ElementType::Triangle, &[0, 1, 4]),
    (ElementType::Triangle, &[1, 2, 4]),
    (ElementType::Triangle, &[2, 3, 4]),
    (ElementType::Triangle, &[3, 0, 4]),
];

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<i32> for ElementType {
    type Error = i32;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_constants() {
        assert_eq!(FCMND, 4);
        assert_eq!(CLMND, 8);
        assert_eq!(CLMFC, 6);
    }

    #[test]
    fn test_ids_match_rows() {
        for (i, ty) in ElementType::ALL.iter().enumerate() {
            assert_eq!(ty.id() as usize, i);
            assert_eq!(ty.info().id as usize, i);
        }
        assert_eq!(ElementType::from_id(8), None);
        assert_eq!(ElementType::from_id(-1), None);
    }

    #[test]
    fn test_cell_face_count() {
        assert_eq!(ElementType::Line.cell_face_count(), 2);
        assert_eq!(ElementType::Quad.cell_face_count(), 4);
        assert_eq!(ElementType::Triangle.cell_face_count(), 3);
        assert_eq!(ElementType::Hexahedron.cell_face_count(), 6);
        assert_eq!(ElementType::Prism.cell_face_count(), 5);
    }

    #[test]
    fn test_solid_rows_satisfy_euler() {
        // V - E + F = 2
        for ty in ElementType::ALL.iter().filter(|ty| ty.dim() == 3) {
            let info = ty.info();
            assert_eq!(info.nnode + info.nface, info.nedge + 2, "{}", info.name);
        }
        assert_eq!(ElementType::Hexahedron.info().nedge, 12);
        assert_eq!(ElementType::Tetrahedron.info().nedge, 6);
    }

    #[test]
    fn test_local_faces_consistent_with_table() {
        for ty in ElementType::ALL {
            let faces = ty.local_faces();
            assert_eq!(faces.len(), ty.cell_face_count(), "{}", ty);
            for (fty, nodes) in faces {
                assert_eq!(fty.nnode(), nodes.len());
                assert_eq!(fty.dim() + 1, ty.dim());
                assert!(nodes.iter().all(|&n| n < ty.nnode()));
            }
        }
    }

    #[test]
    fn test_serde_aliases() {
        let ty: ElementType = serde_json::from_str("\"hex\"").unwrap();
        assert_eq!(ty, ElementType::Hexahedron);
        let ty: ElementType = serde_json::from_str("\"triangle\"").unwrap();
        assert_eq!(ty, ElementType::Triangle);
    }
}
