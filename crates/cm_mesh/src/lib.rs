// crates/cm_mesh/src/lib.rs

//! CeseMesh 网格模块 (Layer 3)
//!
//! 面向有限体积/CESE 求解器的非结构网格块：节点、面、单元及其连接性，
//! 以及由连接性导出的几何度量。
//!
//! # 核心类型
//!
//! - [`Block`]: 网格块，独占全部实体数组，提供三个构建阶段
//! - [`SharedArray`]: 幽灵区在前、内部区在后的共享数组
//! - [`BlockShape`]: 传给数值核函数的形状描述
//! - [`BcList`]: 有序边界条件列表
//! - [`MeshKernel`]: 数值核函数接口，[`NativeKernel`] 为默认实现
//!
//! # 构建流程
//!
//! ```text
//! 单元类型表 → Block::new (分配)
//!            → build_interior (推导面 + 度量)
//!            → build_boundary (边界面分类)
//!            → build_ghost    (幽灵实体 + 共享数组打包)
//! ```
//!
//! # 示例
//!
//! ```rust
//! use cm_mesh::{Block, BlockSpec, ElementType};
//!
//! let mut block: Block = Block::new(BlockSpec {
//!     ndim: 2,
//!     nnode: 4,
//!     nface: 4,
//!     ncell: 1,
//!     nbound: 4,
//! })
//! .unwrap();
//! for (i, p) in [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]].iter().enumerate() {
//!     block.set_node(i, p).unwrap();
//! }
//! block.set_cell(0, ElementType::Quad, &[0, 1, 2, 3]).unwrap();
//!
//! block.build_interior().unwrap();
//! block.build_boundary().unwrap();
//! block.build_ghost().unwrap();
//!
//! assert_eq!(block.ngstcell(), 4);
//! assert_eq!(block.to_string(), "[Block (2D): 4 nodes, 4 faces (4 BC), 1 cells]");
//! ```

pub mod block;
pub mod boundcond;
pub mod definition;
pub mod dyn_block;
pub mod elemtype;
pub mod error;
pub mod generation;
pub mod kernel;
pub mod shape;
pub mod shared;
pub mod statistics;

mod boundary;
mod ghost;
mod interior;
mod validate;

pub use block::{Block, BlockSpec, BuildStage};
pub use boundcond::{BcList, BoundaryCondition};
pub use definition::{BoundaryDefinition, CellDefinition, MeshDefinition};
pub use dyn_block::{BlockBuilder, DynBlock};
pub use elemtype::{ElementInfo, ElementType, CLMFC, CLMND, ELEMENT_TABLE, FCMND, FCREL};
pub use error::{MeshError, MeshResult};
pub use ghost::{GhostCounts, GhostTally};
pub use kernel::{MeshKernel, NativeKernel};
pub use shape::BlockShape;
pub use shared::SharedArray;
pub use statistics::BlockStatistics;
