// crates/cm_config/src/lib.rs

//! CeseMesh Config Layer (Layer 2)
//!
//! 配置层，提供精度选择和网格构建配置。
//!
//! # 模块概览
//!
//! - [`precision`]: Precision 枚举（F32/F64）
//! - [`build_config`]: BuildConfig 构建配置树
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: cm_cli        ─> uses BuildConfig, DynBlock
//! Layer 3: cm_mesh       ─> Block<S>, BcList, MeshKernel
//! Layer 2: cm_config     ─> Precision, BuildConfig (本层)
//! Layer 1: cm_foundation
//! ```
//!
//! # 设计原则
//!
//! 1. **无泛型**: 本层所有类型都不包含泛型参数
//! 2. **组合默认值**: 每一层通过 `#[serde(default)]` 合并默认值
//! 3. **运行时分发**: 通过 Precision 枚举选择 f32/f64

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod build_config;
pub mod error;
pub mod precision;

/// 层级标识
pub const LAYER: u8 = 2;

// 重导出核心类型
pub use build_config::{BcKind, BoundaryConfig, BuildConfig, GhostConfig};
pub use error::ConfigError;
pub use precision::Precision;
