// crates/cm_mesh/src/dyn_block.rs

//! 运行时精度分发
//!
//! 应用层通过 `Box<dyn DynBlock>` 使用网格块，无需关心底层浮点类型。
//! [`BlockBuilder`] 按 [`BuildConfig::precision`] 选择 `Block<f32>` 或 `Block<f64>`。
//!
//! ```rust
//! use cm_config::{BuildConfig, Precision};
//! use cm_mesh::{generation, BlockBuilder};
//!
//! let mut config = BuildConfig::default();
//! config.precision = Precision::F32;
//! let block = BlockBuilder::new(config).build(&generation::rectangle_quads(2, 2)).unwrap();
//! assert_eq!(block.precision(), Precision::F32);
//! assert_eq!(block.shape().ngstcell, 8);
//! ```

use std::fmt;

use cm_config::{BuildConfig, Precision};
use cm_foundation::{ScalarOps, ValidationReport};

use crate::block::{Block, BuildStage};
use crate::definition::MeshDefinition;
use crate::error::MeshResult;
use crate::shape::BlockShape;
use crate::statistics::BlockStatistics;

/// 动态网格块（运行时多态）
pub trait DynBlock: Send + Sync + fmt::Display {
    /// 浮点精度
    fn precision(&self) -> Precision;

    /// 构建阶段
    fn stage(&self) -> BuildStage;

    /// 形状描述
    fn shape(&self) -> BlockShape;

    /// 统计信息
    fn statistics(&self) -> BlockStatistics;

    /// 一致性检查
    fn validate(&self) -> ValidationReport;

    /// 边界条件摘要：(名称, 类型名, 面数)
    fn boundary_summary(&self) -> Vec<(String, String, usize)>;

    /// 节点坐标（含幽灵区，统一为 f64）
    fn export_coords(&self) -> Vec<f64>;
}

impl<S: ScalarOps> DynBlock for Block<S> {
    fn precision(&self) -> Precision {
        Block::precision(self)
    }

    fn stage(&self) -> BuildStage {
        Block::stage(self)
    }

    fn shape(&self) -> BlockShape {
        self.create_shape()
    }

    fn statistics(&self) -> BlockStatistics {
        Block::statistics(self)
    }

    fn validate(&self) -> ValidationReport {
        Block::validate(self)
    }

    fn boundary_summary(&self) -> Vec<(String, String, usize)> {
        self.bclist()
            .iter()
            .map(|bc| (bc.name().to_string(), bc.kind().name().to_string(), bc.len()))
            .collect()
    }

    fn export_coords(&self) -> Vec<f64> {
        cm_foundation::scalar::convert::slice_to_f64(self.ndcrd().as_slice())
    }
}

/// 网格块构建器
#[derive(Debug, Clone, Default)]
pub struct BlockBuilder {
    config: BuildConfig,
}

impl BlockBuilder {
    /// 以构建配置创建
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// 覆盖精度
    pub fn precision(mut self, precision: Precision) -> Self {
        self.config.precision = precision;
        self
    }

    /// 构建配置
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// 按配置的精度构建网格块
    pub fn build(&self, def: &MeshDefinition) -> MeshResult<Box<dyn DynBlock>> {
        match self.config.precision {
            Precision::F32 => self.build_f32(def),
            Precision::F64 => self.build_f64(def),
        }
    }

    fn build_f32(&self, def: &MeshDefinition) -> MeshResult<Box<dyn DynBlock>> {
        Ok(Box::new(def.build::<f32>(&self.config)?))
    }

    fn build_f64(&self, def: &MeshDefinition) -> MeshResult<Box<dyn DynBlock>> {
        Ok(Box::new(def.build::<f64>(&self.config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation;

    #[test]
    fn test_dispatch_by_precision() {
        let def = generation::rectangle_quads(1, 1);
        for precision in [Precision::F32, Precision::F64] {
            let block = BlockBuilder::default().precision(precision).build(&def).unwrap();
            assert_eq!(block.precision(), precision);
            assert_eq!(block.stage(), BuildStage::Ghost);
            assert_eq!(block.shape().ngstcell, 4);
            assert!((block.statistics().total_volume - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ghost_disabled() {
        let mut config = BuildConfig::default();
        config.ghost.enabled = false;
        let block = BlockBuilder::new(config)
            .build(&generation::rectangle_quads(2, 1))
            .unwrap();
        assert_eq!(block.stage(), BuildStage::Boundary);
        assert_eq!(block.shape().ngstcell, 0);
        assert_eq!(block.boundary_summary().len(), 4);
    }

    #[test]
    fn test_export_coords_includes_ghost() {
        let block = BlockBuilder::default()
            .build(&generation::rectangle_quads(1, 1))
            .unwrap();
        let shape = block.shape();
        assert_eq!(
            block.export_coords().len(),
            (shape.ngstnode + shape.nnode) as usize * 2
        );
    }
}
