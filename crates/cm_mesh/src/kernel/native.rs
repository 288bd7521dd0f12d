// crates/cm_mesh/src/kernel/native.rs

//! 纯 Rust 核函数实现

use cm_foundation::ScalarOps;

use super::{faces, ghost, metric, FaceBuffers, GhostBuffers, MeshKernel, MetricBuffers};
use crate::error::MeshResult;
use crate::shape::BlockShape;

/// 默认核函数（单线程、f64 中间精度）
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeKernel;

impl MeshKernel for NativeKernel {
    fn name(&self) -> &'static str {
        "native"
    }

    fn faces_from_cells(
        &self,
        shape: BlockShape,
        cltpn: &[i32],
        clnds: &[i32],
        max_nface: usize,
        out: FaceBuffers<'_>,
    ) -> MeshResult<usize> {
        out.check(&shape, max_nface)?;
        faces::faces_from_cells(shape, cltpn, clnds, max_nface, out)
    }

    fn calc_metric<S: ScalarOps>(
        &self,
        shape: BlockShape,
        buffers: MetricBuffers<'_, S>,
    ) -> MeshResult<()> {
        buffers.check(&shape)?;
        metric::calc_metric(shape, buffers)
    }

    fn build_ghost<S: ScalarOps>(
        &self,
        shape: BlockShape,
        bndfcs: &[[i32; 2]],
        buffers: GhostBuffers<'_, S>,
    ) -> MeshResult<()> {
        buffers.check(&shape, bndfcs)?;
        ghost::build_ghost(shape, bndfcs, buffers)
    }
}
