// crates/cm_mesh/src/interior.rs

//! 内部连接性推导
//!
//! 由单元节点列表推导全部面，再计算度量。面数上界按单元类型表计算：
//! 1D 单元取节点数（端点即面），2D 单元取棱数，3D 单元取面数。
//! 推导出的面数与声明不同不是错误，面相关数组按实际面数重新分配。

use cm_foundation::ScalarOps;
use tracing::{debug, info};

use crate::block::{Block, BuildStage};
use crate::elemtype::ElementType;
use crate::error::{MeshError, MeshResult};
use crate::kernel::{FaceBuffers, MeshKernel, MetricBuffers, NativeKernel};

impl<S: ScalarOps> Block<S> {
    /// 面数上界
    pub fn max_face_count(&self) -> MeshResult<usize> {
        self.cltpn
            .interior()
            .iter()
            .enumerate()
            .map(|(icl, &id)| {
                ElementType::from_id(id)
                    .map(ElementType::cell_face_count)
                    .ok_or_else(|| MeshError::invalid_element_type("cell", icl, id))
            })
            .sum()
    }

    /// 构建内部连接性和度量（默认核函数）
    pub fn build_interior(&mut self) -> MeshResult<()> {
        self.build_interior_with(&NativeKernel)
    }

    /// 构建内部连接性和度量
    pub fn build_interior_with<K: MeshKernel>(&mut self, kernel: &K) -> MeshResult<()> {
        self.require_stage("build_interior", &[BuildStage::Allocated])?;
        self.check_cells()?;

        let max_nface = self.max_face_count()?;
        debug!(ncell = self.ncell(), max_nface, kernel = kernel.name(), "面数上界");

        let shape = self.create_shape();
        let mut clfcs = vec![-1; self.clfcs.interior().len()];
        let mut fctpn = vec![-1; max_nface];
        let mut fcnds = vec![-1; max_nface * shape.fcnds_stride()];
        let mut fccls = vec![-1; max_nface * shape.fccls_stride()];
        let nface = kernel.faces_from_cells(
            shape,
            self.cltpn.interior(),
            self.clnds.interior(),
            max_nface,
            FaceBuffers {
                clfcs: &mut clfcs,
                fctpn: &mut fctpn,
                fcnds: &mut fcnds,
                fccls: &mut fccls,
            },
        )?;
        if nface > max_nface {
            return Err(MeshError::kernel_contract(
                "faces_from_cells",
                "nface",
                max_nface,
                nface,
            ));
        }

        if nface != self.nface() {
            debug!(declared = self.nface(), derived = nface, "重新分配面数组");
        }
        self.fctpn.reset_rows(nface, -1);
        self.fcnds.reset_rows(nface, -1);
        self.fccls.reset_rows(nface, -1);
        self.fccnd.reset_rows(nface, S::ZERO);
        self.fcnml.reset_rows(nface, S::ZERO);
        self.fcara.reset_rows(nface, S::ZERO);

        let fcs = self.fcnds.stride();
        let rel = self.fccls.stride();
        self.fctpn.interior_mut().copy_from_slice(&fctpn[..nface]);
        self.fcnds.interior_mut().copy_from_slice(&fcnds[..nface * fcs]);
        self.fccls.interior_mut().copy_from_slice(&fccls[..nface * rel]);
        self.clfcs.interior_mut().copy_from_slice(&clfcs);

        self.run_metric(kernel)?;
        self.stage = BuildStage::Interior;
        info!(
            nnode = self.nnode(),
            nface = self.nface(),
            ncell = self.ncell(),
            "内部连接性构建完成"
        );
        Ok(())
    }

    /// 重新计算度量（默认核函数）
    pub fn calc_metric(&mut self) -> MeshResult<()> {
        self.calc_metric_with(&NativeKernel)
    }

    /// 重新计算内部实体的度量
    ///
    /// 幽灵区的度量由 `build_ghost` 镜像得到，因此只能在其之前调用。
    pub fn calc_metric_with<K: MeshKernel>(&mut self, kernel: &K) -> MeshResult<()> {
        self.require_stage("calc_metric", &[BuildStage::Interior, BuildStage::Boundary])?;
        self.run_metric(kernel)
    }

    fn run_metric<K: MeshKernel>(&mut self, kernel: &K) -> MeshResult<()> {
        let shape = self.create_shape();
        kernel.calc_metric(
            shape,
            MetricBuffers {
                ndcrd: self.ndcrd.interior(),
                fccls: self.fccls.interior(),
                clnds: self.clnds.interior(),
                clfcs: self.clfcs.interior(),
                fcnds: self.fcnds.interior_mut(),
                fccnd: self.fccnd.interior_mut(),
                fcnml: self.fcnml.interior_mut(),
                fcara: self.fcara.interior_mut(),
                clcnd: self.clcnd.interior_mut(),
                clvol: self.clvol.interior_mut(),
            },
        )
    }

    /// 检查单元类型、维度和节点列表
    fn check_cells(&self) -> MeshResult<()> {
        let nnode = self.nnode() as i32;
        for icl in 0..self.ncell() {
            let id = self.cltpn.interior()[icl];
            let ty = ElementType::from_id(id)
                .ok_or_else(|| MeshError::invalid_element_type("cell", icl, id))?;
            if ty.dim() != self.ndim {
                return Err(MeshError::malformed(
                    "cell",
                    icl,
                    format!("{} 为 {}D 单元, 网格为 {}D", ty, ty.dim(), self.ndim),
                ));
            }
            let row = self.clnds.interior_row(icl);
            if row[0] != ty.nnode() as i32 {
                return Err(MeshError::malformed(
                    "cell",
                    icl,
                    format!("计数槽 {} 与 {} 的节点数 {} 不符", row[0], ty, ty.nnode()),
                ));
            }
            let (used, unused) = row[1..].split_at(ty.nnode());
            if let Some(&bad) = used.iter().find(|&&ind| ind < 0 || ind >= nnode) {
                return Err(MeshError::malformed(
                    "cell",
                    icl,
                    format!("节点索引 {} 超出 [0, {})", bad, nnode),
                ));
            }
            if unused.iter().any(|&ind| ind != -1) {
                return Err(MeshError::malformed("cell", icl, "未用槽必须为 -1"));
            }
        }
        Ok(())
    }
}
