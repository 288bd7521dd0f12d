// crates/cm_mesh/src/kernel/ghost.rs

//! 幽灵实体填充
//!
//! 对第 k 个边界面（`bndfcs` 顺序），幽灵单元的相对索引为 `-(k+1)`，
//! 它是 owner 单元关于该边界面的镜像：
//!
//! - 边界面上的节点共用，其余节点镜像为新的幽灵节点；
//! - 边界面本身共用，其 neighbor 指向幽灵单元；其余面镜像为新的幽灵面，
//!   节点逆序（镜像改变手性，逆序后法向仍背离幽灵单元）；
//! - 幽灵节点/面按构造顺序编号 `-(i+1)`，因此落在共享数组的逆序位置。

use cm_foundation::ScalarOps;

use super::geom::{load, reflect_point, reflect_vector, store};
use crate::error::{MeshError, MeshResult};
use crate::kernel::GhostBuffers;
use crate::shape::BlockShape;

const ROUTINE: &str = "build_ghost";

/// 相对索引转共享位置
#[inline]
fn position(n_ghost: usize, total: usize, rel: i32, buffer: &'static str) -> MeshResult<usize> {
    let pos = n_ghost as i64 + rel as i64;
    if pos < 0 || pos as usize >= total {
        return Err(MeshError::kernel_contract(ROUTINE, buffer, total, pos.max(0) as usize));
    }
    Ok(pos as usize)
}

pub(crate) fn build_ghost<S: ScalarOps>(
    shape: BlockShape,
    bndfcs: &[[i32; 2]],
    buf: GhostBuffers<'_, S>,
) -> MeshResult<()> {
    let ndim = shape.ndim();
    let (gnd, gfc, gcl) = (
        shape.ngstnode as usize,
        shape.ngstface as usize,
        shape.ngstcell as usize,
    );
    let (tnd, tfc, tcl) = (shape.total_nodes(), shape.total_faces(), shape.total_cells());
    let fcs = shape.fcnds_stride();
    let cls = shape.clnds_stride();
    let cfs = shape.clfcs_stride();
    let rel = shape.fccls_stride();

    let mut ignd = 0usize;
    let mut igfc = 0usize;

    for (ibnd, bnd) in bndfcs.iter().enumerate() {
        let ifc = bnd[0];
        let fpos = position(gfc, tfc, ifc, "shfccls")?;
        let icl = buf.fccls[fpos * rel];
        let ipos = position(gcl, tcl, icl, "shclnds")?;
        let gcl_rel = -(ibnd as i32) - 1;
        let gpos = position(gcl, tcl, gcl_rel, "shclnds")?;

        buf.cltpn[gpos] = buf.cltpn[ipos];
        buf.clgrp[gpos] = buf.clgrp[ipos];
        buf.fccls[fpos * rel + 1] = gcl_rel;

        let origin = load(buf.fccnd, ndim, fpos);
        let normal = load(buf.fcnml, ndim, fpos);

        // 节点
        let fnnd = buf.fcnds[fpos * fcs].max(0) as usize;
        let face_nodes: Vec<i32> = buf.fcnds[fpos * fcs + 1..fpos * fcs + 1 + fnnd].to_vec();
        let cnnd = buf.clnds[ipos * cls].max(0) as usize;
        let mut node_map: Vec<(i32, i32)> = Vec::with_capacity(cnnd);
        buf.clnds[gpos * cls] = cnnd as i32;
        for inl in 1..=cnnd {
            let ind = buf.clnds[ipos * cls + inl];
            let mapped = if face_nodes.contains(&ind) {
                ind
            } else {
                if ignd >= gnd {
                    return Err(MeshError::kernel_contract(ROUTINE, "shndcrd", gnd, ignd + 1));
                }
                let gnd_rel = -(ignd as i32) - 1;
                ignd += 1;
                let src = position(gnd, tnd, ind, "shndcrd")?;
                let dst = position(gnd, tnd, gnd_rel, "shndcrd")?;
                let p = reflect_point(load(buf.ndcrd, ndim, src), origin, normal);
                store(buf.ndcrd, ndim, dst, p);
                gnd_rel
            };
            buf.clnds[gpos * cls + inl] = mapped;
            node_map.push((ind, mapped));
        }

        // 面
        let cnfc = buf.clfcs[ipos * cfs].max(0) as usize;
        buf.clfcs[gpos * cfs] = cnfc as i32;
        for ifl in 1..=cnfc {
            let jfc = buf.clfcs[ipos * cfs + ifl];
            if jfc == ifc {
                buf.clfcs[gpos * cfs + ifl] = ifc;
                continue;
            }
            if igfc >= gfc {
                return Err(MeshError::kernel_contract(ROUTINE, "shfcnds", gfc, igfc + 1));
            }
            let gfc_rel = -(igfc as i32) - 1;
            igfc += 1;
            let src = position(gfc, tfc, jfc, "shfcnds")?;
            let dst = position(gfc, tfc, gfc_rel, "shfcnds")?;

            buf.fctpn[dst] = buf.fctpn[src];
            let nnd = buf.fcnds[src * fcs].max(0) as usize;
            buf.fcnds[dst * fcs] = nnd as i32;
            for slot in 1..=nnd {
                let ind = buf.fcnds[src * fcs + nnd + 1 - slot];
                let mapped = node_map
                    .iter()
                    .find(|(from, _)| *from == ind)
                    .map(|&(_, to)| to)
                    .ok_or_else(|| {
                        MeshError::malformed("face", src, format!("节点 {} 不属于单元 {}", ind, icl))
                    })?;
                buf.fcnds[dst * fcs + slot] = mapped;
            }
            buf.fccls[dst * rel] = gcl_rel;

            let fc = reflect_point(load(buf.fccnd, ndim, src), origin, normal);
            let fn_ = reflect_vector(load(buf.fcnml, ndim, src), normal);
            store(buf.fccnd, ndim, dst, fc);
            store(buf.fcnml, ndim, dst, fn_);
            buf.fcara[dst] = buf.fcara[src];
            buf.clfcs[gpos * cfs + ifl] = gfc_rel;
        }

        let cc = reflect_point(load(buf.clcnd, ndim, ipos), origin, normal);
        store(buf.clcnd, ndim, gpos, cc);
        buf.clvol[gpos] = buf.clvol[ipos];
    }

    if ignd != gnd {
        return Err(MeshError::kernel_contract(ROUTINE, "shndcrd", gnd, ignd));
    }
    if igfc != gfc {
        return Err(MeshError::kernel_contract(ROUTINE, "shfcnds", gfc, igfc));
    }
    Ok(())
}
