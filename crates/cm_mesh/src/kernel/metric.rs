// crates/cm_mesh/src/kernel/metric.rs

//! 度量计算
//!
//! 1. 面：中心、单位法向、面积（1D 端点面积取 1，2D 棱取长度，3D 多边形按三角扇分解）；
//! 2. 单元：中心、体积（1D 取长度，2D 面积，3D 以节点平均点为顶点的棱锥分解）；
//! 3. 法向定向：法向须背离 owner 单元中心，翻转时面节点逆序。

use cm_foundation::ScalarOps;
use glam::DVec3;

use super::geom::{load, store};
use crate::error::{MeshError, MeshResult};
use crate::kernel::MetricBuffers;
use crate::shape::BlockShape;

const TINY: f64 = 1e-300;

pub(crate) fn calc_metric<S: ScalarOps>(
    shape: BlockShape,
    buf: MetricBuffers<'_, S>,
) -> MeshResult<()> {
    let ndim = shape.ndim();
    let nnode = shape.nnode as usize;
    let nface = shape.nface as usize;
    let ncell = shape.ncell as usize;
    let fcs = shape.fcnds_stride();
    let cls = shape.clnds_stride();
    let cfs = shape.clfcs_stride();
    let rel = shape.fccls_stride();

    let node = |ind: i32| -> MeshResult<DVec3> {
        if ind < 0 || ind as usize >= nnode {
            return Err(MeshError::kernel_contract("calc_metric", "ndcrd", nnode, ind.max(0) as usize));
        }
        Ok(load(buf.ndcrd, ndim, ind as usize))
    };

    // 面度量
    for ifc in 0..nface {
        let row = &buf.fcnds[ifc * fcs..(ifc + 1) * fcs];
        let nnd = row[0].max(0) as usize;
        let pts = row[1..=nnd].iter().map(|&i| node(i)).collect::<MeshResult<Vec<_>>>()?;

        let (center, normal, area) = match pts.len() {
            1 => (pts[0], DVec3::X, 1.0),
            2 => {
                let edge = pts[1] - pts[0];
                let len = edge.length();
                let nml = DVec3::new(edge.y, -edge.x, 0.0);
                let nml = if len > TINY { nml / len } else { DVec3::ZERO };
                (0.5 * (pts[0] + pts[1]), nml, len)
            }
            n if n >= 3 => polygon(&pts),
            _ => {
                return Err(MeshError::malformed("face", ifc, "面节点数为 0"));
            }
        };
        store(buf.fccnd, ndim, ifc, center);
        store(buf.fcnml, ndim, ifc, normal);
        buf.fcara[ifc] = S::from_f64(area);
    }

    // 单元度量
    for icl in 0..ncell {
        let row = &buf.clnds[icl * cls..(icl + 1) * cls];
        let nnd = row[0].max(0) as usize;
        let pts = row[1..=nnd].iter().map(|&i| node(i)).collect::<MeshResult<Vec<_>>>()?;
        if pts.is_empty() {
            return Err(MeshError::malformed("cell", icl, "单元节点数为 0"));
        }
        let origin = pts.iter().copied().sum::<DVec3>() / pts.len() as f64;

        let frow = &buf.clfcs[icl * cfs..(icl + 1) * cfs];
        let nfc = frow[0].max(0) as usize;

        let (center, volume) = match ndim {
            1 => {
                let len = (pts[pts.len() - 1] - pts[0]).length();
                (origin, len)
            }
            2 => {
                let mut wsum = 0.0;
                let mut csum = DVec3::ZERO;
                for &jfc in &frow[1..=nfc] {
                    let jfc = face_index(jfc, nface)?;
                    let edge = &buf.fcnds[jfc * fcs..(jfc + 1) * fcs];
                    let a = node(edge[1])?;
                    let b = node(edge[2])?;
                    let w = 0.5 * (a - origin).cross(b - origin).z.abs();
                    wsum += w;
                    csum += w * (origin + a + b) / 3.0;
                }
                (if wsum > TINY { csum / wsum } else { origin }, wsum)
            }
            _ => {
                let mut wsum = 0.0;
                let mut csum = DVec3::ZERO;
                for &jfc in &frow[1..=nfc] {
                    let jfc = face_index(jfc, nface)?;
                    let fc = load(buf.fccnd, ndim, jfc);
                    let area_vec = load(buf.fcnml, ndim, jfc) * buf.fcara[jfc].to_f64();
                    let w = (fc - origin).dot(area_vec).abs() / 3.0;
                    wsum += w;
                    csum += w * (origin + 0.75 * (fc - origin));
                }
                (if wsum > TINY { csum / wsum } else { origin }, wsum)
            }
        };
        store(buf.clcnd, ndim, icl, center);
        buf.clvol[icl] = S::from_f64(volume);
    }

    // 法向背离 owner
    for ifc in 0..nface {
        let owner = buf.fccls[ifc * rel];
        if owner < 0 || owner as usize >= ncell {
            return Err(MeshError::kernel_contract("calc_metric", "fccls", ncell, owner.max(0) as usize));
        }
        let fc = load(buf.fccnd, ndim, ifc);
        let nml = load(buf.fcnml, ndim, ifc);
        let cc = load(buf.clcnd, ndim, owner as usize);
        if nml.dot(fc - cc) < 0.0 {
            store(buf.fcnml, ndim, ifc, -nml);
            let row = &mut buf.fcnds[ifc * fcs..(ifc + 1) * fcs];
            let nnd = row[0].max(0) as usize;
            row[1..=nnd].reverse();
        }
    }

    Ok(())
}

fn face_index(jfc: i32, nface: usize) -> MeshResult<usize> {
    if jfc < 0 || jfc as usize >= nface {
        Err(MeshError::kernel_contract("calc_metric", "clfcs", nface, jfc.max(0) as usize))
    } else {
        Ok(jfc as usize)
    }
}

/// 多边形面：以节点平均点为公共顶点做三角扇分解
fn polygon(pts: &[DVec3]) -> (DVec3, DVec3, f64) {
    let origin = pts.iter().copied().sum::<DVec3>() / pts.len() as f64;
    let mut area_vec = DVec3::ZERO;
    let mut wsum = 0.0;
    let mut csum = DVec3::ZERO;
    for (i, &a) in pts.iter().enumerate() {
        let b = pts[(i + 1) % pts.len()];
        let tri = 0.5 * (a - origin).cross(b - origin);
        let w = tri.length();
        area_vec += tri;
        wsum += w;
        csum += w * (origin + a + b) / 3.0;
    }
    let area = area_vec.length();
    let normal = if area > TINY { area_vec / area } else { DVec3::ZERO };
    let center = if wsum > TINY { csum / wsum } else { origin };
    (center, normal, area)
}
