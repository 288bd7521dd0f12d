// crates/cm_mesh/src/kernel/faces.rs

//! 由单元节点列表推导面
//!
//! 按单元顺序遍历每个单元的局部面，以排序后的节点列表为键合并共享面：
//! 首次出现的单元为 owner，第二次出现的为 neighbor，第三次即非流形。

use std::collections::HashMap;

use crate::elemtype::ElementType;
use crate::error::{MeshError, MeshResult};
use crate::kernel::FaceBuffers;
use crate::shape::BlockShape;

pub(crate) fn faces_from_cells(
    shape: BlockShape,
    cltpn: &[i32],
    clnds: &[i32],
    max_nface: usize,
    out: FaceBuffers<'_>,
) -> MeshResult<usize> {
    let ncell = shape.ncell as usize;
    let clnds_stride = shape.clnds_stride();
    let clfcs_stride = shape.clfcs_stride();
    let fcnds_stride = shape.fcnds_stride();
    let fccls_stride = shape.fccls_stride();

    let mut lookup: HashMap<Vec<i32>, usize> = HashMap::with_capacity(max_nface);
    let mut nface = 0usize;

    for icl in 0..ncell {
        let ty = ElementType::from_id(cltpn[icl])
            .ok_or_else(|| MeshError::invalid_element_type("cell", icl, cltpn[icl]))?;
        let cell_nodes = &clnds[icl * clnds_stride + 1..icl * clnds_stride + 1 + ty.nnode()];
        let faces = ty.local_faces();
        if faces.len() + 1 > clfcs_stride {
            return Err(MeshError::kernel_contract(
                "faces_from_cells",
                "clfcs",
                clfcs_stride - 1,
                faces.len(),
            ));
        }
        out.clfcs[icl * clfcs_stride] = faces.len() as i32;

        for (ilf, (fty, local)) in faces.iter().enumerate() {
            let nodes: Vec<i32> = local.iter().map(|&l| cell_nodes[l]).collect();
            let mut key = nodes.clone();
            key.sort_unstable();

            let ifc = match lookup.get(&key) {
                Some(&ifc) => {
                    let rel = &mut out.fccls[ifc * fccls_stride..(ifc + 1) * fccls_stride];
                    if rel[1] >= 0 || rel[0] == icl as i32 {
                        return Err(MeshError::NonManifold {
                            face_nodes: nodes,
                            cells: vec![rel[0], rel[1], icl as i32],
                        });
                    }
                    rel[1] = icl as i32;
                    ifc
                }
                None => {
                    if nface >= max_nface {
                        return Err(MeshError::kernel_contract(
                            "faces_from_cells",
                            "fctpn",
                            max_nface,
                            nface + 1,
                        ));
                    }
                    let ifc = nface;
                    nface += 1;
                    out.fctpn[ifc] = fty.id();
                    let row = &mut out.fcnds[ifc * fcnds_stride..(ifc + 1) * fcnds_stride];
                    row[0] = nodes.len() as i32;
                    row[1..=nodes.len()].copy_from_slice(&nodes);
                    out.fccls[ifc * fccls_stride] = icl as i32;
                    lookup.insert(key, ifc);
                    ifc
                }
            };
            out.clfcs[icl * clfcs_stride + 1 + ilf] = ifc as i32;
        }
    }

    Ok(nface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elemtype::{CLMFC, CLMND, FCMND, FCREL};

    fn shape(nnode: i32, ncell: i32) -> BlockShape {
        BlockShape {
            ndim: 2,
            fcmnd: FCMND as i32,
            clmnd: CLMND as i32,
            clmfc: CLMFC as i32,
            nnode,
            ncell,
            ..Default::default()
        }
    }

    fn cells(rows: &[(ElementType, &[i32])]) -> (Vec<i32>, Vec<i32>) {
        let mut cltpn = Vec::new();
        let mut clnds = vec![-1; rows.len() * (CLMND + 1)];
        for (icl, (ty, nodes)) in rows.iter().enumerate() {
            cltpn.push(ty.id());
            let row = &mut clnds[icl * (CLMND + 1)..(icl + 1) * (CLMND + 1)];
            row[0] = nodes.len() as i32;
            row[1..=nodes.len()].copy_from_slice(nodes);
        }
        (cltpn, clnds)
    }

    fn run(shape: BlockShape, cltpn: &[i32], clnds: &[i32], max_nface: usize) -> MeshResult<(usize, Vec<i32>)> {
        let ncell = shape.ncell as usize;
        let mut clfcs = vec![-1; ncell * (CLMFC + 1)];
        let mut fctpn = vec![-1; max_nface];
        let mut fcnds = vec![-1; max_nface * (FCMND + 1)];
        let mut fccls = vec![-1; max_nface * FCREL];
        let nface = faces_from_cells(
            shape,
            cltpn,
            clnds,
            max_nface,
            FaceBuffers {
                clfcs: &mut clfcs,
                fctpn: &mut fctpn,
                fcnds: &mut fcnds,
                fccls: &mut fccls,
            },
        )?;
        Ok((nface, fccls))
    }

    #[test]
    fn test_two_triangles_share_edge() {
        let (cltpn, clnds) = cells(&[
            (ElementType::Triangle, &[0, 1, 2]),
            (ElementType::Triangle, &[0, 2, 3]),
        ]);
        let (nface, fccls) = run(shape(4, 2), &cltpn, &clnds, 6).unwrap();
        assert_eq!(nface, 5);
        // 第 2 个面 (2,0) 与第二个三角形的 (0,2) 合并
        assert_eq!(&fccls[2 * FCREL..2 * FCREL + 2], &[0, 1]);
    }

    #[test]
    fn test_non_manifold_rejected() {
        let (cltpn, clnds) = cells(&[
            (ElementType::Triangle, &[0, 1, 2]),
            (ElementType::Triangle, &[1, 0, 3]),
            (ElementType::Triangle, &[0, 1, 4]),
        ]);
        let result = run(shape(5, 3), &cltpn, &clnds, 9);
        assert!(matches!(result, Err(MeshError::NonManifold { .. })));
    }

    #[test]
    fn test_bound_exceeded_is_contract_violation() {
        let (cltpn, clnds) = cells(&[(ElementType::Quad, &[0, 1, 2, 3])]);
        let result = run(shape(4, 1), &cltpn, &clnds, 3);
        assert!(matches!(result, Err(MeshError::KernelContract { .. })));
    }
}
