//! 三个构建阶段的端到端测试
//!
//! 单个四边形、共边三角形、六面体立方体、混合 3D 单元和一维线段。

use cm_config::{BcKind, BuildConfig};
use cm_mesh::generation::{line_segments, unit_cube_hexes};
use cm_mesh::{Block, BlockSpec, BoundaryCondition, BuildStage, ElementType, MeshError};

fn block_2d(coords: &[[f64; 2]], cells: &[(ElementType, &[i32])], nface: usize) -> Block {
    let mut block = Block::new(BlockSpec {
        ndim: 2,
        nnode: coords.len(),
        nface,
        ncell: cells.len(),
        nbound: 0,
    })
    .unwrap();
    for (i, p) in coords.iter().enumerate() {
        block.set_node(i, p).unwrap();
    }
    for (icl, (ty, nodes)) in cells.iter().enumerate() {
        block.set_cell(icl, *ty, nodes).unwrap();
    }
    block
}

fn unit_quad() -> Block {
    block_2d(
        &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        &[(ElementType::Quad, &[0, 1, 2, 3])],
        4,
    )
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-10
}

#[test]
fn single_quad_end_to_end() {
    let mut block = unit_quad();

    block.build_interior().unwrap();
    assert_eq!(block.nface(), 4);
    for ifc in 0..4 {
        let rel = block.fccls().interior_row(ifc);
        assert_eq!(rel[0], 0);
        assert_eq!(rel[1], -1);
    }

    block.build_boundary().unwrap();
    assert_eq!(block.nbound(), 4);
    assert_eq!(block.bclist().len(), 1);
    let bc = block.bclist().get(0).unwrap();
    assert!(bc.is_synthetic());
    assert_eq!(bc.name(), "unspecified");
    assert_eq!(bc.faces(), &[0, 1, 2, 3]);

    block.build_ghost().unwrap();
    assert_eq!(block.ngstcell(), 4);
    assert_eq!(block.ngstface(), 12);
    assert_eq!(block.ngstnode(), 8);
    assert_eq!(block.stage(), BuildStage::Ghost);
    assert!(block.validate().is_valid());
}

#[test]
fn quad_ghost_mirrors_across_boundary_face() {
    let mut block = unit_quad();
    block.build_interior().unwrap();
    block.build_boundary().unwrap();
    block.build_ghost().unwrap();

    // 第 0 个边界面为底边 y = 0
    let ghost0 = block.clcnd().ghost_row(0);
    assert!(close(ghost0[0], 0.5) && close(ghost0[1], -0.5));
    assert_eq!(block.clvol().ghost_row(0), &[1.0]);
    assert_eq!(block.cltpn().ghost_row(0), &[ElementType::Quad.id()]);

    // 边界面的 neighbor 指向对应的幽灵单元
    for (k, &[ifc, _]) in block.bndfcs().iter().enumerate() {
        assert_eq!(block.fccls().interior_row(ifc as usize)[1], -(k as i32) - 1);
    }

    // 幽灵单元共用边界面上的节点，其余节点为镜像的幽灵节点
    let clnds = block.clnds().ghost_row(0);
    assert_eq!(&clnds[..5], &[4, 0, 1, -1, -2]);
    let p = block.ndcrd().ghost_row(0);
    assert!(close(p[0], 1.0) && close(p[1], -1.0));

    // 幽灵单元的面：边界面本身 + 3 个幽灵面
    let clfcs = block.clfcs().ghost_row(0);
    assert_eq!(&clfcs[..5], &[4, 0, -1, -2, -3]);
    let owner = block.fccls().ghost_row(0);
    assert_eq!(owner, &[-1, -1, -1, -1]);
}

#[test]
fn ghost_face_normals_point_away_from_ghost_cell() {
    let mut block = unit_quad();
    block.build_interior().unwrap();
    block.build_boundary().unwrap();
    block.build_ghost().unwrap();

    let g = block.ngstcell() as i64;
    for k in 0..block.ngstface() {
        let owner = block.fccls().ghost_row(k)[0] as i64;
        let cc = block.clcnd().row((g + owner) as usize);
        let fc = block.fccnd().ghost_row(k);
        let n = block.fcnml().ghost_row(k);
        let dot = (fc[0] - cc[0]) * n[0] + (fc[1] - cc[1]) * n[1];
        assert!(dot > 0.0, "ghost face {} normal points inward", k);
    }
}

#[test]
fn two_triangles_share_one_face() {
    let mut block = block_2d(
        &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        &[
            (ElementType::Triangle, &[0, 1, 2]),
            (ElementType::Triangle, &[0, 2, 3]),
        ],
        0,
    );
    block.build_interior().unwrap();
    assert_eq!(block.nface(), 5);

    let shared = block.find_face(&[0, 2]).unwrap();
    let rel = block.fccls().interior_row(shared);
    assert!(rel[0] >= 0 && rel[1] >= 0);
    assert_eq!(block.statistics().n_interior_faces, 1);

    block.build_boundary().unwrap();
    assert_eq!(block.nbound(), 4);
    assert!(block.bndfcs().iter().all(|&[ifc, _]| ifc as usize != shared));

    block.build_ghost().unwrap();
    assert_eq!(block.ngstcell(), 4);
    assert_eq!(block.ngstface(), 8);
    assert_eq!(block.ngstnode(), 4);
}

#[test]
fn owner_never_negative_and_normals_outward() {
    let def = unit_cube_hexes(2);
    let mut block: Block = Block::from_definition(&def).unwrap();
    block.build_interior().unwrap();

    for ifc in 0..block.nface() {
        let rel = block.fccls().interior_row(ifc);
        assert!(rel[0] >= 0);
        let cc = block.clcnd().interior_row(rel[0] as usize);
        let fc = block.fccnd().interior_row(ifc);
        let n = block.fcnml().interior_row(ifc);
        let dot: f64 = (0..3).map(|a| (fc[a] - cc[a]) * n[a]).sum();
        assert!(dot > 0.0);
    }
}

#[test]
fn hex_cube_counts_and_volume() {
    let def = unit_cube_hexes(2);
    let block: Block = def.build(&BuildConfig::default()).unwrap();

    assert_eq!(block.ncell(), 8);
    assert_eq!(block.nface(), 36);
    assert_eq!(block.nbound(), 24);
    assert_eq!(block.ngstcell(), 24);
    assert_eq!(block.ngstface(), 120);
    assert_eq!(block.ngstnode(), 96);

    let stats = block.statistics();
    assert!(close(stats.total_volume, 1.0));
    assert!(close(stats.min_volume, 0.125));
    assert!(close(stats.max_volume, 0.125));
    // 6 个命名边界条件认领全部边界面，不需要自动补齐
    assert_eq!(block.bclist().len(), 6);
    assert!(block.bclist().iter().all(|bc| !bc.is_synthetic() && bc.len() == 4));
    assert!(block.validate().is_valid());
}

#[test]
fn mixed_pyramid_and_tetrahedron() {
    let coords = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.5, 0.5, 1.0],
        [1.5, 0.5, 0.5],
    ];
    let mut block: Block = Block::new(BlockSpec {
        ndim: 3,
        nnode: coords.len(),
        nface: 0,
        ncell: 2,
        nbound: 0,
    })
    .unwrap();
    for (i, p) in coords.iter().enumerate() {
        block.set_node(i, p).unwrap();
    }
    block.set_cell(0, ElementType::Pyramid, &[0, 1, 2, 3, 4]).unwrap();
    block.set_cell(1, ElementType::Tetrahedron, &[1, 2, 4, 5]).unwrap();

    block.build_interior().unwrap();
    assert_eq!(block.nface(), 8);
    let vol = block.clvol().interior();
    assert!(close(vol[0], 1.0 / 3.0));
    assert!(close(vol[1], 0.125));

    block.build_boundary().unwrap();
    assert_eq!(block.nbound(), 7);

    block.build_ghost().unwrap();
    assert_eq!(block.ngstcell(), 7);
    assert_eq!(block.ngstface(), 25);
    assert_eq!(block.ngstnode(), 10);
    for k in 0..7 {
        let [ifc, _] = block.bndfcs()[k];
        let owner = block.fccls().interior_row(ifc as usize)[0] as usize;
        assert_eq!(block.clvol().ghost_row(k), &[vol_of(&block, owner)]);
    }
    assert!(block.validate().is_valid());
}

fn vol_of(block: &Block, icl: usize) -> f64 {
    block.clvol().interior()[icl]
}

#[test]
fn line_segments_in_one_dimension() {
    let block: Block = line_segments(3, 3.0).build(&BuildConfig::default()).unwrap();
    assert_eq!(block.nface(), 4);
    assert_eq!(block.nbound(), 2);
    assert_eq!(block.ngstcell(), 2);
    assert_eq!(block.ngstface(), 2);
    assert_eq!(block.ngstnode(), 2);

    assert!(close(block.clcnd().ghost_row(0)[0], -0.5));
    assert!(close(block.clcnd().ghost_row(1)[0], 3.5));
    assert!(close(block.ndcrd().ghost_row(0)[0], -1.0));
    assert!(close(block.statistics().total_volume, 3.0));
}

#[test]
fn named_bc_takes_precedence_in_ordering() {
    let mut block = unit_quad();
    block.build_interior().unwrap();
    let top = block.find_face(&[2, 3]).unwrap() as i32;
    block
        .add_boundary_condition(BoundaryCondition::new("lid", BcKind::Inlet).with_faces([top]))
        .unwrap();
    block.build_boundary().unwrap();

    assert_eq!(block.bndfcs()[0], [top, 0]);
    assert_eq!(block.boundary_kind(0), Some(&BcKind::Inlet));
    let rest: Vec<i32> = block.bndfcs()[1..].iter().map(|r| r[0]).collect();
    let mut sorted = rest.clone();
    sorted.sort_unstable();
    assert_eq!(rest, sorted);

    block.build_ghost().unwrap();
    // 幽灵单元 0 镜像顶边
    let ghost0 = block.clcnd().ghost_row(0);
    assert!(close(ghost0[0], 0.5) && close(ghost0[1], 1.5));
}

#[test]
fn stage_order_is_enforced() {
    let mut block = unit_quad();
    assert!(matches!(block.build_ghost(), Err(MeshError::StageViolation { .. })));
    block.build_interior().unwrap();
    assert!(matches!(block.build_ghost(), Err(MeshError::StageViolation { .. })));
    block.build_boundary().unwrap();
    block.build_ghost().unwrap();

    assert!(matches!(block.build_ghost(), Err(MeshError::StageViolation { .. })));
    assert!(matches!(block.build_boundary(), Err(MeshError::StageViolation { .. })));
    assert!(matches!(block.calc_metric(), Err(MeshError::StageViolation { .. })));
    assert!(matches!(
        block.set_node(0, &[0.0, 0.0]),
        Err(MeshError::StageViolation { .. })
    ));
    assert!(block
        .add_boundary_condition(BoundaryCondition::new("late", BcKind::Wall))
        .is_err());
}

#[test]
fn f32_block_builds() {
    let def = unit_cube_hexes(1);
    let block: Block<f32> = def.build(&BuildConfig::default()).unwrap();
    assert_eq!(block.ngstcell(), 6);
    assert!((block.statistics().total_volume - 1.0).abs() < 1e-6);
}
