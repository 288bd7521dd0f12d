//! 性质测试
//!
//! - 幽灵计数对任意边界邻接单元类型组合非负，幽灵单元数等于边界面数；
//! - 由随机四边形/三角形混合的条带网格，`count_ghost` 的预计数与
//!   `build_ghost` 实际生成的幽灵实体数一致；
//! - `build_boundary` 在邻接关系和边界条件列表不变时幂等。

use cm_config::BcKind;
use cm_mesh::generation::RectangleGenerator;
use cm_mesh::{Block, BoundaryCondition, CellDefinition, ElementType, GhostTally, MeshDefinition};
use proptest::prelude::*;

/// 随机的 (单元类型, 局部面序号)
fn boundary_adjacent_cell() -> impl Strategy<Value = (ElementType, usize)> {
    prop::sample::select(ElementType::ALL[1..].to_vec())
        .prop_flat_map(|ty| (Just(ty), 0..ty.local_faces().len()))
}

/// 单行条带：第 `i` 列为四边形，或沿对角线分为下、上两个三角形
fn mixed_strip(columns: &[bool]) -> MeshDefinition {
    let n = columns.len();
    let bottom = |i: usize| i as i32;
    let top = |i: usize| (n + 1 + i) as i32;
    let nodes = (0..=n)
        .map(|i| vec![i as f64, 0.0])
        .chain((0..=n).map(|i| vec![i as f64, 1.0]))
        .collect();
    let mut cells = Vec::new();
    for (i, &quad) in columns.iter().enumerate() {
        let (b0, b1, t1, t0) = (bottom(i), bottom(i + 1), top(i + 1), top(i));
        if quad {
            cells.push(CellDefinition {
                kind: ElementType::Quad,
                nodes: vec![b0, b1, t1, t0],
                group: None,
            });
        } else {
            for nodes in [vec![b0, b1, t1], vec![b0, t1, t0]] {
                cells.push(CellDefinition {
                    kind: ElementType::Triangle,
                    nodes,
                    group: None,
                });
            }
        }
    }
    MeshDefinition {
        ndim: 2,
        blkn: None,
        nodes,
        cells,
        groups: Vec::new(),
        boundaries: Vec::new(),
    }
}

proptest! {
    #[test]
    fn ghost_counts_match_built_mixed_strip(columns in prop::collection::vec(any::<bool>(), 1..12)) {
        let mut block: Block = Block::from_definition(&mixed_strip(&columns)).unwrap();
        block.build_interior().unwrap();
        block.build_boundary().unwrap();
        let counts = block.count_ghost().unwrap();
        block.build_ghost().unwrap();

        prop_assert_eq!(block.ngstnode(), counts.ngstnode);
        prop_assert_eq!(block.ngstface(), counts.ngstface);
        prop_assert_eq!(block.ngstcell(), counts.ngstcell);
        prop_assert_eq!(block.ngstcell(), block.nbound());
        prop_assert_eq!(block.nbound(), 2 * columns.len() + 2);

        // 每个边界面：四边形贡献 2 个幽灵节点和 3 个幽灵面，三角形 1 和 2
        let per_face = |quad: bool| -> (usize, usize) {
            if quad {
                (2, 3)
            } else {
                (1, 2)
            }
        };
        let ends = [columns[0], columns[columns.len() - 1]];
        let (nodes, faces) = columns
            .iter()
            .flat_map(|&quad| [quad, quad])
            .chain(ends)
            .map(per_face)
            .fold((0, 0), |(n, f), (dn, df)| (n + dn, f + df));
        prop_assert_eq!(block.ngstnode(), nodes);
        prop_assert_eq!(block.ngstface(), faces);

        let report = block.validate();
        prop_assert!(report.is_valid(), "{}", report);
    }

    #[test]
    fn ghost_counts_are_non_negative(cells in prop::collection::vec(boundary_adjacent_cell(), 0..64)) {
        let mut tally = GhostTally::default();
        for &(ty, ilf) in &cells {
            let (_, local) = ty.local_faces()[ilf];
            tally.add(ty.cell_face_count(), ty.nnode(), local.len());
        }
        let counts = tally.finish().unwrap();
        prop_assert_eq!(counts.ngstcell, cells.len());
        let faces: usize = cells.iter().map(|(ty, _)| ty.cell_face_count() - 1).sum();
        prop_assert_eq!(counts.ngstface, faces);
    }

    #[test]
    fn build_boundary_is_idempotent(
        nx in 1usize..5,
        ny in 1usize..5,
        mask in prop::collection::vec(any::<bool>(), 16),
    ) {
        let mut def = RectangleGenerator::new(nx, ny, 1.0, 1.0).quads();
        def.boundaries.clear();
        let mut block: Block = Block::from_definition(&def).unwrap();
        block.build_interior().unwrap();

        let claimed: Vec<i32> = block
            .boundary_candidates()
            .into_iter()
            .zip(mask.iter().cycle())
            .filter(|(_, take)| **take)
            .map(|(ifc, _)| ifc)
            .collect();
        let wall = BoundaryCondition::new("wall", BcKind::Wall).with_faces(claimed.clone());
        block.add_boundary_condition(wall).unwrap();

        block.build_boundary().unwrap();
        let first = block.bndfcs().to_vec();
        let nbc = block.bclist().len();
        block.build_boundary().unwrap();

        prop_assert_eq!(block.bndfcs(), first.as_slice());
        prop_assert_eq!(block.bclist().len(), nbc);
        prop_assert_eq!(block.nbound(), 2 * (nx + ny));
        let synthetic = block.bclist().iter().filter(|bc| bc.is_synthetic()).count();
        prop_assert_eq!(synthetic, usize::from(claimed.len() < 2 * (nx + ny)));
        for (pos, &[ifc, _]) in block.bndfcs()[..claimed.len()].iter().enumerate() {
            prop_assert_eq!(ifc, claimed[pos]);
        }
    }
}
