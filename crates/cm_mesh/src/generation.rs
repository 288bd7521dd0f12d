// crates/cm_mesh/src/generation.rs

//! 网格生成
//!
//! 生成简单结构化网格的 [`MeshDefinition`]，用于测试和命令行工具：
//!
//! - [`RectangleGenerator`]: 矩形域上的四边形或三角形网格
//! - [`BoxGenerator`]: 长方体域上的六面体网格
//! - [`line_segments`]: 一维线段网格
//!
//! 节点按 x 最快变化的行主序编号，边界条件按域的各边/各面命名。
//!
//! ```rust
//! use cm_mesh::generation::rectangle_quads;
//!
//! let def = rectangle_quads(2, 3);
//! assert_eq!(def.nodes.len(), 12);
//! assert_eq!(def.cells.len(), 6);
//! ```

use cm_config::BcKind;

use crate::definition::{BoundaryDefinition, CellDefinition, MeshDefinition};
use crate::elemtype::ElementType;

/// 矩形网格生成器
pub struct RectangleGenerator {
    /// x 方向单元数
    nx: usize,
    /// y 方向单元数
    ny: usize,
    /// x 方向域长度
    lx: f64,
    /// y 方向域长度
    ly: f64,
    /// 原点
    origin: [f64; 2],
    /// 边界条件类型
    kind: BcKind,
}

impl RectangleGenerator {
    /// 创建矩形网格生成器
    pub fn new(nx: usize, ny: usize, lx: f64, ly: f64) -> Self {
        Self {
            nx,
            ny,
            lx,
            ly,
            origin: [0.0, 0.0],
            kind: BcKind::Wall,
        }
    }

    /// 设置原点偏移
    pub fn with_origin(mut self, x0: f64, y0: f64) -> Self {
        self.origin = [x0, y0];
        self
    }

    /// 设置四条边的边界条件类型
    pub fn with_boundary_kind(mut self, kind: BcKind) -> Self {
        self.kind = kind;
        self
    }

    fn node(&self, i: usize, j: usize) -> i32 {
        (j * (self.nx + 1) + i) as i32
    }

    fn nodes(&self) -> Vec<Vec<f64>> {
        let dx = self.lx / self.nx.max(1) as f64;
        let dy = self.ly / self.ny.max(1) as f64;
        let mut nodes = Vec::with_capacity((self.nx + 1) * (self.ny + 1));
        for j in 0..=self.ny {
            for i in 0..=self.nx {
                nodes.push(vec![
                    self.origin[0] + i as f64 * dx,
                    self.origin[1] + j as f64 * dy,
                ]);
            }
        }
        nodes
    }

    fn boundaries(&self) -> Vec<BoundaryDefinition> {
        let side = |name: &str, faces: Vec<Vec<i32>>| BoundaryDefinition {
            name: name.to_string(),
            kind: self.kind.clone(),
            faces,
        };
        vec![
            side(
                "bottom",
                (0..self.nx).map(|i| vec![self.node(i, 0), self.node(i + 1, 0)]).collect(),
            ),
            side(
                "right",
                (0..self.ny)
                    .map(|j| vec![self.node(self.nx, j), self.node(self.nx, j + 1)])
                    .collect(),
            ),
            side(
                "top",
                (0..self.nx)
                    .map(|i| vec![self.node(i + 1, self.ny), self.node(i, self.ny)])
                    .collect(),
            ),
            side(
                "left",
                (0..self.ny).map(|j| vec![self.node(0, j + 1), self.node(0, j)]).collect(),
            ),
        ]
    }

    /// 四边形网格
    pub fn quads(&self) -> MeshDefinition {
        let mut cells = Vec::with_capacity(self.nx * self.ny);
        for j in 0..self.ny {
            for i in 0..self.nx {
                cells.push(CellDefinition {
                    kind: ElementType::Quad,
                    nodes: vec![
                        self.node(i, j),
                        self.node(i + 1, j),
                        self.node(i + 1, j + 1),
                        self.node(i, j + 1),
                    ],
                    group: None,
                });
            }
        }
        MeshDefinition {
            ndim: 2,
            blkn: None,
            nodes: self.nodes(),
            cells,
            groups: Vec::new(),
            boundaries: self.boundaries(),
        }
    }

    /// 三角形网格（每个矩形沿对角线分为 2 个三角形）
    pub fn triangles(&self) -> MeshDefinition {
        let mut cells = Vec::with_capacity(self.nx * self.ny * 2);
        for j in 0..self.ny {
            for i in 0..self.nx {
                let v00 = self.node(i, j);
                let v10 = self.node(i + 1, j);
                let v11 = self.node(i + 1, j + 1);
                let v01 = self.node(i, j + 1);
                for nodes in [vec![v00, v10, v11], vec![v00, v11, v01]] {
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
            nodes: self.nodes(),
            cells,
            groups: Vec::new(),
            boundaries: self.boundaries(),
        }
    }
}

/// 长方体六面体网格生成器
pub struct BoxGenerator {
    n: [usize; 3],
    l: [f64; 3],
}

impl BoxGenerator {
    /// 创建生成器：各方向单元数和域长度
    pub fn new(n: [usize; 3], l: [f64; 3]) -> Self {
        Self { n, l }
    }

    fn node(&self, i: usize, j: usize, k: usize) -> i32 {
        let [nx, ny, _] = self.n;
        ((k * (ny + 1) + j) * (nx + 1) + i) as i32
    }

    /// 六面体网格
    pub fn hexes(&self) -> MeshDefinition {
        let [nx, ny, nz] = self.n;
        let d: Vec<f64> = (0..3).map(|a| self.l[a] / self.n[a].max(1) as f64).collect();

        let mut nodes = Vec::with_capacity((nx + 1) * (ny + 1) * (nz + 1));
        for k in 0..=nz {
            for j in 0..=ny {
                for i in 0..=nx {
                    nodes.push(vec![i as f64 * d[0], j as f64 * d[1], k as f64 * d[2]]);
                }
            }
        }

        let mut cells = Vec::with_capacity(nx * ny * nz);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    cells.push(CellDefinition {
                        kind: ElementType::Hexahedron,
                        nodes: vec![
                            self.node(i, j, k),
                            self.node(i + 1, j, k),
                            self.node(i + 1, j + 1, k),
                            self.node(i, j + 1, k),
                            self.node(i, j, k + 1),
                            self.node(i + 1, j, k + 1),
                            self.node(i + 1, j + 1, k + 1),
                            self.node(i, j + 1, k + 1),
                        ],
                        group: None,
                    });
                }
            }
        }

        let quad = |a: i32, b: i32, c: i32, e: i32| vec![a, b, c, e];
        let mut xmin = Vec::new();
        let mut xmax = Vec::new();
        for k in 0..nz {
            for j in 0..ny {
                xmin.push(quad(
                    self.node(0, j, k),
                    self.node(0, j + 1, k),
                    self.node(0, j + 1, k + 1),
                    self.node(0, j, k + 1),
                ));
                xmax.push(quad(
                    self.node(nx, j, k),
                    self.node(nx, j + 1, k),
                    self.node(nx, j + 1, k + 1),
                    self.node(nx, j, k + 1),
                ));
            }
        }
        let mut ymin = Vec::new();
        let mut ymax = Vec::new();
        for k in 0..nz {
            for i in 0..nx {
                ymin.push(quad(
                    self.node(i, 0, k),
                    self.node(i + 1, 0, k),
                    self.node(i + 1, 0, k + 1),
                    self.node(i, 0, k + 1),
                ));
                ymax.push(quad(
                    self.node(i, ny, k),
                    self.node(i + 1, ny, k),
                    self.node(i + 1, ny, k + 1),
                    self.node(i, ny, k + 1),
                ));
            }
        }
        let mut zmin = Vec::new();
        let mut zmax = Vec::new();
        for j in 0..ny {
            for i in 0..nx {
                zmin.push(quad(
                    self.node(i, j, 0),
                    self.node(i + 1, j, 0),
                    self.node(i + 1, j + 1, 0),
                    self.node(i, j + 1, 0),
                ));
                zmax.push(quad(
                    self.node(i, j, nz),
                    self.node(i + 1, j, nz),
                    self.node(i + 1, j + 1, nz),
                    self.node(i, j + 1, nz),
                ));
            }
        }

        let boundaries = [
            ("xmin", xmin),
            ("xmax", xmax),
            ("ymin", ymin),
            ("ymax", ymax),
            ("zmin", zmin),
            ("zmax", zmax),
        ]
        .into_iter()
        .map(|(name, faces)| BoundaryDefinition {
            name: name.to_string(),
            kind: BcKind::Wall,
            faces,
        })
        .collect();

        MeshDefinition {
            ndim: 3,
            blkn: None,
            nodes,
            cells,
            groups: Vec::new(),
            boundaries,
        }
    }
}

/// 单位正方形上的 `nx × ny` 四边形网格
pub fn rectangle_quads(nx: usize, ny: usize) -> MeshDefinition {
    RectangleGenerator::new(nx, ny, 1.0, 1.0).quads()
}

/// 单位正方形上的 `2 × nx × ny` 三角形网格
pub fn rectangle_triangles(nx: usize, ny: usize) -> MeshDefinition {
    RectangleGenerator::new(nx, ny, 1.0, 1.0).triangles()
}

/// 单位立方体上的 `n³` 六面体网格
pub fn unit_cube_hexes(n: usize) -> MeshDefinition {
    BoxGenerator::new([n, n, n], [1.0, 1.0, 1.0]).hexes()
}

/// 区间 `[0, length]` 上的 `n` 段线段网格
pub fn line_segments(n: usize, length: f64) -> MeshDefinition {
    let dx = length / n.max(1) as f64;
    MeshDefinition {
        ndim: 1,
        blkn: None,
        nodes: (0..=n).map(|i| vec![i as f64 * dx]).collect(),
        cells: (0..n)
            .map(|i| CellDefinition {
                kind: ElementType::Line,
                nodes: vec![i as i32, i as i32 + 1],
                group: None,
            })
            .collect(),
        groups: Vec::new(),
        boundaries: vec![
            BoundaryDefinition {
                name: "left".to_string(),
                kind: BcKind::Wall,
                faces: vec![vec![0]],
            },
            BoundaryDefinition {
                name: "right".to_string(),
                kind: BcKind::Wall,
                faces: vec![vec![n as i32]],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_counts() {
        let def = RectangleGenerator::new(3, 2, 6.0, 2.0).quads();
        assert_eq!(def.nodes.len(), 12);
        assert_eq!(def.cells.len(), 6);
        assert_eq!(def.nodes[11], vec![6.0, 2.0]);
        let nbound: usize = def.boundaries.iter().map(|b| b.faces.len()).sum();
        assert_eq!(nbound, 10);
    }

    #[test]
    fn test_origin_offset() {
        let def = RectangleGenerator::new(1, 1, 1.0, 1.0).with_origin(5.0, -1.0).quads();
        assert_eq!(def.nodes[0], vec![5.0, -1.0]);
    }

    #[test]
    fn test_triangles() {
        let def = rectangle_triangles(2, 2);
        assert_eq!(def.cells.len(), 8);
        assert!(def.cells.iter().all(|c| c.kind == ElementType::Triangle));
    }

    #[test]
    fn test_cube() {
        let def = unit_cube_hexes(2);
        assert_eq!(def.nodes.len(), 27);
        assert_eq!(def.cells.len(), 8);
        let nbound: usize = def.boundaries.iter().map(|b| b.faces.len()).sum();
        assert_eq!(nbound, 24);
    }

    #[test]
    fn test_line() {
        let def = line_segments(4, 2.0);
        assert_eq!(def.nodes.len(), 5);
        assert_eq!(def.nodes[4], vec![2.0]);
        assert_eq!(def.boundaries[1].faces, vec![vec![4]]);
    }
}
