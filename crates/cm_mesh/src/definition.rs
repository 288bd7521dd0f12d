// crates/cm_mesh/src/definition.rs

//! 网格定义文件
//!
//! JSON 格式，描述节点坐标、单元类型与节点列表、分组和边界条件：
//!
//! ```json
//! {
//!   "ndim": 2,
//!   "blkn": 0,
//!   "nodes": [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
//!   "cells": [{ "kind": "quad", "nodes": [0, 1, 2, 3] }],
//!   "boundaries": [{ "name": "bottom", "kind": "wall", "faces": [[0, 1]] }]
//! }
//! ```
//!
//! 边界面以节点集合给出（与节点顺序无关），在 `build_interior` 之后解析为面索引。

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use cm_config::{BcKind, BuildConfig};
use cm_foundation::ScalarOps;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::block::{Block, BlockSpec};
use crate::boundcond::BoundaryCondition;
use crate::elemtype::ElementType;
use crate::error::{MeshError, MeshResult};

/// 单元定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellDefinition {
    /// 单元类型
    pub kind: ElementType,
    /// 节点索引
    pub nodes: Vec<i32>,
    /// 分组编号（索引 `groups`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<usize>,
}

/// 边界条件定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryDefinition {
    /// 名称
    pub name: String,
    /// 条件类型
    #[serde(default)]
    pub kind: BcKind,
    /// 边界面（每个面为节点集合）
    pub faces: Vec<Vec<i32>>,
}

/// 网格定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDefinition {
    /// 空间维度
    pub ndim: usize,
    /// 块序号
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blkn: Option<u32>,
    /// 节点坐标
    pub nodes: Vec<Vec<f64>>,
    /// 单元
    pub cells: Vec<CellDefinition>,
    /// 分组名称
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    /// 边界条件
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boundaries: Vec<BoundaryDefinition>,
}

impl MeshDefinition {
    /// 从 JSON 字符串解析
    pub fn from_json(content: &str) -> MeshResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// 从文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> MeshResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> MeshResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 保存到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> MeshResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// 声明的实体数（面数取 0，由 `build_interior` 推导）
    pub fn spec(&self) -> BlockSpec {
        BlockSpec {
            ndim: self.ndim,
            nnode: self.nodes.len(),
            nface: 0,
            ncell: self.cells.len(),
            nbound: 0,
        }
    }

    /// 按配置依次执行三个构建阶段
    pub fn build<S: ScalarOps>(&self, config: &BuildConfig) -> MeshResult<Block<S>> {
        let mut block = Block::from_definition(self)?;
        block.build_interior()?;
        block.apply_boundaries(&self.boundaries)?;
        block.build_boundary_with(&config.boundary)?;
        if config.ghost.enabled {
            block.build_ghost()?;
        }
        info!(block = %block, stage = %block.stage(), "网格块构建完成");
        Ok(block)
    }
}

impl<S: ScalarOps> Block<S> {
    /// 由网格定义分配并填充节点、单元和分组
    pub fn from_definition(def: &MeshDefinition) -> MeshResult<Self> {
        let mut block = Self::new(def.spec())?;
        if let Some(blkn) = def.blkn {
            block.set_blkn(blkn);
        }
        for name in &def.groups {
            block.add_group(name.clone());
        }
        for (ind, coords) in def.nodes.iter().enumerate() {
            let coords: Vec<S> = coords.iter().map(|&c| S::from_f64(c)).collect();
            block.set_node(ind, &coords)?;
        }
        for (icl, cell) in def.cells.iter().enumerate() {
            block.set_cell(icl, cell.kind, &cell.nodes)?;
            if let Some(group) = cell.group {
                if group >= def.groups.len() {
                    return Err(MeshError::malformed(
                        "cell",
                        icl,
                        format!("分组 {} 超出 [0, {})", group, def.groups.len()),
                    ));
                }
                block.set_cell_group(icl, group as i32)?;
            }
        }
        Ok(block)
    }

    /// 把以节点集合给出的边界面解析为面索引并登记边界条件
    pub fn apply_boundaries(&mut self, defs: &[BoundaryDefinition]) -> MeshResult<()> {
        if defs.is_empty() {
            return Ok(());
        }
        let lookup: HashMap<Vec<i32>, i32> = (0..self.nface())
            .map(|ifc| {
                let mut key = self.face_nodes(ifc).to_vec();
                key.sort_unstable();
                (key, ifc as i32)
            })
            .collect();

        for def in defs {
            let mut faces = Vec::with_capacity(def.faces.len());
            for (i, nodes) in def.faces.iter().enumerate() {
                let mut key = nodes.clone();
                key.sort_unstable();
                let ifc = lookup.get(&key).copied().ok_or_else(|| {
                    MeshError::malformed(
                        "boundary",
                        i,
                        format!("'{}' 的节点 {:?} 不构成任何面", def.name, nodes),
                    )
                })?;
                faces.push(ifc);
            }
            self.add_boundary_condition(
                BoundaryCondition::new(def.name.clone(), def.kind.clone()).with_faces(faces),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = r#"{
        "ndim": 2,
        "nodes": [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        "cells": [{ "kind": "quad", "nodes": [0, 1, 2, 3], "group": 0 }],
        "groups": ["fluid"],
        "boundaries": [{ "name": "bottom", "kind": "wall", "faces": [[1, 0]] }]
    }"#;

    #[test]
    fn test_parse_and_populate() {
        let def = MeshDefinition::from_json(QUAD).unwrap();
        assert_eq!(def.cells[0].kind, ElementType::Quad);
        let block: Block = Block::from_definition(&def).unwrap();
        assert_eq!(block.ncell(), 1);
        assert_eq!(block.grpnames(), &["fluid".to_string()]);
        assert_eq!(block.clgrp().interior(), &[0]);
    }

    #[test]
    fn test_build_resolves_boundaries() {
        let def = MeshDefinition::from_json(QUAD).unwrap();
        let block: Block = def.build(&BuildConfig::default()).unwrap();
        let bottom = block.bclist().find_by_name("bottom").unwrap();
        assert_eq!(bottom.len(), 1);
        assert_eq!(block.boundary_kind(0), Some(&BcKind::Wall));
        assert_eq!(block.ngstcell(), 4);
    }

    #[test]
    fn test_unknown_boundary_face() {
        let mut def = MeshDefinition::from_json(QUAD).unwrap();
        def.boundaries[0].faces = vec![vec![0, 2]];
        let result: MeshResult<Block> = def.build(&BuildConfig::default());
        assert!(matches!(result, Err(MeshError::MalformedConnectivity { .. })));
    }

    #[test]
    fn test_block_number_carried_to_statistics() {
        let mut def = MeshDefinition::from_json(QUAD).unwrap();
        assert_eq!(def.blkn, None);
        def.blkn = Some(3);
        let json = def.to_json().unwrap();
        assert!(json.contains("\"blkn\": 3"));

        let block: Block = MeshDefinition::from_json(&json)
            .unwrap()
            .build(&BuildConfig::default())
            .unwrap();
        assert_eq!(block.blkn(), Some(3));
        let stats = block.statistics();
        assert_eq!(stats.blkn, Some(3));
        assert!(stats.to_string().contains("块序号: 3"));
    }

    #[test]
    fn test_bad_group_rejected() {
        let mut def = MeshDefinition::from_json(QUAD).unwrap();
        def.cells[0].group = Some(3);
        assert!(Block::<f64>::from_definition(&def).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.json");
        let def = MeshDefinition::from_json(QUAD).unwrap();
        def.save_to_file(&path).unwrap();
        assert_eq!(MeshDefinition::from_file(&path).unwrap(), def);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            MeshDefinition::from_json("{\"ndim\": 2"),
            Err(MeshError::Format(_))
        ));
    }
}
