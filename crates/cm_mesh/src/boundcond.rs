// crates/cm_mesh/src/boundcond.rs

//! 边界条件列表
//!
//! 边界条件对象只持有面索引集合和条件类型，不拷贝网格数据。
//! `build_boundary` 把每个边界条件认领的面写入网格块的边界面数组，
//! 并把分配到的位置回写到 [`BoundaryCondition::positions`]。

use cm_config::BcKind;
use serde::{Deserialize, Serialize};

/// 边界条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCondition {
    /// 名称
    name: String,
    /// 条件类型
    kind: BcKind,
    /// 序号（在列表中的位置，入列前为 -1）
    #[serde(skip, default = "unassigned")]
    sern: i32,
    /// 认领的面索引（按给定顺序）
    faces: Vec<i32>,
    /// 各面在边界面数组中的位置
    #[serde(skip)]
    positions: Vec<usize>,
    /// 是否由 `build_boundary` 自动补齐
    #[serde(skip)]
    synthetic: bool,
}

fn unassigned() -> i32 {
    -1
}

impl BoundaryCondition {
    /// 创建边界条件
    pub fn new(name: impl Into<String>, kind: BcKind) -> Self {
        Self {
            name: name.into(),
            kind,
            sern: -1,
            faces: Vec::new(),
            positions: Vec::new(),
            synthetic: false,
        }
    }

    /// 指定认领的面
    pub fn with_faces(mut self, faces: impl IntoIterator<Item = i32>) -> Self {
        self.faces = faces.into_iter().collect();
        self
    }

    /// 自动补齐的"未指定"边界条件
    pub(crate) fn synthetic(name: impl Into<String>, kind: BcKind, faces: Vec<i32>) -> Self {
        Self {
            synthetic: true,
            ..Self::new(name, kind).with_faces(faces)
        }
    }

    /// 名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 条件类型
    pub fn kind(&self) -> &BcKind {
        &self.kind
    }

    /// 序号
    pub fn sern(&self) -> i32 {
        self.sern
    }

    /// 认领的面索引
    pub fn faces(&self) -> &[i32] {
        &self.faces
    }

    /// 各面在边界面数组中的位置（`build_boundary` 之后有效）
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// 认领的面数
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// 是否未认领任何面
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// 是否为自动补齐的边界条件
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    /// 写回保留的面及其位置（两者逐项对应）
    pub(crate) fn assign(&mut self, faces: Vec<i32>, positions: Vec<usize>) {
        debug_assert_eq!(faces.len(), positions.len());
        self.faces = faces;
        self.positions = positions;
    }

    pub(crate) fn assign_positions(&mut self, positions: Vec<usize>) {
        self.positions = positions;
    }
}

/// 有序边界条件列表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BcList {
    items: Vec<BoundaryCondition>,
}

impl BcList {
    /// 创建空列表
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加边界条件，返回其序号
    pub fn push(&mut self, mut bc: BoundaryCondition) -> usize {
        let sern = self.items.len();
        bc.sern = sern as i32;
        self.items.push(bc);
        sern
    }

    /// 按序号取边界条件
    pub fn get(&self, sern: usize) -> Option<&BoundaryCondition> {
        self.items.get(sern)
    }

    /// 按名称查找
    pub fn find_by_name(&self, name: &str) -> Option<&BoundaryCondition> {
        self.items.iter().find(|bc| bc.name == name)
    }

    /// 迭代
    pub fn iter(&self) -> std::slice::Iter<'_, BoundaryCondition> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, BoundaryCondition> {
        self.items.iter_mut()
    }

    /// 边界条件个数
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 边界面位置 → 边界条件序号
    ///
    /// 未被任何边界条件记录的位置为 `None`。
    pub fn face_to_bc(&self, nbound: usize) -> Vec<Option<usize>> {
        let mut map = vec![None; nbound];
        for (sern, bc) in self.items.iter().enumerate() {
            for &pos in &bc.positions {
                if let Some(slot) = map.get_mut(pos) {
                    *slot = Some(sern);
                }
            }
        }
        map
    }

    /// 移除自动补齐的边界条件并重新编号
    pub(crate) fn remove_synthetic(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|bc| !bc.synthetic);
        for (sern, bc) in self.items.iter_mut().enumerate() {
            bc.sern = sern as i32;
            bc.positions.clear();
        }
        before - self.items.len()
    }
}

impl<'a> IntoIterator for &'a BcList {
    type Item = &'a BoundaryCondition;
    type IntoIter = std::slice::Iter<'a, BoundaryCondition>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_serial() {
        let mut list = BcList::new();
        assert_eq!(list.push(BoundaryCondition::new("wall", BcKind::Wall)), 0);
        assert_eq!(list.push(BoundaryCondition::new("inlet", BcKind::Inlet)), 1);
        assert_eq!(list.get(1).map(|bc| bc.sern()), Some(1));
        assert_eq!(list.find_by_name("wall").map(|bc| bc.kind()), Some(&BcKind::Wall));
        assert!(list.find_by_name("outlet").is_none());
    }

    #[test]
    fn test_remove_synthetic_renumbers() {
        let mut list = BcList::new();
        list.push(BoundaryCondition::synthetic("unspecified", BcKind::Unspecified, vec![1]));
        list.push(BoundaryCondition::new("wall", BcKind::Wall).with_faces([0]));
        assert_eq!(list.remove_synthetic(), 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).map(|bc| bc.sern()), Some(0));
    }

    #[test]
    fn test_face_to_bc() {
        let mut list = BcList::new();
        list.push(BoundaryCondition::new("a", BcKind::Wall).with_faces([4, 2]));
        list.push(BoundaryCondition::new("b", BcKind::Outlet).with_faces([7]));
        for (bc, pos) in list.iter_mut().zip([vec![0, 1], vec![2]]) {
            bc.assign_positions(pos);
        }
        assert_eq!(list.face_to_bc(4), vec![Some(0), Some(0), Some(1), None]);
    }

    #[test]
    fn test_bc_serde_skips_runtime_fields() {
        let bc = BoundaryCondition::new("inlet", BcKind::Inlet).with_faces([3, 5]);
        let json = serde_json::to_string(&bc).unwrap();
        let back: BoundaryCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(back.faces(), &[3, 5]);
        assert_eq!(back.sern(), -1);
        assert!(!back.is_synthetic());
    }
}
