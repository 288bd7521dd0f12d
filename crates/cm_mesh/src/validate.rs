// crates/cm_mesh/src/validate.rs

//! 网格块一致性检查
//!
//! 检查项：
//! - 类型编号在单元类型表内；
//! - 变长列表计数槽与有效元素个数一致，计数之后的槽为 `-1`；
//! - 连接性索引落在 `[-幽灵数, 内部数)`；
//! - 内部面的 owner 非负；
//! - 共享数组幽灵区行数与边界面数一致；
//! - 声明的边界条件至少认领一个边界面（否则为警告）；
//! - 坐标/度量有限，面积和体积为正（非正为警告）。
//!
//! 幽灵行中 `-1` 是合法的相对索引（第 0 个幽灵实体），因此
//! "非 -1 元素个数等于计数"只对内部行检查。

use cm_foundation::validation::{check_finite, check_positive};
use cm_foundation::{ScalarOps, ValidationError, ValidationReport, ValidationWarning};

use crate::block::{Block, BuildStage};
use crate::elemtype::ElementType;
use crate::shared::SharedArray;

impl<S: ScalarOps> Block<S> {
    /// 检查网格块一致性
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        check_types(&mut report, "cltpn", &self.cltpn);
        check_list(&mut report, "clnds", &self.clnds, &self.ndcrd);
        check_coords(&mut report, "ndcrd", &self.ndcrd);

        if self.stage >= BuildStage::Interior {
            check_types(&mut report, "fctpn", &self.fctpn);
            check_list(&mut report, "fcnds", &self.fcnds, &self.ndcrd);
            check_list(&mut report, "clfcs", &self.clfcs, &self.fcnds);
            for ifc in 0..self.nface() {
                let owner = self.fccls.interior_row(ifc)[0];
                if owner < 0 {
                    report.add_error(ValidationError::NegativeOwner { face: ifc, owner });
                }
            }
            check_coords(&mut report, "fccnd", &self.fccnd);
            check_coords(&mut report, "clcnd", &self.clcnd);
            for (ifc, &area) in self.fcara.interior().iter().enumerate() {
                if check_finite(&mut report, "fcara", ifc, area.to_f64()) {
                    check_positive(&mut report, "fcara", ifc, area.to_f64());
                }
            }
            for (icl, &vol) in self.clvol.interior().iter().enumerate() {
                if check_finite(&mut report, "clvol", icl, vol.to_f64()) {
                    check_positive(&mut report, "clvol", icl, vol.to_f64());
                }
            }
        }

        if self.stage >= BuildStage::Boundary {
            report.merge(self.check_boundary_conditions());
        }
        if self.stage == BuildStage::Ghost {
            report.merge(self.check_ghost_regions());
        }

        report
    }

    fn check_boundary_conditions(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        for bc in self.bclist.iter().filter(|bc| !bc.is_synthetic() && bc.is_empty()) {
            report.add_warning(ValidationWarning::Custom {
                message: format!("边界条件 '{}' 未认领任何边界面", bc.name()),
            });
        }
        report
    }

    fn check_ghost_regions(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        let nbound = self.nbound();
        for (name, actual) in [
            ("shcltpn", self.cltpn.n_ghost()),
            ("shclgrp", self.clgrp.n_ghost()),
            ("shclnds", self.clnds.n_ghost()),
            ("shclfcs", self.clfcs.n_ghost()),
            ("shclcnd", self.clcnd.n_ghost()),
            ("shclvol", self.clvol.n_ghost()),
        ] {
            if actual != nbound {
                report.add_error(ValidationError::RegionSizeMismatch {
                    array: name,
                    expected: nbound,
                    actual,
                });
            }
        }
        let ngstface = self.ngstface();
        for (name, arr) in [("shfcnds", &self.fcnds), ("shfccls", &self.fccls)] {
            if arr.n_ghost() != ngstface {
                report.add_error(ValidationError::RegionSizeMismatch {
                    array: name,
                    expected: ngstface,
                    actual: arr.n_ghost(),
                });
            }
        }
        report
    }
}

fn check_types(report: &mut ValidationReport, array: &'static str, types: &SharedArray<i32>) {
    for (pos, &id) in types.as_slice().iter().enumerate() {
        if ElementType::from_id(id).is_none() {
            report.add_error(ValidationError::InvalidTypeId {
                array,
                row: pos,
                type_id: id,
            });
        }
    }
}

/// 检查变长列表；`target` 为被索引的实体数组（决定合法索引范围）
fn check_list<T>(
    report: &mut ValidationReport,
    array: &'static str,
    list: &SharedArray<i32>,
    target: &SharedArray<T>,
) where
    T: Copy,
{
    let min = -(target.n_ghost() as i64);
    let max = target.n_interior() as i64;
    let ghost = list.n_ghost();
    for pos in 0..list.n_total() {
        let row = list.row(pos);
        let count = row[0];
        if count < 0 || count as usize >= row.len() {
            report.add_error(ValidationError::CountSlotMismatch {
                array,
                row: pos,
                count,
                actual: row[1..].iter().filter(|&&v| v != -1).count(),
            });
            continue;
        }
        let (used, unused) = row[1..].split_at(count as usize);
        if pos >= ghost {
            let actual = row[1..].iter().filter(|&&v| v != -1).count();
            if actual != count as usize {
                report.add_error(ValidationError::CountSlotMismatch {
                    array,
                    row: pos,
                    count,
                    actual,
                });
            }
        } else if unused.iter().any(|&v| v != -1) {
            report.add_error(ValidationError::CountSlotMismatch {
                array,
                row: pos,
                count,
                actual: count as usize + unused.iter().filter(|&&v| v != -1).count(),
            });
        }
        for &value in used {
            let v = value as i64;
            if v < min || v >= max {
                report.add_error(ValidationError::IndexOutOfRange {
                    array,
                    row: pos,
                    value,
                    min,
                    max,
                });
            }
        }
    }
}

fn check_coords<S: ScalarOps>(report: &mut ValidationReport, array: &'static str, arr: &SharedArray<S>) {
    for pos in 0..arr.n_total() {
        for &v in arr.row(pos) {
            if !check_finite(report, array, pos, v.to_f64()) {
                break;
            }
        }
    }
}
