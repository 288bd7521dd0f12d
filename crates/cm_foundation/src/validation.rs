// crates/cm_foundation/src/validation.rs

//! 运行时验证工具
//!
//! 提供验证报告和错误/警告类型，用于网格连接性与度量数据的一致性检查。
//!
//! # 示例
//!
//! ```
//! use cm_foundation::validation::{ValidationReport, ValidationError};
//!
//! let mut report = ValidationReport::new();
//! report.add_error(ValidationError::NegativeOwner { face: 3, owner: -1 });
//! assert!(!report.is_valid());
//! ```

use std::fmt;

/// 验证报告
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// 错误列表
    pub errors: Vec<ValidationError>,
    /// 警告列表
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// 创建空的验证报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加错误
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 是否有警告
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 错误数量
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// 警告数量
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// 是否通过（无错误）
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// 合并另一个报告
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "验证报告:")?;
        writeln!(f, "  错误: {} 个", self.error_count())?;
        writeln!(f, "  警告: {} 个", self.warning_count())?;

        if self.has_errors() {
            writeln!(f, "\n错误详情:")?;
            for (i, err) in self.errors.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, err)?;
            }
        }

        if self.has_warnings() {
            writeln!(f, "\n警告详情:")?;
            for (i, warn) in self.warnings.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, warn)?;
            }
        }

        Ok(())
    }
}

/// 验证错误类型
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// 变长列表的计数槽与非哨兵元素个数不一致
    CountSlotMismatch {
        /// 数组名称
        array: &'static str,
        /// 行号
        row: usize,
        /// 计数槽中的值
        count: i32,
        /// 实际非哨兵元素个数
        actual: usize,
    },
    /// 面的 owner 为负
    NegativeOwner {
        /// 面索引
        face: usize,
        /// owner 值
        owner: i32,
    },
    /// 类型编号不在单元类型表内
    InvalidTypeId {
        /// 数组名称
        array: &'static str,
        /// 行号
        row: usize,
        /// 类型编号
        type_id: i32,
    },
    /// 连接性索引越界
    IndexOutOfRange {
        /// 数组名称
        array: &'static str,
        /// 行号
        row: usize,
        /// 索引值
        value: i32,
        /// 合法下界（含）
        min: i64,
        /// 合法上界（不含）
        max: i64,
    },
    /// 共享数组长度与幽灵/内部计数不一致
    RegionSizeMismatch {
        /// 数组名称
        array: &'static str,
        /// 期望行数
        expected: usize,
        /// 实际行数
        actual: usize,
    },
    /// 非有限值
    NonFinite {
        /// 数组名称
        array: &'static str,
        /// 行号
        row: usize,
        /// 非有限的数值
        value: f64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountSlotMismatch {
                array,
                row,
                count,
                actual,
            } => write!(
                f,
                "{}[{}]: 计数槽={} 但非哨兵元素个数={}",
                array, row, count, actual
            ),
            Self::NegativeOwner { face, owner } => {
                write!(f, "面{}: owner={} 为负", face, owner)
            }
            Self::InvalidTypeId {
                array,
                row,
                type_id,
            } => write!(f, "{}[{}]: 无效类型编号 {}", array, row, type_id),
            Self::IndexOutOfRange {
                array,
                row,
                value,
                min,
                max,
            } => write!(
                f,
                "{}[{}]: 索引 {} 超出范围[{}, {})",
                array, row, value, min, max
            ),
            Self::RegionSizeMismatch {
                array,
                expected,
                actual,
            } => write!(f, "{}: 期望{}行, 实际{}行", array, expected, actual),
            Self::NonFinite { array, row, value } => {
                write!(f, "{}[{}]={} (非有限值)", array, row, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 验证警告类型
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    /// 面积或体积非正
    NonPositiveMeasure {
        /// 数组名称
        array: &'static str,
        /// 行号
        row: usize,
        /// 实际值
        value: f64,
    },
    /// 自定义警告
    Custom {
        /// 自定义消息
        message: String,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMeasure { array, row, value } => {
                write!(f, "{}[{}]={} 非正", array, row, value)
            }
            Self::Custom { message } => write!(f, "{}", message),
        }
    }
}

// ============================================================================
// 验证辅助函数
// ============================================================================

/// 检查值是否有限
pub fn check_finite(
    report: &mut ValidationReport,
    array: &'static str,
    row: usize,
    value: f64,
) -> bool {
    if !value.is_finite() {
        report.add_error(ValidationError::NonFinite { array, row, value });
        false
    } else {
        true
    }
}

/// 检查面积/体积是否为正，非正时添加警告
pub fn check_positive(
    report: &mut ValidationReport,
    array: &'static str,
    row: usize,
    value: f64,
) -> bool {
    if value <= 0.0 {
        report.add_warning(ValidationWarning::NonPositiveMeasure { array, row, value });
        false
    } else {
        true
    }
}
