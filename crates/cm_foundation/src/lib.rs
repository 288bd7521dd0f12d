// crates/cm_foundation/src/lib.rs

//! CeseMesh Foundation Layer
//!
//! 基础层，提供整个项目共用的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`scalar`]: 精度抽象（`f32`/`f64`）
//! - [`validation`]: 验证报告类型
//!
//! # 设计原则
//!
//! 1. **最少依赖**: 仅依赖 thiserror
//! 2. **精度无关**: 网格数组通过 [`ScalarOps`] 泛型化
//! 3. **快速失败**: 合约违规立即返回错误，不做部分恢复
//!
//! # 示例
//!
//! ```
//! use cm_foundation::{CmError, CmResult, ScalarOps};
//!
//! fn half<S: ScalarOps>(x: S) -> S {
//!     x / S::from_f64(2.0)
//! }
//!
//! fn checked(n: usize) -> CmResult<usize> {
//!     if n < 2 {
//!         return Err(CmError::invalid_mesh("至少需要两个节点"));
//!     }
//!     Ok(n)
//! }
//!
//! assert_eq!(half(3.0f64), 1.5);
//! assert!(checked(1).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod scalar;
pub mod validation;

// 重导出常用类型
pub use error::{CmError, CmResult};
pub use scalar::ScalarOps;
pub use validation::{ValidationError, ValidationReport, ValidationWarning};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{CmError, CmResult};
    pub use crate::scalar::ScalarOps;
    pub use crate::validation::{ValidationError, ValidationReport, ValidationWarning};
}
