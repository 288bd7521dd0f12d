// crates/cm_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 网格构建的细分错误在 `cm_mesh::MeshError` 中定义，跨层传播时归并为
//! 这里的粗粒度分类。
//!
//! # 示例
//!
//! ```
//! use cm_foundation::error::{CmError, CmResult};
//!
//! fn load() -> CmResult<()> {
//!     Err(CmError::invalid_mesh("单元 3 的节点数与类型不符"))
//! }
//! assert!(load().is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type CmResult<T> = Result<T, CmError>;

/// CeseMesh 错误类型
#[derive(Error, Debug)]
pub enum CmError {
    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 无效网格拓扑或输入数据
    #[error("无效的网格: {message}")]
    InvalidMesh {
        /// 具体错误信息
        message: String,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },

    /// 内部错误（程序缺陷或外部例程违约）
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

impl CmError {
    /// 从 IO 错误创建（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 无效网格
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            message: message.into(),
        }
    }

    /// 序列化错误
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CmError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CmError::invalid_mesh("面 7 没有属主");
        assert!(err.to_string().contains("面 7"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "mesh.json");
        let err: CmError = io_err.into();
        assert!(matches!(err, CmError::Io { source: Some(_), .. }));
    }
}
