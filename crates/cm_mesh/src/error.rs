// crates/cm_mesh/src/error.rs

//! 网格构建错误类型
//!
//! 错误分类：
//! - 输入数据畸形（类型编号、连接性）
//! - 边界条件引用了非边界面
//! - 数值核函数违反缓冲区合约（致命，指明例程和缓冲区）
//! - 构建阶段调用顺序错误
//!
//! 面数与声明不符不是错误，由重新分配处理；未被认领的边界面也不是错误，
//! 由自动补齐的边界条件处理。所有错误可转换为 [`CmError`] 向上传播。

use cm_foundation::CmError;
use thiserror::Error;

/// 网格模块结果类型
pub type MeshResult<T> = Result<T, MeshError>;

/// 网格错误枚举
#[derive(Error, Debug)]
pub enum MeshError {
    /// 类型编号不在单元类型表内
    #[error("无效单元类型: {entity} {index} 的类型编号 {type_id}")]
    InvalidElementType {
        /// 实体类别（cell/face）
        entity: &'static str,
        /// 实体索引
        index: usize,
        /// 类型编号
        type_id: i32,
    },

    /// 连接性数据畸形
    #[error("连接性错误: {entity} {index}: {message}")]
    MalformedConnectivity {
        /// 实体类别
        entity: &'static str,
        /// 实体索引
        index: usize,
        /// 详细信息
        message: String,
    },

    /// 面被两个以上单元共享
    #[error("非流形面: 节点 {face_nodes:?} 被单元 {cells:?} 共享")]
    NonManifold {
        /// 面节点
        face_nodes: Vec<i32>,
        /// 共享该面的单元
        cells: Vec<i32>,
    },

    /// 边界条件引用了非边界面
    #[error("边界条件 '{bc}' 引用的面 {face} 不是边界面")]
    InvalidBoundaryFace {
        /// 边界条件名称
        bc: String,
        /// 面索引
        face: i32,
    },

    /// 边界面被重复认领
    #[error("边界面 {face} 同时被 '{first_bc}' 和 '{second_bc}' 认领")]
    DuplicateBoundaryFace {
        /// 面索引
        face: i32,
        /// 先认领的边界条件
        first_bc: String,
        /// 后认领的边界条件
        second_bc: String,
    },

    /// 数值核函数违反缓冲区合约
    #[error("核函数合约违规: {routine} 的缓冲区 {buffer} 期望 {expected}, 实际 {actual}")]
    KernelContract {
        /// 例程名
        routine: &'static str,
        /// 缓冲区名
        buffer: &'static str,
        /// 期望值（长度或上界）
        expected: usize,
        /// 实际值
        actual: usize,
    },

    /// 构建阶段调用顺序错误
    #[error("构建阶段错误: 当前阶段 {stage} 不允许调用 {operation}")]
    StageViolation {
        /// 调用的操作
        operation: &'static str,
        /// 当前阶段
        stage: &'static str,
    },

    /// 网格定义文件错误
    #[error("网格定义格式错误: {0}")]
    Format(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl MeshError {
    /// 无效单元类型
    pub fn invalid_element_type(entity: &'static str, index: usize, type_id: i32) -> Self {
        Self::InvalidElementType {
            entity,
            index,
            type_id,
        }
    }

    /// 连接性畸形
    pub fn malformed(entity: &'static str, index: usize, message: impl Into<String>) -> Self {
        Self::MalformedConnectivity {
            entity,
            index,
            message: message.into(),
        }
    }

    /// 核函数合约违规
    pub fn kernel_contract(
        routine: &'static str,
        buffer: &'static str,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::KernelContract {
            routine,
            buffer,
            expected,
            actual,
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// 检查缓冲区长度是否符合合约
    #[inline]
    pub fn check_buffer(
        routine: &'static str,
        buffer: &'static str,
        expected: usize,
        actual: usize,
    ) -> MeshResult<()> {
        if expected != actual {
            Err(Self::kernel_contract(routine, buffer, expected, actual))
        } else {
            Ok(())
        }
    }
}

/// 转换到 Foundation 层错误
impl From<MeshError> for CmError {
    fn from(err: MeshError) -> Self {
        match err {
            MeshError::Io(source) => CmError::io_with_source("网格 IO", source),
            MeshError::Format(message) => CmError::serialization(message),
            MeshError::KernelContract { routine, buffer, expected, actual } => CmError::internal(
                format!("核函数 {} 缓冲区 {}: 期望 {}, 实际 {}", routine, buffer, expected, actual),
            ),
            MeshError::Internal(message) => CmError::internal(message),
            other => CmError::invalid_mesh(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for MeshError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}
