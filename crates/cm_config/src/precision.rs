// crates/cm_config/src/precision.rs

//! 运行时精度选择
//!
//! 网格块的浮点数组精度由 `Precision` 在构造时选择，
//! 应用层无需写出泛型参数。

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 运行时精度枚举
///
/// # 示例
///
/// ```rust
/// use cm_config::Precision;
///
/// let precision: Precision = "single".parse().unwrap();
/// assert_eq!(precision, Precision::F32);
/// assert_eq!(precision.size_bytes(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// 单精度浮点 (f32)
    F32,
    /// 双精度浮点 (f64)，默认
    #[default]
    F64,
}

impl Precision {
    /// 获取精度名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// 每个标量占用的字节数
    pub fn size_bytes(&self) -> usize {
        match self {
            Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// 由类型名反查精度（`f32`/`f64`）
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "f32" => Some(Self::F32),
            "f64" => Some(Self::F64),
            _ => None,
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 精度解析错误
#[derive(Debug, Clone, thiserror::Error)]
#[error("无效的精度值: '{0}', 期望 'f32' 或 'f64'")]
pub struct PrecisionParseError(String);

impl FromStr for Precision {
    type Err = PrecisionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "f32" | "float" | "single" | "float32" => Ok(Self::F32),
            "f64" | "double" | "float64" => Ok(Self::F64),
            _ => Err(PrecisionParseError(s.to_string())),
        }
    }
}
