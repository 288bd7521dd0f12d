// crates/cm_config/src/build_config.rs

//! BuildConfig - 网格块构建配置
//!
//! 以显式类型树描述构建参数，每一层通过 `#[serde(default)]`
//! 合并默认值，缺省字段不必出现在 JSON 中。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::ConfigError;
use crate::precision::Precision;

/// 网格块构建配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BuildConfig {
    /// 浮点数组精度
    #[serde(default)]
    pub precision: Precision,

    /// 边界面分类配置
    #[serde(default)]
    pub boundary: BoundaryConfig,

    /// 幽灵单元配置
    #[serde(default)]
    pub ghost: GhostConfig,
}

/// 边界条件类型标识
///
/// 求解器只通过“边界面索引 -> 类型标识”映射消费该值。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BcKind {
    /// 未指定（自动补齐的边界面）
    #[default]
    Unspecified,
    /// 滑移固壁
    Wall,
    /// 无滑移固壁
    NonSlipWall,
    /// 入流
    Inlet,
    /// 出流
    Outlet,
    /// 对称面
    Symmetry,
    /// 周期
    Periodic,
    /// 用户自定义类型
    Custom(String),
}

impl BcKind {
    /// 类型名称
    pub fn name(&self) -> &str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Wall => "wall",
            Self::NonSlipWall => "non_slip_wall",
            Self::Inlet => "inlet",
            Self::Outlet => "outlet",
            Self::Symmetry => "symmetry",
            Self::Periodic => "periodic",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for BcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 边界面分类配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    /// 自动补齐边界条件的名称
    #[serde(default = "default_unspecified_name")]
    pub unspecified_name: String,

    /// 自动补齐边界条件的类型
    #[serde(default)]
    pub unspecified_kind: BcKind,

    /// 严格模式：边界条件引用非边界面时报错；关闭时跳过该引用并告警
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_unspecified_name() -> String { "unspecified".to_string() }
fn default_strict() -> bool { true }

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            unspecified_name: default_unspecified_name(),
            unspecified_kind: BcKind::default(),
            strict: default_strict(),
        }
    }
}

/// 幽灵单元配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostConfig {
    /// 是否构建幽灵单元
    #[serde(default = "default_ghost_enabled")]
    pub enabled: bool,
}

fn default_ghost_enabled() -> bool { true }

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            enabled: default_ghost_enabled(),
        }
    }
}

impl BuildConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: BuildConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.boundary.unspecified_name.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "boundary.unspecified_name",
                self.boundary.unspecified_name.clone(),
                "名称不能为空",
            ));
        }
        if let BcKind::Custom(name) = &self.boundary.unspecified_kind {
            if name.trim().is_empty() {
                return Err(ConfigError::invalid_value(
                    "boundary.unspecified_kind",
                    name.clone(),
                    "自定义类型名称不能为空",
                ));
            }
        }
        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.precision, Precision::F64);
        assert_eq!(config.boundary.unspecified_name, "unspecified");
        assert!(config.boundary.strict);
        assert!(config.ghost.enabled);
    }

    #[test]
    fn test_partial_json_merges_defaults() {
        let config =
            BuildConfig::from_json(r#"{"precision": "f32", "boundary": {"strict": false}}"#)
                .unwrap();
        assert_eq!(config.precision, Precision::F32);
        assert!(!config.boundary.strict);
        assert_eq!(config.boundary.unspecified_name, "unspecified");
        assert!(config.ghost.enabled);
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = BuildConfig::from_json(r#"{"boundary": {"unspecified_name": " "}}"#);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_custom_kind() {
        let config =
            BuildConfig::from_json(r#"{"boundary": {"unspecified_kind": {"custom": "farfield"}}}"#)
                .unwrap();
        assert_eq!(config.boundary.unspecified_kind.name(), "farfield");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.json");

        let mut config = BuildConfig::default();
        config.boundary.unspecified_kind = BcKind::Wall;
        config.save_to_file(&path).unwrap();

        let loaded = BuildConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
