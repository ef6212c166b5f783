//! 框架配置加载
//!
//! 运行时配置面只有一个必填键：组件扫描根命名空间；
//! 其余为严格模式与旧行为兼容开关。

use mvc_common::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// 框架配置
#[derive(Debug, Clone, Deserialize)]
pub struct FrameworkConfig {
    /// 组件扫描根命名空间（必填）
    #[serde(default)]
    pub scan_package: String,

    /// 依赖缺失是否视为致命启动错误
    #[serde(default)]
    pub strict_dependencies: bool,

    /// 兼容旧实现的查询参数绑定（每个文本槽位取参数包最后一项）
    #[serde(default)]
    pub legacy_param_binding: bool,

    /// 兼容旧实现的静默调用错误（不写出 500 响应体）
    #[serde(default)]
    pub legacy_silent_errors: bool,
}

impl FrameworkConfig {
    /// 以扫描根创建默认配置
    pub fn new(scan_package: impl Into<String>) -> Self {
        Self {
            scan_package: scan_package.into(),
            strict_dependencies: false,
            legacy_param_binding: false,
            legacy_silent_errors: false,
        }
    }

    /// 从 TOML 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        debug!("加载配置文件: {}", path.as_ref().display());
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })?;
        config.validate()
    }

    /// 校验必填键
    fn validate(self) -> ConfigResult<Self> {
        if self.scan_package.trim().is_empty() {
            return Err(ConfigError::KeyNotFound {
                key: "scan_package".to_string(),
            });
        }
        Ok(self)
    }
}
