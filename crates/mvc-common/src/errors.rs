//! 错误类型定义
//!
//! 启动期错误一律致命并终止初始化流水线；单请求错误只降级为
//! 当次请求的错误响应，绝不影响服务循环。

use thiserror::Error;

/// 配置错误类型（致命，终止启动）
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置键缺失: {key}")]
    KeyNotFound { key: String },
}

/// 组件扫描错误类型（致命，终止启动）
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("扫描根命名空间无法解析: {namespace}")]
    RootNotFound { namespace: String },

    #[error("候选类型重复编目: {type_name}")]
    DuplicateCandidate { type_name: String },
}

/// 组件实例化错误（按候选恢复：记录日志并跳过该候选）
#[derive(Error, Debug)]
#[error("组件构造失败: {type_name}, 原因: {message}")]
pub struct InstantiationError {
    /// 候选类型全限定名
    pub type_name: String,
    /// 失败原因
    pub message: String,
}

impl InstantiationError {
    /// 创建新的实例化错误
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// 注册表错误类型（致命，终止启动）
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("重复绑定: 键 {key} 已被 {existing} 占用, 候选 {candidate} 无法注册")]
    DuplicateBinding {
        key: String,
        existing: String,
        candidate: String,
    },

    #[error("候选类型未编目: {type_name}")]
    UnknownCandidate { type_name: String },
}

/// 依赖解析错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("依赖缺失: 组件 {component} 的槽位 {slot} 找不到键 {key}")]
    MissingDependency {
        component: String,
        slot: String,
        key: String,
    },

    #[error("依赖类型不匹配: 槽位 {slot} 期望 {expected}")]
    TypeMismatch { slot: String, expected: String },

    #[error("槽位未声明: {slot}")]
    UnknownSlot { slot: String },

    #[error("槽位已填充: {slot}")]
    SlotAlreadyFilled { slot: String },

    #[error("组件未实现注入接口: {component}")]
    NotInjectable { component: String },
}

/// 路由表构建错误类型（致命，终止启动）
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("路由路径重复注册: {path}, 已有 {existing}, 新增 {candidate}")]
    DuplicateRoute {
        path: String,
        existing: String,
        candidate: String,
    },
}

/// 处理器调用错误（单请求可恢复）
#[derive(Error, Debug)]
#[error("处理器调用失败: {message}")]
pub struct InvocationError {
    /// 错误说明
    pub message: String,
    /// 底层原因
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl InvocationError {
    /// 创建新的调用错误
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带底层原因的调用错误
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// 调度错误类型（单请求可恢复）
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("响应写出失败: {source}")]
    WriteFailed {
        #[from]
        source: std::io::Error,
    },

    #[error("路由指向的处理器不存在: {key}")]
    HandlerNotFound { key: String },
}

/// 启动错误聚合类型
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("扫描错误: {source}")]
    Scan {
        #[from]
        source: ScanError,
    },

    #[error("注册表错误: {source}")]
    Registry {
        #[from]
        source: RegistryError,
    },

    #[error("依赖解析错误: {source}")]
    Dependency {
        #[from]
        source: DependencyError,
    },

    #[error("路由表错误: {source}")]
    Route {
        #[from]
        source: RouteError,
    },

    #[error("缺少框架配置")]
    MissingConfig,
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ScanResult<T> = Result<T, ScanError>;
pub type RegistryResult<T> = Result<T, RegistryError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type RouteResult<T> = Result<T, RouteError>;
pub type DispatchResult<T> = Result<T, DispatchError>;
pub type BootstrapResult<T> = Result<T, BootstrapError>;
