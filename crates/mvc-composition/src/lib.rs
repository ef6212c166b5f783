//! # 组合层
//!
//! 负责将容器与 Web 层组合成一个完整的、可服务请求的应用。
//!
//! ## 主要功能
//!
//! - [`FrameworkConfig`] - 框架配置加载（扫描根与兼容性开关）
//! - [`MvcApplicationBuilder`] - 按固定顺序执行初始化流水线
//! - [`MvcApplication`] - 冻结后的应用实例，可并发调度请求
//!
//! 初始化严格顺序执行：加载配置 → 扫描组件 → 构建注册表 →
//! 依赖注入 → 构建路由表。任一启动阶段失败即整体终止。

pub mod bootstrapper;
pub mod config;

pub use bootstrapper::{MvcApplication, MvcApplicationBuilder};
pub use config::FrameworkConfig;

// 重新导出错误类型
pub use mvc_common::BootstrapError;
