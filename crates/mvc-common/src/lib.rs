//! # MVC 框架公共抽象
//!
//! 定义组件模型与请求边界的核心类型。
//!
//! ## 核心类型
//!
//! - [`ComponentDescriptor`] / [`ComponentProvider`] - 组件的显式声明数据
//! - [`InjectTarget`] - 依赖注入目标接口
//! - [`RequestHandler`] - 请求处理器接口
//! - [`HttpRequest`] / [`ResponseSink`] - 与外部传输协作方的边界
//! - [`errors`] - 错误分类体系

pub mod component;
pub mod errors;
pub mod handler;
pub mod http;

pub use component::*;
pub use errors::*;
pub use handler::*;
pub use http::*;
