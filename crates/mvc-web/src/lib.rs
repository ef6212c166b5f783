//! # Web 层
//!
//! 初始化流水线的最后一个阶段与请求服务路径：
//!
//! - [`RouteTableBuilder`] / [`RouteTable`] - 路径到处理器绑定的只读映射
//! - [`Dispatcher`] - 按请求完成路径规范化、路由查找、参数绑定与调用
//!
//! 路由表构建完成后冻结，调度器对其只读访问，可被并发请求共享。

pub mod dispatcher;
pub mod routing;

pub use dispatcher::*;
pub use routing::*;
