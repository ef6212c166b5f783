//! # 组件容器
//!
//! 初始化流水线的前三个阶段：
//!
//! - [`ComponentCatalog`] - 组件目录，按命名空间枚举候选类型
//! - [`RegistryBuilder`] / [`ComponentRegistry`] - 实例化候选并建立名称键注册表
//! - [`DependencyResolver`] - 为注册实例填充声明的依赖槽位
//!
//! 三个阶段严格顺序执行，完成后注册表冻结为只读。

pub mod catalog;
pub mod registry;
pub mod resolver;

pub use catalog::*;
pub use registry::*;
pub use resolver::*;
