//! 组件描述符与组件提供者定义
//!
//! 框架不依赖运行时反射：每个组件以描述符数据显式声明自身的
//! 角色、注册键、依赖槽位和路由信息，并附带一个构造闭包。

use crate::errors::{DependencyError, InstantiationError};
use crate::handler::RequestHandler;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// 共享组件实例
///
/// 注册表中每个键对应的导出值。canonical 键下内部为 `Arc<具体类型>`，
/// 能力别名键下内部为 `Arc<dyn 能力 trait>`，两者指向同一实例。
pub type SharedComponent = Arc<dyn Any + Send + Sync>;

/// 组件角色
///
/// 三种角色互斥。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentRole {
    /// 请求处理器：仅注册 canonical 键，不做别名展开
    Handler,
    /// 服务组件：注册 canonical 键（或显式覆盖名）及全部能力别名
    Service,
    /// 普通类型：不参与注册
    Plain,
}

/// 依赖槽位声明
///
/// 只有显式声明的槽位才会被依赖解析器填充，未声明的字段不被触碰。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySlot {
    /// 槽位名称
    pub slot: String,
    /// 目标类型标识（全限定名）
    pub target_type: String,
    /// 显式覆盖的注册键
    pub qualifier: Option<String>,
}

impl DependencySlot {
    /// 创建新的依赖槽位
    pub fn new(slot: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            target_type: target_type.into(),
            qualifier: None,
        }
    }

    /// 设置显式覆盖的注册键
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// 该槽位使用的注册表查找键
    ///
    /// 显式覆盖名优先，否则使用目标类型标识。
    pub fn resolution_key(&self) -> &str {
        self.qualifier.as_deref().unwrap_or(&self.target_type)
    }
}

/// 参数绑定来源
///
/// 处理器方法每个位置参数的取值来源。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterBinding {
    /// 绑定请求对象
    Request,
    /// 绑定响应写出器
    Response,
    /// 绑定命名查询参数
    Query { name: String },
}

impl ParameterBinding {
    /// 创建命名查询参数绑定
    pub fn query(name: impl Into<String>) -> Self {
        Self::Query { name: name.into() }
    }
}

/// 路由声明
///
/// 方法级路径片段与其参数绑定列表。未声明路由的方法不会被暴露。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    /// 路径片段，与处理器基础路径组合成完整路径
    pub fragment: String,
    /// 方法标识
    pub method: String,
    /// 按声明顺序排列的参数绑定列表
    pub params: Vec<ParameterBinding>,
}

impl RouteSpec {
    /// 创建新的路由声明
    pub fn new(fragment: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            method: method.into(),
            params: Vec::new(),
        }
    }

    /// 追加一个参数绑定
    pub fn with_param(mut self, param: ParameterBinding) -> Self {
        self.params.push(param);
        self
    }
}

/// 组件描述符
///
/// 在编目阶段创建，之后不可变。
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    /// 全限定类型名，以 `::` 分段
    pub type_name: String,
    /// 组件角色
    pub role: ComponentRole,
    /// 显式覆盖的注册键（仅 Service 角色生效）
    pub bean_name: Option<String>,
    /// 声明的依赖槽位
    pub dependencies: Vec<DependencySlot>,
    /// 处理器基础路径
    pub base_path: Option<String>,
    /// 处理器路由声明
    pub routes: Vec<RouteSpec>,
}

impl ComponentDescriptor {
    /// 创建新的组件描述符
    pub fn new(type_name: impl Into<String>, role: ComponentRole) -> Self {
        Self {
            type_name: type_name.into(),
            role,
            bean_name: None,
            dependencies: Vec::new(),
            base_path: None,
            routes: Vec::new(),
        }
    }

    /// 创建 Handler 角色描述符
    pub fn handler(type_name: impl Into<String>) -> Self {
        Self::new(type_name, ComponentRole::Handler)
    }

    /// 创建 Service 角色描述符
    pub fn service(type_name: impl Into<String>) -> Self {
        Self::new(type_name, ComponentRole::Service)
    }

    /// 创建无角色描述符
    pub fn plain(type_name: impl Into<String>) -> Self {
        Self::new(type_name, ComponentRole::Plain)
    }

    /// 设置显式覆盖的注册键
    pub fn with_bean_name(mut self, name: impl Into<String>) -> Self {
        self.bean_name = Some(name.into());
        self
    }

    /// 追加一个依赖槽位声明
    pub fn with_dependency(mut self, slot: DependencySlot) -> Self {
        self.dependencies.push(slot);
        self
    }

    /// 设置处理器基础路径
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// 追加一个路由声明
    pub fn with_route(mut self, route: RouteSpec) -> Self {
        self.routes.push(route);
        self
    }

    /// 简单类型名（最后一个 `::` 分段）
    pub fn simple_name(&self) -> &str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.type_name)
    }

    /// 默认注册键：首字母小写的简单类型名
    pub fn canonical_key(&self) -> String {
        let simple = self.simple_name();
        let mut chars = simple.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// 依赖注入目标
///
/// 支持注入的组件实现此 trait，解析器通过 [`assign`](Self::assign)
/// 完成 setter 注入。注入值是注册表条目的共享引用，不转移所有权。
pub trait InjectTarget: Send + Sync {
    /// 将注册表条目赋给指定槽位
    fn assign(&self, slot: &str, dependency: SharedComponent) -> Result<(), DependencyError>;
}

/// 构造完成的组件
///
/// 同一实例的多个视图：canonical 导出、注入视图、处理器视图
/// 以及能力别名导出。所有视图共享同一份实例。
#[derive(Clone)]
pub struct ConstructedComponent {
    /// canonical 键下的导出值
    pub instance: SharedComponent,
    /// 注入视图
    pub injector: Option<Arc<dyn InjectTarget>>,
    /// 处理器视图
    pub handler: Option<Arc<dyn RequestHandler>>,
    /// 能力别名导出（确定顺序）
    pub capabilities: BTreeMap<String, SharedComponent>,
}

impl ConstructedComponent {
    /// 以具体实例创建
    ///
    /// canonical 导出内部为传入的 `Arc<T>`。
    pub fn new<T>(instance: Arc<T>) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            instance: Arc::new(instance),
            injector: None,
            handler: None,
            capabilities: BTreeMap::new(),
        }
    }

    /// 设置注入视图
    pub fn with_injector(mut self, injector: Arc<dyn InjectTarget>) -> Self {
        self.injector = Some(injector);
        self
    }

    /// 设置处理器视图
    pub fn with_handler(mut self, handler: Arc<dyn RequestHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// 登记一个能力别名导出
    ///
    /// `exported` 通常是 `Arc<dyn 能力 trait>`，与实例共享所有权。
    pub fn with_capability<E>(mut self, name: impl Into<String>, exported: E) -> Self
    where
        E: Any + Send + Sync,
    {
        self.capabilities.insert(name.into(), Arc::new(exported));
        self
    }
}

impl fmt::Debug for ConstructedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructedComponent")
            .field("injectable", &self.injector.is_some())
            .field("handler", &self.handler.is_some())
            .field("capabilities", &self.capabilities.keys())
            .finish()
    }
}

/// 组件构造函数类型
pub type ConstructorFn =
    Arc<dyn Fn() -> Result<ConstructedComponent, InstantiationError> + Send + Sync>;

/// 组件提供者
///
/// 描述符加构造闭包，是反射式组件发现的显式替代。
#[derive(Clone)]
pub struct ComponentProvider {
    /// 组件描述符
    pub descriptor: ComponentDescriptor,
    constructor: ConstructorFn,
}

impl ComponentProvider {
    /// 创建新的组件提供者
    pub fn new<F>(descriptor: ComponentDescriptor, constructor: F) -> Self
    where
        F: Fn() -> Result<ConstructedComponent, InstantiationError> + Send + Sync + 'static,
    {
        Self {
            descriptor,
            constructor: Arc::new(constructor),
        }
    }

    /// 尝试构造组件实例
    pub fn construct(&self) -> Result<ConstructedComponent, InstantiationError> {
        (self.constructor)()
    }
}

impl fmt::Debug for ComponentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentProvider")
            .field("descriptor", &self.descriptor)
            .field("constructor", &"<function>")
            .finish()
    }
}
