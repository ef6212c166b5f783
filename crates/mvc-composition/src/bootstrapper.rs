//! 应用启动器
//!
//! 按固定顺序执行初始化流水线：扫描组件 → 构建注册表 →
//! 依赖注入 → 构建路由表，然后冻结为可并发调度的应用实例。
//! 流水线单线程执行，冻结点之后两张表不再变更。

use crate::config::FrameworkConfig;
use mvc_common::{
    BootstrapError, BootstrapResult, ComponentProvider, DispatchResult, HttpRequest, ResponseSink,
};
use mvc_container::{
    ComponentCatalog, ComponentRegistry, DependencyResolver, MissingDependencyPolicy,
    RegistryBuilder, ResolutionReport,
};
use mvc_web::{
    BindingMode, DispatchOptions, DispatchOutcome, Dispatcher, InvocationErrorMode, RouteTable,
    RouteTableBuilder,
};
use std::sync::Arc;
use tracing::info;

/// MVC 应用构建器
///
/// 收集组件提供者与框架配置，`build` 执行整个初始化流水线。
#[derive(Debug, Default)]
pub struct MvcApplicationBuilder {
    catalog: ComponentCatalog,
    config: Option<FrameworkConfig>,
}

impl MvcApplicationBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置框架配置
    pub fn with_config(mut self, config: FrameworkConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// 从 TOML 文件加载框架配置
    pub fn with_config_file(mut self, path: impl AsRef<std::path::Path>) -> BootstrapResult<Self> {
        self.config = Some(FrameworkConfig::from_file(path)?);
        Ok(self)
    }

    /// 编目一个组件提供者
    pub fn register(mut self, provider: ComponentProvider) -> BootstrapResult<Self> {
        self.catalog.register(provider)?;
        Ok(self)
    }

    /// 执行初始化流水线并冻结应用
    ///
    /// 任一启动阶段失败即整体终止，不产生部分初始化的应用。
    pub fn build(self) -> BootstrapResult<MvcApplication> {
        let config = self.config.ok_or(BootstrapError::MissingConfig)?;
        info!("初始化 MVC 框架, 扫描根: {}", config.scan_package);

        // 1. 扫描候选组件
        let candidates = self.catalog.scan(&config.scan_package)?;
        info!("扫描完成, 发现 {} 个候选组件", candidates.len());

        // 2. 实例化候选并构建注册表
        let registry = RegistryBuilder::new().build(&self.catalog, &candidates)?;
        info!("注册表构建完成, 共 {} 个键", registry.len());

        // 3. 依赖注入
        let policy = if config.strict_dependencies {
            MissingDependencyPolicy::Strict
        } else {
            MissingDependencyPolicy::Lenient
        };
        let resolution = DependencyResolver::new(policy).resolve(&registry)?;

        // 4. 构建路由表
        let routes = RouteTableBuilder::new().build(&registry)?;
        info!("路由表构建完成, 共 {} 条路径", routes.len());

        // 冻结点：此后两张表只读共享
        let registry = Arc::new(registry);
        let routes = Arc::new(routes);
        let options = DispatchOptions {
            binding: if config.legacy_param_binding {
                BindingMode::LegacyLastValue
            } else {
                BindingMode::NameMatched
            },
            on_error: if config.legacy_silent_errors {
                InvocationErrorMode::LegacySilent
            } else {
                InvocationErrorMode::Respond
            },
        };
        let dispatcher = Dispatcher::new(registry.clone(), routes.clone(), options);

        info!("MVC 框架初始化完成");
        Ok(MvcApplication {
            registry,
            routes,
            dispatcher,
            resolution,
        })
    }
}

/// 冻结后的 MVC 应用
///
/// 注册表与路由表在此后只读，可被多个并发请求共享调度。
pub struct MvcApplication {
    registry: Arc<ComponentRegistry>,
    routes: Arc<RouteTable>,
    dispatcher: Dispatcher,
    resolution: ResolutionReport,
}

impl MvcApplication {
    /// 创建应用构建器
    pub fn builder() -> MvcApplicationBuilder {
        MvcApplicationBuilder::new()
    }

    /// 调度一次入站请求
    pub async fn dispatch(
        &self,
        request: &HttpRequest,
        response: &dyn ResponseSink,
    ) -> DispatchResult<DispatchOutcome> {
        self.dispatcher.dispatch(request, response).await
    }

    /// 组件注册表（只读）
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// 路由表（只读）
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// 依赖解析汇总
    pub fn resolution(&self) -> &ResolutionReport {
        &self.resolution
    }
}
