//! 演示处理器
//!
//! 基础路径 `/demo` 下暴露三个方法：
//! `/demo/query.json`、`/demo/add.json` 与 `/demo/remove.json`。

use crate::service::GreetingService;
use async_trait::async_trait;
use mvc_common::{
    BoundArg, ComponentDescriptor, ComponentProvider, ConstructedComponent, DependencyError,
    DependencySlot, HttpRequest, InjectTarget, InvocationError, ParameterBinding, RequestHandler,
    ResponseSink, RouteSpec, SharedComponent,
};
use std::sync::{Arc, OnceLock};

/// 演示处理器
///
/// 注入槽位在依赖解析阶段填充一次，此后只读。
#[derive(Default)]
pub struct DemoHandler {
    greeting_service: OnceLock<Arc<dyn GreetingService>>,
}

impl DemoHandler {
    fn greeting_service(&self) -> Result<&Arc<dyn GreetingService>, InvocationError> {
        self.greeting_service
            .get()
            .ok_or_else(|| InvocationError::new("greeting_service 未注入"))
    }

    /// 取出指定位置的文本参数
    fn text_arg<'a>(args: &'a [BoundArg], index: usize) -> Result<&'a str, InvocationError> {
        args.get(index)
            .and_then(BoundArg::as_text)
            .ok_or_else(|| InvocationError::new(format!("参数位置 {index} 不是文本值")))
    }

    fn numeric_arg(args: &[BoundArg], index: usize) -> Result<i64, InvocationError> {
        let text = Self::text_arg(args, index)?;
        text.parse()
            .map_err(|e| InvocationError::with_source(format!("参数 {text:?} 不是数字"), e))
    }
}

impl InjectTarget for DemoHandler {
    fn assign(&self, slot: &str, dependency: SharedComponent) -> Result<(), DependencyError> {
        match slot {
            "greeting_service" => {
                let service = dependency
                    .downcast_ref::<Arc<dyn GreetingService>>()
                    .cloned()
                    .ok_or_else(|| DependencyError::TypeMismatch {
                        slot: slot.to_string(),
                        expected: "demo::service::GreetingService".to_string(),
                    })?;
                self.greeting_service
                    .set(service)
                    .map_err(|_| DependencyError::SlotAlreadyFilled {
                        slot: slot.to_string(),
                    })
            }
            _ => Err(DependencyError::UnknownSlot {
                slot: slot.to_string(),
            }),
        }
    }
}

#[async_trait]
impl RequestHandler for DemoHandler {
    async fn invoke(
        &self,
        method: &str,
        _request: &HttpRequest,
        response: &dyn ResponseSink,
        args: &[BoundArg],
    ) -> Result<(), InvocationError> {
        match method {
            "query" => {
                let name = Self::text_arg(args, 2)?;
                let result = self.greeting_service()?.get(name);
                response
                    .write(&result)
                    .map_err(|e| InvocationError::with_source("响应写出失败", e))
            }
            "add" => {
                let a = Self::numeric_arg(args, 2)?;
                let b = Self::numeric_arg(args, 3)?;
                response
                    .write(&format!("{a} + {b} = {}", a + b))
                    .map_err(|e| InvocationError::with_source("响应写出失败", e))
            }
            // 与原始演示保持一致：删除方法不写出任何内容
            "remove" => Ok(()),
            other => Err(InvocationError::new(format!("未知方法: {other}"))),
        }
    }
}

/// 演示处理器的组件提供者
pub fn demo_handler_provider() -> ComponentProvider {
    let descriptor = ComponentDescriptor::handler("demo::web::DemoHandler")
        .with_base_path("/demo")
        .with_dependency(DependencySlot::new(
            "greeting_service",
            "demo::service::GreetingService",
        ))
        .with_route(
            RouteSpec::new("/query.json", "query")
                .with_param(ParameterBinding::Request)
                .with_param(ParameterBinding::Response)
                .with_param(ParameterBinding::query("name")),
        )
        .with_route(
            RouteSpec::new("/add.json", "add")
                .with_param(ParameterBinding::Request)
                .with_param(ParameterBinding::Response)
                .with_param(ParameterBinding::query("a"))
                .with_param(ParameterBinding::query("b")),
        )
        .with_route(
            RouteSpec::new("/remove.json", "remove")
                .with_param(ParameterBinding::Request)
                .with_param(ParameterBinding::Response)
                .with_param(ParameterBinding::query("id")),
        );

    ComponentProvider::new(descriptor, || {
        let handler = Arc::new(DemoHandler::default());
        Ok(ConstructedComponent::new(handler.clone())
            .with_injector(handler.clone())
            .with_handler(handler))
    })
}
