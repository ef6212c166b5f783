//! 演示服务层
//!
//! 服务通过能力接口对外暴露，注册表中以接口全限定名建立别名键。

use mvc_common::{ComponentDescriptor, ComponentProvider, ConstructedComponent};
use std::sync::Arc;
use tracing::debug;

/// 问候能力接口
pub trait GreetingService: Send + Sync {
    /// 按名字生成问候内容
    fn get(&self, name: &str) -> String;
}

/// 演示服务实现
#[derive(Debug, Default)]
pub struct DemoService;

impl GreetingService for DemoService {
    fn get(&self, name: &str) -> String {
        debug!("调用了 service 层的 get 方法");
        format!("{name}'s value is ...")
    }
}

/// 演示服务的组件提供者
pub fn demo_service_provider() -> ComponentProvider {
    let descriptor = ComponentDescriptor::service("demo::service::DemoService");
    ComponentProvider::new(descriptor, || {
        let service = Arc::new(DemoService);
        Ok(ConstructedComponent::new(service.clone()).with_capability(
            "demo::service::GreetingService",
            service as Arc<dyn GreetingService>,
        ))
    })
}
