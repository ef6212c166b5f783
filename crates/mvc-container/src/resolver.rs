//! 依赖解析器
//!
//! 在注册表构建完成后运行，为每个组件声明的依赖槽位填充
//! 匹配的注册表条目。填充是共享引用赋值，不产生副本。

use crate::registry::ComponentRegistry;
use mvc_common::{DependencyError, DependencyResult};
use tracing::{debug, info, warn};

/// 依赖缺失处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingDependencyPolicy {
    /// 记录启动警告并保留空槽位
    #[default]
    Lenient,
    /// 视为致命启动错误
    Strict,
}

/// 解析结果汇总
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// 成功填充的槽位数
    pub resolved: usize,
    /// 缺失的依赖（宽松模式下保留记录）
    pub missing: Vec<String>,
}

/// 依赖解析器
///
/// 只处理显式声明的槽位，未声明的字段不被触碰。
#[derive(Debug, Default)]
pub struct DependencyResolver {
    policy: MissingDependencyPolicy,
}

impl DependencyResolver {
    /// 以指定策略创建解析器
    pub fn new(policy: MissingDependencyPolicy) -> Self {
        Self { policy }
    }

    /// 遍历注册表填充全部依赖槽位
    ///
    /// 解析键为槽位的显式覆盖名，否则为目标类型标识。
    /// 键缺失时按策略告警或失败；类型不匹配一律致命。
    pub fn resolve(&self, registry: &ComponentRegistry) -> DependencyResult<ResolutionReport> {
        let mut report = ResolutionReport::default();

        for (canonical, component) in registry.components() {
            if component.descriptor.dependencies.is_empty() {
                continue;
            }
            let injector =
                component
                    .injector
                    .as_ref()
                    .ok_or_else(|| DependencyError::NotInjectable {
                        component: canonical.clone(),
                    })?;

            for slot in &component.descriptor.dependencies {
                let key = slot.resolution_key();
                match registry.lookup(key) {
                    Some(exported) => {
                        injector.assign(&slot.slot, exported)?;
                        debug!("注入 {}.{} <- {}", canonical, slot.slot, key);
                        report.resolved += 1;
                    }
                    None => match self.policy {
                        MissingDependencyPolicy::Lenient => {
                            warn!(
                                "依赖缺失: 组件 {} 的槽位 {} 找不到键 {}, 槽位保留为空",
                                canonical, slot.slot, key
                            );
                            report.missing.push(format!("{}.{} -> {}", canonical, slot.slot, key));
                        }
                        MissingDependencyPolicy::Strict => {
                            return Err(DependencyError::MissingDependency {
                                component: canonical.clone(),
                                slot: slot.slot.clone(),
                                key: key.to_string(),
                            });
                        }
                    },
                }
            }
        }

        info!(
            "依赖解析完成: 填充 {} 个槽位, 缺失 {} 个",
            report.resolved,
            report.missing.len()
        );
        Ok(report)
    }
}
