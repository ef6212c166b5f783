//! 组件注册表
//!
//! 名称键到组件实例的映射。构建期逐一实例化候选组件并按角色入表，
//! 任何键冲突立即终止构建；依赖解析阶段结束后注册表冻结为只读。

use crate::catalog::ComponentCatalog;
use mvc_common::{
    ComponentDescriptor, ComponentRole, InjectTarget, RegistryError, RegistryResult,
    RequestHandler, SharedComponent,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 注册表条目
///
/// 一个实例可以通过多个键可达（canonical 键、覆盖名、能力别名），
/// 所有条目共享同一实例。
#[derive(Clone)]
pub struct RegistryEntry {
    /// 持有该键的组件的 canonical 键
    pub owner: String,
    /// 该键下导出的实例视图
    pub exported: SharedComponent,
}

/// 已注册组件
#[derive(Clone)]
pub struct RegisteredComponent {
    /// 组件描述符
    pub descriptor: ComponentDescriptor,
    /// canonical 导出
    pub exported: SharedComponent,
    /// 注入视图
    pub injector: Option<Arc<dyn InjectTarget>>,
    /// 处理器视图
    pub handler: Option<Arc<dyn RequestHandler>>,
}

/// 组件注册表
///
/// 构建完成后不再变更，服务期间被多个并发请求只读共享。
#[derive(Default)]
pub struct ComponentRegistry {
    /// 全部键（canonical、覆盖名与别名）到条目的映射
    entries: BTreeMap<String, RegistryEntry>,
    /// canonical 键到组件的映射
    components: BTreeMap<String, RegisteredComponent>,
}

impl ComponentRegistry {
    /// 按键查找导出实例
    pub fn lookup(&self, key: &str) -> Option<SharedComponent> {
        self.entries.get(key).map(|entry| entry.exported.clone())
    }

    /// 按键查找条目
    pub fn entry(&self, key: &str) -> Option<&RegistryEntry> {
        self.entries.get(key)
    }

    /// 按 canonical 键查找组件
    pub fn component(&self, canonical_key: &str) -> Option<&RegisteredComponent> {
        self.components.get(canonical_key)
    }

    /// 是否存在指定键
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 全部已注册键（确定顺序）
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// 按 canonical 键顺序遍历组件
    pub fn components(&self) -> impl Iterator<Item = (&String, &RegisteredComponent)> {
        self.components.iter()
    }

    /// Handler 角色组件（确定顺序）
    pub fn handlers(&self) -> impl Iterator<Item = (&String, &RegisteredComponent)> {
        self.components
            .iter()
            .filter(|(_, component)| component.descriptor.role == ComponentRole::Handler)
    }

    /// 已注册键的数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 注册表构建器
#[derive(Debug, Default)]
pub struct RegistryBuilder;

impl RegistryBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self
    }

    /// 按扫描结果构建注册表
    ///
    /// 单个候选构造失败仅记录日志并跳过，不影响整体构建；
    /// 键冲突则立即失败，绝不静默覆盖。
    pub fn build(
        &self,
        catalog: &ComponentCatalog,
        candidates: &[String],
    ) -> RegistryResult<ComponentRegistry> {
        let mut registry = ComponentRegistry::default();

        for name in candidates {
            let provider =
                catalog
                    .provider(name)
                    .ok_or_else(|| RegistryError::UnknownCandidate {
                        type_name: name.clone(),
                    })?;
            let descriptor = provider.descriptor.clone();

            let constructed = match provider.construct() {
                Ok(constructed) => constructed,
                Err(e) => {
                    warn!("跳过候选组件 {}: {}", name, e);
                    continue;
                }
            };

            match descriptor.role {
                ComponentRole::Plain => {
                    debug!("忽略无角色类型: {}", name);
                }
                ComponentRole::Handler => {
                    let canonical = descriptor.canonical_key();
                    Self::claim_canonical(&registry, &canonical, &descriptor)?;
                    Self::insert(&mut registry, &canonical, &canonical, constructed.instance.clone())?;
                    info!("注册处理器: {} ({})", canonical, name);
                    registry.components.insert(
                        canonical,
                        RegisteredComponent {
                            descriptor,
                            exported: constructed.instance,
                            injector: constructed.injector,
                            handler: constructed.handler,
                        },
                    );
                }
                ComponentRole::Service => {
                    let canonical = descriptor.canonical_key();
                    Self::claim_canonical(&registry, &canonical, &descriptor)?;
                    let key = descriptor
                        .bean_name
                        .clone()
                        .unwrap_or_else(|| canonical.clone());
                    Self::insert(&mut registry, &key, &canonical, constructed.instance.clone())?;
                    for (alias, exported) in &constructed.capabilities {
                        Self::insert(&mut registry, alias, &canonical, exported.clone())?;
                    }
                    info!(
                        "注册服务: {} (别名 {} 个, {})",
                        key,
                        constructed.capabilities.len(),
                        name
                    );
                    registry.components.insert(
                        canonical,
                        RegisteredComponent {
                            descriptor,
                            exported: constructed.instance,
                            injector: constructed.injector,
                            handler: constructed.handler,
                        },
                    );
                }
            }
        }

        Ok(registry)
    }

    /// 占用一个 canonical 键，检测冲突
    ///
    /// 覆盖名只改变条目键，canonical 键仍标识组件本身。两个简单名
    /// 相同的类型即使条目键不冲突，也不允许共用 canonical 键，
    /// 否则后来者会顶掉先注册组件的依赖槽位与处理器视图。
    fn claim_canonical(
        registry: &ComponentRegistry,
        canonical: &str,
        descriptor: &ComponentDescriptor,
    ) -> RegistryResult<()> {
        if let Some(existing) = registry.components.get(canonical) {
            return Err(RegistryError::DuplicateBinding {
                key: canonical.to_string(),
                existing: existing.descriptor.type_name.clone(),
                candidate: descriptor.type_name.clone(),
            });
        }
        Ok(())
    }

    /// 插入一个键，检测冲突
    ///
    /// 两个不同实例争用同一键是致命的启动错误。
    fn insert(
        registry: &mut ComponentRegistry,
        key: &str,
        owner: &str,
        exported: SharedComponent,
    ) -> RegistryResult<()> {
        if let Some(existing) = registry.entries.get(key) {
            return Err(RegistryError::DuplicateBinding {
                key: key.to_string(),
                existing: existing.owner.clone(),
                candidate: owner.to_string(),
            });
        }
        registry.entries.insert(
            key.to_string(),
            RegistryEntry {
                owner: owner.to_string(),
                exported,
            },
        );
        Ok(())
    }
}
