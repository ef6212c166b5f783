//! 组件目录
//!
//! 按全限定类型名编目组件提供者，并在给定命名空间根下枚举候选类型。

use mvc_common::{ComponentProvider, ScanError, ScanResult};
use std::collections::BTreeMap;
use tracing::debug;

/// 组件目录
///
/// 使用有序映射存储，保证扫描顺序确定、诊断输出可复现。
#[derive(Debug, Default)]
pub struct ComponentCatalog {
    providers: BTreeMap<String, ComponentProvider>,
}

impl ComponentCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 编目一个组件提供者
    ///
    /// 同一全限定名重复编目是错误。
    pub fn register(&mut self, provider: ComponentProvider) -> ScanResult<()> {
        let type_name = provider.descriptor.type_name.clone();
        if self.providers.contains_key(&type_name) {
            return Err(ScanError::DuplicateCandidate { type_name });
        }
        debug!("编目候选组件: {}", type_name);
        self.providers.insert(type_name, provider);
        Ok(())
    }

    /// 在命名空间根下枚举候选类型名
    ///
    /// 递归覆盖全部子命名空间。根无法解析到任何候选时整体失败，
    /// 不做部分扫描。
    pub fn scan(&self, root: &str) -> ScanResult<Vec<String>> {
        let prefix = format!("{root}::");
        let names: Vec<String> = self
            .providers
            .keys()
            .filter(|name| name.as_str() == root || name.starts_with(&prefix))
            .cloned()
            .collect();
        if names.is_empty() {
            return Err(ScanError::RootNotFound {
                namespace: root.to_string(),
            });
        }
        debug!("扫描 {} 完成, 发现 {} 个候选", root, names.len());
        Ok(names)
    }

    /// 按全限定名查找提供者
    pub fn provider(&self, type_name: &str) -> Option<&ComponentProvider> {
        self.providers.get(type_name)
    }

    /// 已编目的候选数量
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
