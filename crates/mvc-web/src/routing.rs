//! 路由表构建
//!
//! 将 Handler 组件声明的路由片段与基础路径组合成完整路径，
//! 建立路径到 (处理器, 方法, 参数绑定列表) 的只读映射。

use mvc_common::{ParameterBinding, RouteError, RouteResult};
use mvc_container::ComponentRegistry;
use std::collections::BTreeMap;
use tracing::info;

/// 规范化请求路径
///
/// 规则：保证前导斜杠、折叠连续斜杠、去除尾部斜杠（根路径除外）。
/// 注册路径与入站路径使用同一规则，规范化后可逐字节比较。
/// 该函数幂等：`normalize_path(normalize_path(p)) == normalize_path(p)`。
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    normalized.push('/');
    let mut prev_slash = true;
    for ch in path.chars() {
        if ch == '/' {
            if !prev_slash {
                normalized.push('/');
            }
            prev_slash = true;
        } else {
            normalized.push(ch);
            prev_slash = false;
        }
    }
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// 路由表条目
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// 规范化后的完整路径
    pub path: String,
    /// 拥有方法的处理器的 canonical 键
    pub handler_key: String,
    /// 方法标识
    pub method: String,
    /// 按声明顺序排列的参数绑定列表
    pub bindings: Vec<ParameterBinding>,
}

/// 路由表
///
/// 构建完成后冻结，服务期间只读；路径唯一。
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: BTreeMap<String, RouteEntry>,
}

impl RouteTable {
    /// 精确匹配查找
    ///
    /// 不支持通配符或路径变量。
    pub fn get(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.get(path)
    }

    /// 全部注册路径（确定顺序）
    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// 已注册路径数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 路由表是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 路由表构建器
#[derive(Debug, Default)]
pub struct RouteTableBuilder;

impl RouteTableBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self
    }

    /// 遍历注册表中的处理器组件构建路由表
    ///
    /// 完整路径 = normalize(基础路径 + "/" + 方法片段)。
    /// 同一路径重复注册是致命的构建错误，绝不静默覆盖。
    pub fn build(&self, registry: &ComponentRegistry) -> RouteResult<RouteTable> {
        let mut table = RouteTable::default();

        for (canonical, component) in registry.handlers() {
            let descriptor = &component.descriptor;
            let base = descriptor.base_path.as_deref().unwrap_or("");

            for route in &descriptor.routes {
                let path = normalize_path(&format!("/{}/{}", base, route.fragment));
                if let Some(existing) = table.entries.get(&path) {
                    return Err(RouteError::DuplicateRoute {
                        path,
                        existing: format!("{}#{}", existing.handler_key, existing.method),
                        candidate: format!("{}#{}", canonical, route.method),
                    });
                }
                info!("映射路由: {} -> {}#{}", path, canonical, route.method);
                table.entries.insert(
                    path.clone(),
                    RouteEntry {
                        path,
                        handler_key: canonical.clone(),
                        method: route.method.clone(),
                        bindings: route.params.clone(),
                    },
                );
            }
        }

        Ok(table)
    }
}
