//! 请求调度器
//!
//! 对冻结后的注册表与路由表只读访问，按请求完成路径规范化、
//! 路由查找、参数绑定与处理器调用。
//!
//! 状态机：接收路径 → 规范化 → 查找 → (命中: 绑定参数 → 调用 → 返回)
//! | (未命中: 写出 404)。单请求错误绝不向服务循环传播。

use crate::routing::{normalize_path, RouteEntry, RouteTable};
use mvc_common::{
    BoundArg, DispatchError, DispatchResult, HttpRequest, ParameterBinding, ResponseSink,
};
use mvc_container::ComponentRegistry;
use std::sync::Arc;
use tracing::{debug, error};

/// 未匹配路径的响应体
pub const NOT_FOUND_BODY: &str = "<h1>404 NOT FOUND</h1>";

/// 处理器调用失败的响应体
pub const SERVER_ERROR_BODY: &str = "<h1>500 INTERNAL SERVER ERROR</h1>";

/// 查询参数绑定模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingMode {
    /// 按参数名匹配（修正后的默认行为）
    #[default]
    NameMatched,
    /// 兼容旧实现：遍历参数包不匹配名字，每个文本槽位
    /// 都落下迭代到的最后一项的值
    LegacyLastValue,
}

/// 调用错误处理模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvocationErrorMode {
    /// 记录日志并写出 500 响应体
    #[default]
    Respond,
    /// 兼容旧实现：仅记录日志，响应保持处理器已写出的内容
    LegacySilent,
}

/// 调度选项
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchOptions {
    /// 查询参数绑定模式
    pub binding: BindingMode,
    /// 调用错误处理模式
    pub on_error: InvocationErrorMode,
}

/// 单次调度结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// 成功调用处理器
    Handled,
    /// 未匹配路由，已写出 404 响应体
    NotFound,
    /// 处理器调用失败，已按选项处理
    HandlerFailed,
}

/// 请求调度器
///
/// 持有冻结后结构的共享引用，可被多个并发请求同时调用。
pub struct Dispatcher {
    registry: Arc<ComponentRegistry>,
    routes: Arc<RouteTable>,
    options: DispatchOptions,
}

impl Dispatcher {
    /// 创建新的调度器
    pub fn new(
        registry: Arc<ComponentRegistry>,
        routes: Arc<RouteTable>,
        options: DispatchOptions,
    ) -> Self {
        Self {
            registry,
            routes,
            options,
        }
    }

    /// 调度一次入站请求
    ///
    /// 部署根前缀只剥除一次，随后按与注册时相同的规则规范化，
    /// 精确字符串匹配查找。未匹配写出 404；调用失败按选项写出
    /// 500 或保持处理器已写内容。
    pub async fn dispatch(
        &self,
        request: &HttpRequest,
        response: &dyn ResponseSink,
    ) -> DispatchResult<DispatchOutcome> {
        let stripped = request
            .path
            .strip_prefix(request.context_path.as_str())
            .unwrap_or(&request.path);
        let path = normalize_path(stripped);

        let Some(entry) = self.routes.get(&path) else {
            debug!("未匹配路由: {}", path);
            response.write(NOT_FOUND_BODY)?;
            return Ok(DispatchOutcome::NotFound);
        };

        let component = self.registry.component(&entry.handler_key).ok_or_else(|| {
            DispatchError::HandlerNotFound {
                key: entry.handler_key.clone(),
            }
        })?;
        let handler = component
            .handler
            .as_ref()
            .ok_or_else(|| DispatchError::HandlerNotFound {
                key: entry.handler_key.clone(),
            })?;

        let args = self.bind_args(entry, request);
        debug!("调度 {} -> {}#{}", path, entry.handler_key, entry.method);

        match handler.invoke(&entry.method, request, response, &args).await {
            Ok(()) => Ok(DispatchOutcome::Handled),
            Err(e) => {
                error!("处理器调用失败: {}#{}: {}", entry.handler_key, entry.method, e);
                if self.options.on_error == InvocationErrorMode::Respond {
                    response.write(SERVER_ERROR_BODY)?;
                }
                Ok(DispatchOutcome::HandlerFailed)
            }
        }
    }

    /// 按声明顺序绑定调用参数
    fn bind_args(&self, entry: &RouteEntry, request: &HttpRequest) -> Vec<BoundArg> {
        entry
            .bindings
            .iter()
            .map(|binding| match binding {
                ParameterBinding::Request => BoundArg::Request,
                ParameterBinding::Response => BoundArg::Response,
                ParameterBinding::Query { name } => {
                    BoundArg::Text(self.bind_query(name, request))
                }
            })
            .collect()
    }

    /// 绑定一个命名查询参数
    ///
    /// 同名多值以逗号连接。名字缺失时绑定空串。
    fn bind_query(&self, name: &str, request: &HttpRequest) -> String {
        match self.options.binding {
            BindingMode::NameMatched => request
                .params
                .get(name)
                .map(|values| values.join(","))
                .unwrap_or_default(),
            BindingMode::LegacyLastValue => request
                .params
                .iter()
                .next_back()
                .map(|(_, values)| values.join(","))
                .unwrap_or_default(),
        }
    }
}
