//! 请求处理器抽象

use crate::errors::InvocationError;
use crate::http::{HttpRequest, ResponseSink};
use async_trait::async_trait;

/// 已绑定的调用参数
///
/// 按参数声明顺序排列。请求与响应位置以标记占位，
/// 查询参数位置携带绑定后的文本值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundArg {
    /// 请求对象位置
    Request,
    /// 响应写出器位置
    Response,
    /// 查询参数文本值
    Text(String),
}

impl BoundArg {
    /// 取出文本值，非文本位置返回 `None`
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// 请求处理器
///
/// Handler 角色组件实现此 trait。同一实例在并发请求间共享，
/// 实现不得持有可变的单请求状态。
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// 调用指定方法
    ///
    /// `method` 为路由表中登记的方法标识，`args` 为调度器按声明
    /// 顺序绑定好的参数列表。调用错误只影响当次请求。
    async fn invoke(
        &self,
        method: &str,
        request: &HttpRequest,
        response: &dyn ResponseSink,
        args: &[BoundArg],
    ) -> Result<(), InvocationError>;
}
