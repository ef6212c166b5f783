//! HTTP 边界抽象
//!
//! 核心不包含传输层。外部协作方以 [`HttpRequest`] 值与
//! [`ResponseSink`] 写出器和调度器交互。

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io;

/// 入站请求值
///
/// 参数包使用有序映射，保证遍历顺序确定。
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    /// 原始请求路径
    pub path: String,
    /// 部署根前缀，调度时剥除一次
    pub context_path: String,
    /// 查询参数包：参数名到一个或多个文本值
    pub params: BTreeMap<String, Vec<String>>,
}

impl HttpRequest {
    /// 创建新的请求值
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            context_path: String::new(),
            params: BTreeMap::new(),
        }
    }

    /// 设置部署根前缀
    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into();
        self
    }

    /// 追加一个查询参数值
    ///
    /// 同名参数可以出现多次。
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.entry(name.into()).or_default().push(value.into());
        self
    }

    /// 按名称查找查询参数值列表
    pub fn param(&self, name: &str) -> Option<&Vec<String>> {
        self.params.get(name)
    }
}

/// 响应写出器
///
/// 外部传输协作方提供的响应边界，唯一操作是写出一段文本。
pub trait ResponseSink: Send + Sync {
    /// 写出文本
    fn write(&self, text: &str) -> io::Result<()>;
}

/// 缓冲写出器
///
/// 将全部写出内容累积在内存中，供测试与演示使用。
#[derive(Debug, Default)]
pub struct BufferSink {
    buffer: Mutex<String>,
}

impl BufferSink {
    /// 创建新的缓冲写出器
    pub fn new() -> Self {
        Self::default()
    }

    /// 已写入的全部内容
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }
}

impl ResponseSink for BufferSink {
    fn write(&self, text: &str) -> io::Result<()> {
        self.buffer.lock().push_str(text);
        Ok(())
    }
}
