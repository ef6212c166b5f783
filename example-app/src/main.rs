//! # 演示应用程序
//!
//! 演示 MiniMVC 框架的组件注册、依赖注入与请求调度。
//! 传输层不在核心范围内，这里直接构造请求值演示调度过程。

mod service;
mod web;

use clap::Parser;
use mvc_common::{BufferSink, HttpRequest};
use mvc_composition::{FrameworkConfig, MvcApplication};
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "MiniMVC 演示应用")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "config/app.toml")]
    config: String,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&args.log_level))
        .init();

    info!("启动 MiniMVC 演示应用");

    // 加载配置
    let config = if std::path::Path::new(&args.config).exists() {
        FrameworkConfig::from_file(&args.config)?
    } else {
        info!("配置文件不存在, 使用默认扫描根");
        FrameworkConfig::new("demo")
    };

    // 编目组件并执行初始化流水线
    let app = MvcApplication::builder()
        .with_config(config)
        .register(service::demo_service_provider())?
        .register(web::demo_handler_provider())?
        .build()?;

    info!(
        "已注册 {} 个键, {} 条路由",
        app.registry().len(),
        app.routes().len()
    );

    // 演示请求调度
    demonstrate_dispatch(&app).await?;

    info!("演示应用结束");
    Ok(())
}

/// 演示请求调度
async fn demonstrate_dispatch(app: &MvcApplication) -> Result<(), Box<dyn std::error::Error>> {
    let requests = [
        HttpRequest::new("/demo/query.json").with_param("name", "alice"),
        HttpRequest::new("/demo/add.json")
            .with_param("a", "1")
            .with_param("b", "2"),
        HttpRequest::new("/demo/remove.json").with_param("id", "42"),
        HttpRequest::new("/demo/missing.json"),
    ];

    for request in requests {
        let sink = BufferSink::new();
        let outcome = app.dispatch(&request, &sink).await?;
        info!("{} -> {:?}: {}", request.path, outcome, sink.contents());
    }

    Ok(())
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
