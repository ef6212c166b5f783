//! 路由表构建与请求调度的集成测试

use async_trait::async_trait;
use mvc_common::{
    BoundArg, BufferSink, ComponentDescriptor, ComponentProvider, ConstructedComponent,
    HttpRequest, InvocationError, ParameterBinding, RequestHandler, ResponseSink, RouteError,
    RouteSpec,
};
use mvc_container::{ComponentCatalog, ComponentRegistry, RegistryBuilder};
use mvc_web::{
    normalize_path, BindingMode, DispatchOptions, DispatchOutcome, Dispatcher,
    InvocationErrorMode, RouteTableBuilder, NOT_FOUND_BODY, SERVER_ERROR_BODY,
};
use std::sync::Arc;

/// 测试处理器
///
/// `echo` 方法把全部文本参数用 `|` 连接写出；`boom` 方法先写出
/// 部分内容再失败，用于验证错误处理模式。
#[derive(Debug, Default)]
struct EchoHandler;

#[async_trait]
impl RequestHandler for EchoHandler {
    async fn invoke(
        &self,
        method: &str,
        _request: &HttpRequest,
        response: &dyn ResponseSink,
        args: &[BoundArg],
    ) -> Result<(), InvocationError> {
        match method {
            "echo" => {
                let texts: Vec<&str> = args.iter().filter_map(BoundArg::as_text).collect();
                response
                    .write(&texts.join("|"))
                    .map_err(|e| InvocationError::with_source("响应写出失败", e))
            }
            "boom" => {
                response
                    .write("部分输出")
                    .map_err(|e| InvocationError::with_source("响应写出失败", e))?;
                Err(InvocationError::new("业务处理失败"))
            }
            other => Err(InvocationError::new(format!("未知方法: {other}"))),
        }
    }
}

fn echo_provider() -> ComponentProvider {
    let descriptor = ComponentDescriptor::handler("web::echo::EchoHandler")
        .with_base_path("/api")
        .with_route(
            RouteSpec::new("/echo.json", "echo")
                .with_param(ParameterBinding::Request)
                .with_param(ParameterBinding::Response)
                .with_param(ParameterBinding::query("name")),
        )
        .with_route(RouteSpec::new("/boom.json", "boom"));

    ComponentProvider::new(descriptor, || {
        let handler = Arc::new(EchoHandler);
        Ok(ConstructedComponent::new(handler.clone()).with_handler(handler))
    })
}

fn build_registry(providers: Vec<ComponentProvider>, root: &str) -> Arc<ComponentRegistry> {
    let mut catalog = ComponentCatalog::new();
    for provider in providers {
        catalog.register(provider).unwrap();
    }
    let candidates = catalog.scan(root).unwrap();
    Arc::new(RegistryBuilder::new().build(&catalog, &candidates).unwrap())
}

fn build_dispatcher(options: DispatchOptions) -> Dispatcher {
    let registry = build_registry(vec![echo_provider()], "web");
    let routes = Arc::new(RouteTableBuilder::new().build(&registry).unwrap());
    Dispatcher::new(registry, routes, options)
}

#[test]
fn test_route_paths_are_normalized() {
    let descriptor = ComponentDescriptor::handler("web::messy::MessyHandler")
        .with_base_path("/demo/")
        .with_route(RouteSpec::new("//query.json", "query"));
    let provider = ComponentProvider::new(descriptor, || {
        let handler = Arc::new(EchoHandler);
        Ok(ConstructedComponent::new(handler.clone()).with_handler(handler))
    });

    let registry = build_registry(vec![provider], "web");
    let table = RouteTableBuilder::new().build(&registry).unwrap();

    assert!(table.get("/demo/query.json").is_some());
    assert_eq!(table.len(), 1);

    // 注册路径已是规范形式，再次规范化不变
    for path in table.paths() {
        assert_eq!(&normalize_path(path), path);
    }
}

#[test]
fn test_duplicate_route_path_is_fatal() {
    let descriptor = ComponentDescriptor::handler("web::dup::DupHandler")
        .with_base_path("/api")
        .with_route(RouteSpec::new("/echo.json", "first"))
        .with_route(RouteSpec::new("//echo.json/", "second"));
    let provider = ComponentProvider::new(descriptor, || {
        let handler = Arc::new(EchoHandler);
        Ok(ConstructedComponent::new(handler.clone()).with_handler(handler))
    });

    let registry = build_registry(vec![provider], "web");
    let result = RouteTableBuilder::new().build(&registry);
    assert!(matches!(
        result,
        Err(RouteError::DuplicateRoute { path, .. }) if path == "/api/echo.json"
    ));
}

#[tokio::test]
async fn test_unmatched_path_writes_404_body() {
    let dispatcher = build_dispatcher(DispatchOptions::default());
    let sink = BufferSink::new();

    let request = HttpRequest::new("/api/missing.json");
    let outcome = dispatcher.dispatch(&request, &sink).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::NotFound);
    assert_eq!(sink.contents(), NOT_FOUND_BODY);
}

#[tokio::test]
async fn test_context_path_is_stripped_once() {
    let dispatcher = build_dispatcher(DispatchOptions::default());
    let sink = BufferSink::new();

    let request = HttpRequest::new("/app/api/echo.json")
        .with_context_path("/app")
        .with_param("name", "alice");
    let outcome = dispatcher.dispatch(&request, &sink).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::Handled);
    assert_eq!(sink.contents(), "alice");
}

#[tokio::test]
async fn test_messy_inbound_path_still_matches() {
    let dispatcher = build_dispatcher(DispatchOptions::default());
    let sink = BufferSink::new();

    let request = HttpRequest::new("//api///echo.json/").with_param("name", "alice");
    let outcome = dispatcher.dispatch(&request, &sink).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::Handled);
    assert_eq!(sink.contents(), "alice");
}

#[tokio::test]
async fn test_name_matched_binding_picks_named_param() {
    let dispatcher = build_dispatcher(DispatchOptions::default());
    let sink = BufferSink::new();

    // 参数包里还有别的名字，只有 name 被绑定
    let request = HttpRequest::new("/api/echo.json")
        .with_param("name", "alice")
        .with_param("zzz", "ignored");
    dispatcher.dispatch(&request, &sink).await.unwrap();

    assert_eq!(sink.contents(), "alice");
}

#[tokio::test]
async fn test_repeated_values_join_with_comma() {
    let dispatcher = build_dispatcher(DispatchOptions::default());
    let sink = BufferSink::new();

    let request = HttpRequest::new("/api/echo.json")
        .with_param("name", "alice")
        .with_param("name", "bob");
    dispatcher.dispatch(&request, &sink).await.unwrap();

    assert_eq!(sink.contents(), "alice,bob");
}

#[tokio::test]
async fn test_missing_named_param_binds_empty_string() {
    let dispatcher = build_dispatcher(DispatchOptions::default());
    let sink = BufferSink::new();

    let request = HttpRequest::new("/api/echo.json");
    let outcome = dispatcher.dispatch(&request, &sink).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::Handled);
    assert_eq!(sink.contents(), "");
}

#[tokio::test]
async fn test_legacy_binding_takes_last_bag_entry() {
    let options = DispatchOptions {
        binding: BindingMode::LegacyLastValue,
        ..DispatchOptions::default()
    };
    let dispatcher = build_dispatcher(options);
    let sink = BufferSink::new();

    // 有序参数包中最后一项是 zzz, 旧行为下 name 槽位也取它的值
    let request = HttpRequest::new("/api/echo.json")
        .with_param("name", "alice")
        .with_param("zzz", "last");
    dispatcher.dispatch(&request, &sink).await.unwrap();

    assert_eq!(sink.contents(), "last");
}

#[tokio::test]
async fn test_dispatch_is_deterministic_across_repeats() {
    let dispatcher = build_dispatcher(DispatchOptions::default());
    let request = HttpRequest::new("/api/echo.json")
        .with_param("name", "alice")
        .with_param("name", "bob");

    let mut outputs = Vec::new();
    for _ in 0..3 {
        let sink = BufferSink::new();
        dispatcher.dispatch(&request, &sink).await.unwrap();
        outputs.push(sink.contents());
    }
    assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_handler_failure_writes_500_body() {
    let dispatcher = build_dispatcher(DispatchOptions::default());
    let sink = BufferSink::new();

    let request = HttpRequest::new("/api/boom.json");
    let outcome = dispatcher.dispatch(&request, &sink).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::HandlerFailed);
    assert_eq!(sink.contents(), format!("部分输出{SERVER_ERROR_BODY}"));
}

#[tokio::test]
async fn test_legacy_silent_mode_keeps_partial_output() {
    let options = DispatchOptions {
        on_error: InvocationErrorMode::LegacySilent,
        ..DispatchOptions::default()
    };
    let dispatcher = build_dispatcher(options);
    let sink = BufferSink::new();

    let request = HttpRequest::new("/api/boom.json");
    let outcome = dispatcher.dispatch(&request, &sink).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::HandlerFailed);
    assert_eq!(sink.contents(), "部分输出");
}
