//! MCPハンドラー実装

use super::{
    AppState, ClientCapabilities, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ServerCapabilities, ServerInfo, ToolsCapability, INVALID_REQUEST, PARSE_ERROR,
    PROTOCOL_VERSION,
};
use crate::store::DrawingStore;
use actix_web::{web, Error, HttpRequest, HttpResponse, HttpResponseBuilder};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const SESSION_HEADER: &str = "Mcp-Session-Id";

/// MCPハンドラー
pub async fn mcp_handler<S: DrawingStore + 'static>(
    req: HttpRequest,
    data: web::Data<Arc<AppState<S>>>,
    payload: web::Bytes,
) -> Result<HttpResponse, Error> {
    debug!("MCP handler called with method: {}", req.method());

    match req.method().as_str() {
        "POST" => handle_json_rpc(req, data, payload).await,
        "DELETE" => handle_session_delete(req, data).await,
        _ => Ok(HttpResponse::MethodNotAllowed().finish()),
    }
}

fn session_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

/// JSON-RPC処理
async fn handle_json_rpc<S: DrawingStore + 'static>(
    req: HttpRequest,
    data: web::Data<Arc<AppState<S>>>,
    payload: web::Bytes,
) -> Result<HttpResponse, Error> {
    // JSON-RPCリクエストのパース
    let request: JsonRpcRequest = match serde_json::from_slice::<Value>(&payload) {
        Ok(value) => match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => return Ok(rpc_error_response(INVALID_REQUEST, "Invalid JSON-RPC request", e)),
        },
        Err(e) => return Ok(rpc_error_response(PARSE_ERROR, "Parse error", e)),
    };

    debug!("MCP request: method={}, id={:?}", request.method, request.id);

    // セッションIDの検証。新規発行はinitializeのみで、それ以外はセッション無しで処理する
    let session_id = match session_header(&req) {
        Some(id) => {
            if !data.session_manager.touch(&id).await {
                warn!("Unknown MCP session: {}", id);
                return Ok(HttpResponse::NotFound().body("Unknown Mcp-Session-Id"));
            }
            Some(id)
        }
        None if request.method == "initialize" => {
            Some(data.session_manager.create_session().await.id)
        }
        None => None,
    };

    // 通知（id無し）は応答本文なし
    if request.is_notification() {
        if let Some(session_id) = &session_id {
            if matches!(request.method.as_str(), "initialized" | "notifications/initialized") {
                data.session_manager.mark_initialized(session_id).await;
                info!("MCP session initialized: {}", session_id);
            }
        }
        return Ok(with_session(HttpResponse::Accepted(), session_id).finish());
    }

    let result = dispatch(&data, session_id.as_deref(), &request).await;
    let response = JsonRpcResponse::from_result(request.id.unwrap_or(Value::Null), result);

    Ok(with_session(HttpResponse::Ok(), session_id).json(response))
}

/// セッションがあればヘッダーに含める
fn with_session(mut builder: HttpResponseBuilder, session_id: Option<String>) -> HttpResponseBuilder {
    if let Some(session_id) = session_id {
        builder.insert_header((SESSION_HEADER, session_id));
    }
    builder
}

/// メソッドに応じた処理
async fn dispatch<S: DrawingStore + 'static>(
    data: &web::Data<Arc<AppState<S>>>,
    session_id: Option<&str>,
    request: &JsonRpcRequest,
) -> Result<Value, JsonRpcError> {
    match request.method.as_str() {
        "initialize" => handle_initialize(data, session_id, request.params.as_ref()).await,
        "initialized" | "notifications/initialized" => {
            if let Some(session_id) = session_id {
                data.session_manager.mark_initialized(session_id).await;
            }
            Ok(json!({}))
        }
        "ping" => Ok(json!({})),
        "tools/list" => super::tools::list().await,
        "tools/call" => handle_tool_call(data, request.params.clone()).await,
        _ => Err(JsonRpcError::method_not_found(format!(
            "Method not found: {}",
            request.method
        ))),
    }
}

/// セッション削除
async fn handle_session_delete<S: DrawingStore + 'static>(
    req: HttpRequest,
    data: web::Data<Arc<AppState<S>>>,
) -> Result<HttpResponse, Error> {
    let Some(session_id) = session_header(&req) else {
        return Ok(HttpResponse::BadRequest().body("Missing Mcp-Session-Id header"));
    };

    if data.session_manager.remove_session(&session_id).await {
        info!("MCP session terminated: {}", session_id);
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().body("Unknown Mcp-Session-Id"))
    }
}

/// initializeハンドラー
async fn handle_initialize<S: DrawingStore + 'static>(
    data: &web::Data<Arc<AppState<S>>>,
    session_id: Option<&str>,
    params: Option<&Value>,
) -> Result<Value, JsonRpcError> {
    let client_capabilities = params
        .and_then(|p| p.get("capabilities"))
        .and_then(|c| serde_json::from_value::<ClientCapabilities>(c.clone()).ok());

    debug!("MCP initialize with capabilities: {:?}", client_capabilities);
    if let Some(session_id) = session_id {
        data.session_manager
            .set_capabilities(session_id, client_capabilities)
            .await;
    }

    Ok(json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": ServerCapabilities {
            tools: Some(ToolsCapability { list_changed: false }),
        },
        "serverInfo": ServerInfo {
            name: crate::NAME.to_string(),
            version: crate::VERSION.to_string(),
        },
    }))
}

/// ツール呼び出しハンドラー
async fn handle_tool_call<S: DrawingStore + 'static>(
    data: &web::Data<Arc<AppState<S>>>,
    params: Option<Value>,
) -> Result<Value, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;

    let name = params
        .get("name")
        .and_then(|n| n.as_str())
        .ok_or_else(|| JsonRpcError::invalid_params("Missing tool name"))?;

    let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
    let service = &data.export_service;

    let result = match name {
        "export_to_svg" => super::tools::export::export_svg(arguments, service).await,
        "export_to_png" => super::tools::export::export_png(arguments, service).await,
        "export_to_json" => super::tools::export::export_json(arguments, service).await,
        _ => Err(JsonRpcError::method_not_found(format!("Tool not found: {}", name))),
    };

    if let Err(e) = &result {
        error!("MCP tool {} failed: {}", name, e.message);
    }
    result
}

fn rpc_error_response(code: i32, message: &str, cause: serde_json::Error) -> HttpResponse {
    error!("Failed to parse JSON-RPC request: {}", cause);
    HttpResponse::BadRequest().json(JsonRpcResponse::from_result(
        Value::Null,
        Err(JsonRpcError {
            code,
            message: message.to_string(),
            data: Some(json!({ "error": cause.to_string() })),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportService;
    use crate::mcp::{METHOD_NOT_FOUND, RESOURCE_NOT_FOUND};
    use crate::store::{Drawing, MemoryDrawingStore};
    use actix_web::{http::StatusCode, test, App};

    fn state() -> web::Data<Arc<AppState<MemoryDrawingStore>>> {
        let store = MemoryDrawingStore::with_drawings(vec![
            Drawing::new("abc", "Test", "{\"elements\":[]}"),
        ])
        .unwrap();
        web::Data::new(Arc::new(AppState::new(ExportService::new(store))))
    }

    macro_rules! mcp_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .route("/mcp", web::post().to(mcp_handler::<MemoryDrawingStore>))
                    .route("/mcp", web::delete().to(mcp_handler::<MemoryDrawingStore>)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_initialize_issues_session() {
        let app = mcp_app!(state());
        let req = test::TestRequest::post()
            .uri("/mcp")
            .set_json(json!({ "jsonrpc": "2.0", "method": "initialize", "id": 1, "params": {} }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(SESSION_HEADER).is_some());

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(body["id"], 1);
    }

    #[actix_web::test]
    async fn test_stateless_calls_do_not_create_sessions() {
        let data = state();
        let app = mcp_app!(data.clone());

        for i in 0..5 {
            let req = test::TestRequest::post()
                .uri("/mcp")
                .set_json(json!({
                    "jsonrpc": "2.0",
                    "method": "tools/call",
                    "id": i,
                    "params": { "name": "export_to_json", "arguments": { "id": "abc" } }
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert!(resp.headers().get(SESSION_HEADER).is_none());
        }

        let req = test::TestRequest::post()
            .uri("/mcp")
            .set_json(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        assert_eq!(data.session_manager.count().await, 0);
    }

    #[actix_web::test]
    async fn test_initialize_registers_one_session() {
        let data = state();
        let app = mcp_app!(data.clone());

        let req = test::TestRequest::post()
            .uri("/mcp")
            .set_json(json!({ "jsonrpc": "2.0", "method": "initialize", "id": 1, "params": {} }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let session_id = resp
            .headers()
            .get(SESSION_HEADER)
            .and_then(|h| h.to_str().ok())
            .unwrap()
            .to_string();
        assert_eq!(data.session_manager.count().await, 1);

        let req = test::TestRequest::post()
            .uri("/mcp")
            .insert_header((SESSION_HEADER, session_id.clone()))
            .set_json(json!({ "jsonrpc": "2.0", "method": "tools/list", "id": 2 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get(SESSION_HEADER).and_then(|h| h.to_str().ok()),
            Some(session_id.as_str())
        );
        assert_eq!(data.session_manager.count().await, 1);
    }

    #[actix_web::test]
    async fn test_tools_call_export_json() {
        let app = mcp_app!(state());
        let req = test::TestRequest::post()
            .uri("/mcp")
            .set_json(json!({
                "jsonrpc": "2.0",
                "method": "tools/call",
                "id": "call-1",
                "params": { "name": "export_to_json", "arguments": { "id": "abc" } }
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"]["content"][0]["text"], "{\"elements\":[]}");
    }

    #[actix_web::test]
    async fn test_tools_call_not_found_and_unknown_tool() {
        let app = mcp_app!(state());
        let req = test::TestRequest::post()
            .uri("/mcp")
            .set_json(json!({
                "jsonrpc": "2.0",
                "method": "tools/call",
                "id": 2,
                "params": { "name": "export_to_svg", "arguments": { "id": "missing" } }
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["error"]["code"], RESOURCE_NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/mcp")
            .set_json(json!({
                "jsonrpc": "2.0",
                "method": "tools/call",
                "id": 3,
                "params": { "name": "export_to_pdf", "arguments": { "id": "abc" } }
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["error"]["code"], METHOD_NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_parse_error() {
        let app = mcp_app!(state());
        let req = test::TestRequest::post()
            .uri("/mcp")
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], PARSE_ERROR);
    }

    #[actix_web::test]
    async fn test_session_notification_and_delete() {
        let data = state();
        let app = mcp_app!(data.clone());
        let session = data.session_manager.create_session().await;

        let req = test::TestRequest::post()
            .uri("/mcp")
            .insert_header((SESSION_HEADER, session.id.clone()))
            .set_json(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        assert!(data.session_manager.get_session(&session.id).await.unwrap().initialized);

        let req = test::TestRequest::delete()
            .uri("/mcp")
            .insert_header((SESSION_HEADER, session.id.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::post()
            .uri("/mcp")
            .insert_header((SESSION_HEADER, session.id.clone()))
            .set_json(json!({ "jsonrpc": "2.0", "method": "ping", "id": 9 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
