//! MCP (Model Context Protocol) サポート

mod handler;
mod session;
pub mod tools;

pub use handler::mcp_handler;
pub use session::{SessionManager, SessionState};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::error::DrawingError;
use crate::export::ExportService;

/// アプリケーション状態（共通）
pub struct AppState<S> {
    pub export_service: ExportService<S>,
    pub session_manager: SessionManager,
}

impl<S> AppState<S> {
    pub fn new(export_service: ExportService<S>) -> Self {
        AppState {
            export_service,
            session_manager: SessionManager::new(),
        }
    }
}

/// JSON-RPCエラーコード
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
/// MCP: リソースが見つからない
pub const RESOURCE_NOT_FOUND: i32 = -32002;

/// MCPプロトコルバージョン
pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// JSON-RPCエラー
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        JsonRpcError {
            code: INVALID_PARAMS,
            message: message.into(),
            data: None,
        }
    }

    pub fn method_not_found(message: impl Into<String>) -> Self {
        JsonRpcError {
            code: METHOD_NOT_FOUND,
            message: message.into(),
            data: None,
        }
    }
}

impl From<DrawingError> for JsonRpcError {
    fn from(err: DrawingError) -> Self {
        let code = match &err {
            DrawingError::NotFound(_) => RESOURCE_NOT_FOUND,
            DrawingError::InvalidParameter(_) => INVALID_PARAMS,
            _ => INTERNAL_ERROR,
        };
        JsonRpcError {
            code,
            message: err.to_string(),
            data: Some(json!({ "code": err.error_code() })),
        }
    }
}

/// JSON-RPCリクエスト（idがなければ通知）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPCレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Value,
}

impl JsonRpcResponse {
    pub fn from_result(id: Value, result: Result<Value, JsonRpcError>) -> Self {
        match result {
            Ok(value) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                result: Some(value),
                error: None,
                id,
            },
            Err(error) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                result: None,
                error: Some(error),
                id,
            },
        }
    }
}

/// MCPサーバー情報
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// MCPクライアント機能
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling: Option<Value>,
}

/// MCPサーバー機能
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// ツール機能
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolsCapability {
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawing_error_mapping() {
        let err: JsonRpcError = DrawingError::NotFound("x".to_string()).into();
        assert_eq!(err.code, RESOURCE_NOT_FOUND);
        assert_eq!(err.data.unwrap()["code"], "DRAWING_NOT_FOUND");

        let err: JsonRpcError = DrawingError::InvalidParameter("bad".to_string()).into();
        assert_eq!(err.code, INVALID_PARAMS);

        let err: JsonRpcError = DrawingError::ExportFailed {
            format: "SVG".to_string(),
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(err.code, INTERNAL_ERROR);
    }

    #[test]
    fn test_notification_detection() {
        let req: JsonRpcRequest = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        }))
        .unwrap();
        assert!(req.is_notification());
    }
}
