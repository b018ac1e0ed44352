//! 共通APIモデル定義

use serde::{Deserialize, Serialize};
use crate::error::DrawingError;
use crate::export::ExportFormat;

/// エクスポート結果
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportPayload {
    pub id: String,
    pub format: String,
    pub mime_type: String,
    pub data: String,
}

impl ExportPayload {
    pub fn new(id: &str, format: ExportFormat, data: String) -> Self {
        ExportPayload {
            id: id.to_string(),
            format: format.label().to_lowercase(),
            mime_type: format.mime_type().to_string(),
            data,
        }
    }
}

/// ヘルスチェック結果
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// 共通レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// APIエラー
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl From<&DrawingError> for ApiError {
    fn from(err: &DrawingError) -> Self {
        ApiError {
            code: err.error_code().to_string(),
            message: err.to_string(),
        }
    }
}
