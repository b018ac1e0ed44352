//! 共通エラー型定義

use thiserror::Error;

/// 描画エクスポート共通エラー型
#[derive(Debug, Error)]
pub enum DrawingError {
    /// 描画が見つからない
    #[error("Drawing not found: {0}")]
    NotFound(String),

    /// エクスポート失敗（元のエラーメッセージを保持）
    #[error("Failed to export drawing to {format}: {message}")]
    ExportFailed {
        format: String,
        message: String,
    },

    /// 無効なパラメータ（スキーマ検証エラー）
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// ストアエラー
    #[error("Storage error: {0}")]
    Storage(String),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO エラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON パースエラー
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// その他のエラー
    #[error("Other error: {0}")]
    Other(String),
}

/// Result型のエイリアス
pub type Result<T> = std::result::Result<T, DrawingError>;

impl DrawingError {
    /// NotFoundかどうか（呼び出し側の分岐用）
    pub fn is_not_found(&self) -> bool {
        matches!(self, DrawingError::NotFound(_))
    }

    /// HTTPステータスコードを返す
    pub fn status_code(&self) -> u16 {
        match self {
            DrawingError::NotFound(_) => 404,
            DrawingError::InvalidParameter(_) => 400,
            DrawingError::ExportFailed { .. } |
            DrawingError::Storage(_) |
            DrawingError::Config(_) |
            DrawingError::Other(_) => 500,
            DrawingError::Io(_) |
            DrawingError::Json(_) => 500,
        }
    }

    /// エラーコードを返す（APIレスポンス用）
    pub fn error_code(&self) -> &str {
        match self {
            DrawingError::NotFound(_) => "DRAWING_NOT_FOUND",
            DrawingError::ExportFailed { .. } => "EXPORT_FAILED",
            DrawingError::InvalidParameter(_) => "INVALID_PARAMETER",
            DrawingError::Storage(_) => "STORAGE_ERROR",
            DrawingError::Config(_) => "CONFIG_ERROR",
            DrawingError::Io(_) => "IO_ERROR",
            DrawingError::Json(_) => "JSON_ERROR",
            DrawingError::Other(_) => "UNKNOWN_ERROR",
        }
    }
}
