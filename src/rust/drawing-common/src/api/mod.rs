//! 共通APIモジュール

pub mod models;
pub mod handlers;

// 再エクスポート
pub use models::{ApiResponse, ApiError, ExportPayload, HealthStatus};
pub use handlers::{
    configure,
    process_export,
    process_export_png,
    process_health,
};
