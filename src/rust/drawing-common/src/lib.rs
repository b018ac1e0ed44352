//! 描画エクスポート共通ライブラリ
//!
//! エクスポートサービス、描画ストア、REST API / MCP ハンドラーを提供

pub mod error;
pub mod store;
pub mod export;
pub mod config;
pub mod api;
pub mod mcp;

// バージョン情報
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

// 主要な型の再エクスポート
pub use error::{DrawingError, Result};
pub use store::{Drawing, DrawingStore, MemoryDrawingStore};
pub use export::{
    ExportFormat,
    ExportRequest,
    ExportService,
    SvgExportRequest,
    PngExportRequest,
    JsonExportRequest,
};
pub use config::Settings;
pub use mcp::{AppState, SessionManager, mcp_handler};
