//! 描画エクスポートモジュール
//!
//! リクエストをフォーマットごとのスキーマで検証し、ストアから描画を取得して
//! SVG / PNG(data URI) / JSON 文字列を生成する。

pub mod format;
pub mod placeholder;
pub mod schema;
pub mod service;

// 公開API
pub use format::{data_uri, ExportFormat};
pub use schema::{ExportRequest, JsonExportRequest, PngExportRequest, SvgExportRequest};
pub use service::ExportService;
