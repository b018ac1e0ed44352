//! エクスポート形式とdata URIユーティリティ

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

use crate::error::{DrawingError, Result};

/// エクスポート形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Svg,
    Png,
    Json,
}

impl ExportFormat {
    /// MIMEタイプ
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Png => "image/png",
            ExportFormat::Json => "application/json",
        }
    }

    /// エラーメッセージ用の表示名
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "SVG",
            ExportFormat::Png => "PNG",
            ExportFormat::Json => "JSON",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = DrawingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "png" => Ok(ExportFormat::Png),
            "json" => Ok(ExportFormat::Json),
            _ => Err(DrawingError::InvalidParameter(format!("Invalid export format: {}", s))),
        }
    }
}

/// バイト列をbase64 data URIに変換
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
