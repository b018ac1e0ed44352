//! エクスポートサービス

use tracing::{debug, error, info};

use super::format::ExportFormat;
use super::placeholder::{placeholder_png_data_uri, render_svg};
use super::schema::{ExportRequest, JsonExportRequest, PngExportRequest, SvgExportRequest};
use crate::error::{DrawingError, Result};
use crate::store::{Drawing, DrawingStore};

/// エクスポートサービス
///
/// 状態は持たず、ストアへのハンドルのみを保持する。各呼び出しは独立している。
#[derive(Debug, Clone)]
pub struct ExportService<S> {
    store: S,
}

impl<S: DrawingStore> ExportService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// SVGにエクスポート
    pub async fn export_svg(&self, request: &SvgExportRequest) -> Result<String> {
        request.validate()?;
        let drawing = self.lookup(&request.id, ExportFormat::Svg).await?;
        Ok(render_svg(&drawing.name))
    }

    /// PNG(data URI)にエクスポート
    pub async fn export_png(&self, request: &PngExportRequest) -> Result<String> {
        request.validate()?;
        debug!(
            "PNG export options: quality={}, scale={}, dark_mode={}, background={}",
            request.quality, request.scale, request.export_with_dark_mode, request.export_background
        );
        self.lookup(&request.id, ExportFormat::Png).await?;
        Ok(placeholder_png_data_uri())
    }

    /// JSONにエクスポート（保存内容をそのまま返す）
    pub async fn export_json(&self, request: &JsonExportRequest) -> Result<String> {
        request.validate()?;
        let drawing = self.lookup(&request.id, ExportFormat::Json).await?;
        Ok(drawing.content)
    }

    /// 描画を取得し、NotFound以外の失敗をExportFailedに包む
    async fn lookup(&self, id: &str, format: ExportFormat) -> Result<Drawing> {
        info!("Exporting drawing {} to {}", id, format);
        match self.store.get_drawing(id).await {
            Ok(drawing) => Ok(drawing),
            Err(e) if e.is_not_found() => Err(e),
            Err(e) => {
                error!("Lookup failed while exporting {} to {}: {}", id, format, e);
                Err(DrawingError::ExportFailed {
                    format: format.label().to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}
