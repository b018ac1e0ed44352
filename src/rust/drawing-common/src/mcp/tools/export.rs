//! exportツール - SVG / PNG / JSON エクスポート

use serde_json::{json, Value};
use tracing::info;

use crate::export::{ExportRequest, ExportService, JsonExportRequest, PngExportRequest, SvgExportRequest};
use crate::mcp::JsonRpcError;
use crate::store::DrawingStore;

/// export_to_svgツールの実行
pub async fn export_svg<S: DrawingStore>(
    arguments: Value,
    service: &ExportService<S>,
) -> Result<Value, JsonRpcError> {
    let request = SvgExportRequest::from_value(arguments)?;
    info!("MCP export_to_svg tool called: id={}", request.id);

    let svg = service.export_svg(&request).await?;
    Ok(text_content(svg))
}

/// export_to_pngツールの実行
pub async fn export_png<S: DrawingStore>(
    arguments: Value,
    service: &ExportService<S>,
) -> Result<Value, JsonRpcError> {
    let request = PngExportRequest::from_value(arguments)?;
    info!(
        "MCP export_to_png tool called: id={}, quality={}, scale={}",
        request.id, request.quality, request.scale
    );

    let png = service.export_png(&request).await?;
    Ok(text_content(png))
}

/// export_to_jsonツールの実行
pub async fn export_json<S: DrawingStore>(
    arguments: Value,
    service: &ExportService<S>,
) -> Result<Value, JsonRpcError> {
    let request = JsonExportRequest::from_value(arguments)?;
    info!("MCP export_to_json tool called: id={}", request.id);

    let content = service.export_json(&request).await?;
    Ok(text_content(content))
}

/// MCPのテキストコンテンツ形式で包む
fn text_content(text: String) -> Value {
    json!({
        "content": [
            {
                "type": "text",
                "text": text
            }
        ]
    })
}
