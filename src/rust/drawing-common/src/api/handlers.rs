//! 共通APIハンドラー実装

use actix_web::{http::StatusCode, web, HttpResponse};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::{DrawingError, Result};
use crate::export::{
    ExportFormat, ExportRequest, ExportService, JsonExportRequest, PngExportRequest,
    SvgExportRequest,
};
use crate::store::DrawingStore;
use super::models::{ApiError, ApiResponse, ExportPayload, HealthStatus};

/// ルートを登録
pub fn configure<S: DrawingStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(process_health))
        .route("/api/drawings/{id}/export/png", web::post().to(process_export_png::<S>))
        .route("/api/drawings/{id}/export/{format}", web::get().to(process_export::<S>));
}

/// GET /api/drawings/{id}/export/{format}
///
/// formatは svg / png / json（大文字小文字を区別しない）。PNGは既定オプションで出力する。
pub async fn process_export<S: DrawingStore + 'static>(
    path: web::Path<(String, String)>,
    service: web::Data<ExportService<S>>,
) -> HttpResponse {
    let (id, format) = path.into_inner();
    info!("Processing export request: id={}, format={}", id, format);

    let format = match format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(e) => return error_response(&id, &format, e),
    };

    let request = json!({ "id": &id });
    let result = match format {
        ExportFormat::Svg => match SvgExportRequest::from_value(request) {
            Ok(request) => service.export_svg(&request).await,
            Err(e) => Err(e),
        },
        ExportFormat::Png => match PngExportRequest::from_value(request) {
            Ok(request) => service.export_png(&request).await,
            Err(e) => Err(e),
        },
        ExportFormat::Json => match JsonExportRequest::from_value(request) {
            Ok(request) => service.export_json(&request).await,
            Err(e) => Err(e),
        },
    };
    respond(&id, format, result)
}

/// POST /api/drawings/{id}/export/png
///
/// ボディはPNGオプションのJSONオブジェクト（空でも可）。
pub async fn process_export_png<S: DrawingStore + 'static>(
    path: web::Path<String>,
    body: web::Bytes,
    service: web::Data<ExportService<S>>,
) -> HttpResponse {
    let id = path.into_inner();
    info!("Processing PNG export request: {}", id);

    let result = match build_png_request(&id, &body) {
        Ok(request) => service.export_png(&request).await,
        Err(e) => Err(e),
    };
    respond(&id, ExportFormat::Png, result)
}

/// GET /api/health
pub async fn process_health() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    }))
}

/// パスのIDとボディのオプションを合わせてPNGリクエストを組み立てる
fn build_png_request(id: &str, body: &[u8]) -> Result<PngExportRequest> {
    let mut options = if body.iter().all(u8::is_ascii_whitespace) {
        json!({})
    } else {
        serde_json::from_slice::<Value>(body)
            .map_err(|e| DrawingError::InvalidParameter(format!("Invalid JSON body: {}", e)))?
    };

    let object = options.as_object_mut().ok_or_else(|| {
        DrawingError::InvalidParameter("PNG options must be a JSON object".to_string())
    })?;
    object.insert("id".to_string(), Value::String(id.to_string()));

    PngExportRequest::from_value(options)
}

fn respond(id: &str, format: ExportFormat, result: Result<String>) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::success(ExportPayload::new(id, format, data))),
        Err(e) => error_response(id, format, e),
    }
}

fn error_response(id: &str, format: impl std::fmt::Display, err: DrawingError) -> HttpResponse {
    warn!("{} export of {} failed: {}", format, id, err);
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ApiResponse::<()>::error(ApiError::from(&err)))
}
