//! 描画エクスポートサーバー

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use drawing_common::{
    api, mcp_handler, AppState, ExportService, MemoryDrawingStore, Settings, VERSION,
};

/// セッション掃除の間隔
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(600);
/// 無操作でセッションを破棄するまでの時間
const SESSION_MAX_IDLE: Duration = Duration::from_secs(3600);

fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

fn build_store(settings: &Settings) -> anyhow::Result<MemoryDrawingStore> {
    match settings.store.seed_file.as_deref() {
        Some(path) => MemoryDrawingStore::from_seed_file(path)
            .with_context(|| format!("failed to load seed file {}", path)),
        None => {
            warn!("No seed file configured (SEED_FILE); starting with an empty drawing store");
            Ok(MemoryDrawingStore::new())
        }
    }
}

fn build_cors(origins: &[String]) -> Cors {
    if origins.iter().any(|o| o == "*") {
        return Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);
    }
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 設定読み込み
    let settings = Settings::new().context("failed to load configuration")?;
    init_logging(&settings.logging.level)?;
    settings.validate().context("invalid configuration")?;

    const BUILD_NUMBER: &str = env!("BUILD_NUMBER");
    const GIT_HASH: &str = env!("GIT_HASH");
    info!("drawing-server starting (version {}, build #{}, {})", VERSION, BUILD_NUMBER, GIT_HASH);

    // ストアとサービスの初期化
    let store = Arc::new(build_store(&settings)?);
    info!("Drawing store ready with {} drawing(s)", store.len().await);
    debug!("Seeded drawing ids: {:?}", store.ids().await);

    let export_service = web::Data::new(ExportService::new(store.clone()));
    let app_state = Arc::new(AppState::new(ExportService::new(store.clone())));
    let app_state_data = web::Data::new(app_state.clone());

    // 期限切れMCPセッションの定期削除
    let session_manager = app_state.session_manager.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = session_manager.cleanup_expired(SESSION_MAX_IDLE).await;
            if removed > 0 {
                info!(
                    "Removed {} expired MCP session(s), {} still active",
                    removed,
                    session_manager.count().await
                );
            }
        }
    });

    let bind_address = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Starting HTTP server on {}", bind_address);

    let cors_origins = settings.server.cors_origins.clone();
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(export_service.clone())
            .app_data(app_state_data.clone())
            .wrap(middleware::Logger::default())
            .wrap(build_cors(&cors_origins))
            // REST API
            .configure(api::configure::<Arc<MemoryDrawingStore>>)
            // MCP エンドポイント
            .route("/mcp", web::post().to(mcp_handler::<Arc<MemoryDrawingStore>>))
            .route("/mcp", web::delete().to(mcp_handler::<Arc<MemoryDrawingStore>>))
    });
    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    let server = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run();

    info!("Server running at http://{}", bind_address);
    info!("MCP endpoint available at http://{}/mcp", bind_address);

    server.await.context("HTTP server error")?;
    info!("drawing-server stopped");
    Ok(())
}

