//! pictor-api - HTTP API server for pictor.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pictor_api::{build_router, parse_allowed_origins, AppState};
use pictor_core::defaults;
use pictor_db::Database;
use pictor_inference::{GeminiVisionBackend, ImageAnalyzer, VisionBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   RUST_LOG    - standard env filter (default: "pictor_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pictor_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    info!(log_format = %log_format, "Logging initialized");

    // Get configuration from environment
    let host = std::env::var("HOST").unwrap_or_else(|_| defaults::SERVER_HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| defaults::SERVER_PORT.to_string())
        .parse()
        .unwrap_or(defaults::SERVER_PORT);

    // Vision backend and analyzer
    let backend = GeminiVisionBackend::from_env()?;
    info!(model = backend.model_name(), "Vision backend initialized");

    match backend.health_check().await {
        Ok(true) => info!("Vision backend reachable"),
        Ok(false) => tracing::warn!("Vision backend not reachable; requests will fail"),
        Err(e) => tracing::warn!(error = %e, "Vision backend health check failed"),
    }

    let analyzer = Arc::new(ImageAnalyzer::new(Arc::new(backend)));

    // Hosted table-store
    let db = Database::from_env()?;
    info!(db_table = defaults::METADATA_TABLE, "Table-store client initialized");

    // Build router
    let state = AppState::new(analyzer, db);
    let app = build_router(state, parse_allowed_origins());

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
