use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::cors::CorsLayer;
use tracing::info;

use pdf_converter::config::Config;
use pdf_converter::layout::PageConfig;
use pdf_converter::routes::{build_router, http_trace_layer};
use pdf_converter::state::AppState;
use pdf_converter::storage::S3Store;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    pdf_converter::init_tracing(&config.rust_log);

    info!("Starting PDF converter API v{}", env!("CARGO_PKG_VERSION"));

    let store = S3Store::from_settings(&config.s3).await;
    info!(
        "S3 client initialized (region: {}, endpoint: {})",
        config.s3.region,
        config.s3.endpoint.as_deref().unwrap_or("aws")
    );

    let page_config = PageConfig::letter();
    info!(
        "Layout: {}x{}pt, margin {}pt, {}pt Helvetica",
        page_config.page_width_pt,
        page_config.page_height_pt,
        page_config.margin_pt,
        page_config.font_size_pt
    );

    let state = AppState::new(Arc::new(store), page_config);

    let app = build_router(state)
        .layer(http_trace_layer())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
