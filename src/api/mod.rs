pub mod handlers;
pub mod types;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::pipeline::BurnPipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<BurnPipeline>,
}

/// Every request recomputes from fresh upstream data; nothing is cached.
pub fn router(pipeline: Arc<BurnPipeline>) -> Router {
    let state = Arc::new(AppState { pipeline });

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/burns", get(handlers::burns))
        .route("/api/v1/price", get(handlers::price))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(pipeline: Arc<BurnPipeline>, host: &str, port: u16) -> eyre::Result<()> {
    let app = router(pipeline);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
