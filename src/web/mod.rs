mod error;
mod extractors;
mod handlers;
mod routes;
pub mod security;
mod state;

pub use error::{AppError, AppResult};
pub use state::AppState;

use crate::models::MediaKind;
use crate::{Config, Database};
use anyhow::Result;
use axum::middleware;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

/// Assembles the full API router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let max_upload = state.max_upload_bytes;

    Router::new()
        .merge(routes::account_routes())
        .merge(routes::tag_routes())
        .nest("/photos", routes::media_routes(MediaKind::Photo, max_upload))
        .nest("/videos", routes::media_routes(MediaKind::Video, max_upload))
        .merge(routes::health_routes())
        .layer(middleware::from_fn(security::apply_security_headers))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config, db: Database, addr: &str) -> Result<()> {
    let state = Arc::new(AppState::new(config, db)?);
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
