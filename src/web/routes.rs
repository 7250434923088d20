use super::handlers;
use super::state::AppState;
use crate::models::MediaKind;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::{Extension, Router};
use std::sync::Arc;

/// Multipart framing on top of the largest accepted file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/token/refresh", post(handlers::auth::refresh))
        .route("/user-profiles", get(handlers::accounts::list_profiles))
        .route(
            "/user-profile/:id",
            get(handlers::accounts::get_profile)
                .put(handlers::accounts::update_profile)
                .delete(handlers::accounts::delete_profile),
        )
}

pub fn tag_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/tags",
            get(handlers::tags::list_tags).post(handlers::tags::create_tag),
        )
        .route(
            "/tags/:id",
            get(handlers::tags::get_tag)
                .put(handlers::tags::update_tag)
                .delete(handlers::tags::delete_tag),
        )
}

/// The same handlers serve `/photos` and `/videos`; the kind travels as a
/// request extension.
pub fn media_routes(kind: MediaKind, max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::media::list).post(handlers::media::create),
        )
        .route(
            "/:id",
            get(handlers::media::get)
                .put(handlers::media::update)
                .delete(handlers::media::delete),
        )
        .route(
            "/:id/file",
            put(handlers::media::upload)
                .layer(DefaultBodyLimit::max(
                    max_upload_bytes.saturating_add(MULTIPART_OVERHEAD),
                ))
                .delete(handlers::media::remove_file),
        )
        .layer(Extension(kind))
}

pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(handlers::health))
}
