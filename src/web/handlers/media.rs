use crate::models::{MediaKind, MediaUpdate, NewMedia};
use crate::services::{media, ServiceError};
use crate::web::error::AppResult;
use crate::web::extractors::{CurrentUser, JsonBody, PathParams, QueryParams};
use crate::web::state::AppState;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::Extension;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct MediaQuery {
    pub tag: Option<String>,
}

/// GET /photos, GET /videos
pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<MediaKind>,
    QueryParams(query): QueryParams<MediaQuery>,
) -> AppResult<Response> {
    let items = match query.tag.as_deref() {
        Some(tag) if !tag.is_empty() => media::list_by_tag(&state.db, kind, tag)?,
        _ => media::list_media(&state.db, kind)?,
    };
    Ok(Json(items).into_response())
}

/// POST /photos, POST /videos
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<MediaKind>,
    CurrentUser(user): CurrentUser,
    JsonBody(form): JsonBody<NewMedia>,
) -> AppResult<Response> {
    let item = media::create_media(&state.db, kind, &form)?;
    tracing::info!("{} '{}' created by '{}'", kind, item.title, user.username);
    Ok((StatusCode::CREATED, Json(item)).into_response())
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<MediaKind>,
    PathParams(id): PathParams<Uuid>,
) -> AppResult<Response> {
    let item = media::get_media(&state.db, kind, id)?;
    Ok(Json(item).into_response())
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<MediaKind>,
    CurrentUser(_user): CurrentUser,
    PathParams(id): PathParams<Uuid>,
    JsonBody(form): JsonBody<MediaUpdate>,
) -> AppResult<Response> {
    let item = media::update_media(&state.db, kind, id, &form)?;
    Ok(Json(item).into_response())
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<MediaKind>,
    CurrentUser(_user): CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> AppResult<Response> {
    let removed = media::delete_media(&state.db, kind, id)?;
    if let Some(file) = removed.file.as_deref() {
        if let Err(e) = state.files.remove(file) {
            tracing::warn!("Could not remove stored file {}: {}", file, e);
        }
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// PUT /photos/:id/file, PUT /videos/:id/file
///
/// Expects a multipart body with a `file` part. The previous file, if any,
/// is removed once the new one is attached.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<MediaKind>,
    CurrentUser(user): CurrentUser,
    PathParams(id): PathParams<Uuid>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    // Fail before touching the disk when the item is gone.
    media::get_media(&state.db, kind, id)?;

    let mut stored = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        stored = Some(state.files.save(kind, &name, content_type.as_deref(), &data)?);
        break;
    }

    let reference = stored
        .ok_or_else(|| ServiceError::invalid("file", "No file was submitted"))?;

    let (item, previous) = match media::attach_file(&state.db, kind, id, &reference) {
        Ok(result) => result,
        Err(e) => {
            if let Err(cleanup) = state.files.remove(&reference) {
                tracing::warn!("Could not remove orphaned upload {}: {}", reference, cleanup);
            }
            return Err(e.into());
        }
    };

    if let Some(old) = previous.filter(|old| old != &reference) {
        if let Err(e) = state.files.remove(&old) {
            tracing::warn!("Could not remove replaced file {}: {}", old, e);
        }
    }

    tracing::info!("{} {} file set to {} by '{}'", kind, id, reference, user.username);
    Ok(Json(item).into_response())
}

/// DELETE /photos/:id/file, DELETE /videos/:id/file
pub async fn remove_file(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<MediaKind>,
    CurrentUser(user): CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> AppResult<Response> {
    let (item, previous) = media::detach_file(&state.db, kind, id)?;
    if let Some(old) = previous {
        if let Err(e) = state.files.remove(&old) {
            tracing::warn!("Could not remove detached file {}: {}", old, e);
        }
        tracing::info!("{} {} file {} removed by '{}'", kind, id, old, user.username);
    }
    Ok(Json(item).into_response())
}
