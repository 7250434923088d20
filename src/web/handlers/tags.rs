use crate::models::{CreateTag, UpdateTag};
use crate::services::tags;
use crate::web::error::AppResult;
use crate::web::extractors::{CurrentUser, JsonBody, PathParams, QueryParams};
use crate::web::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct TagQuery {
    pub prefix: Option<String>,
}

/// GET /tags
pub async fn list_tags(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<TagQuery>,
) -> AppResult<Response> {
    let tags = match query.prefix.as_deref() {
        Some(prefix) if !prefix.is_empty() => tags::list_tags_with_prefix(&state.db, prefix)?,
        _ => tags::list_tags(&state.db)?,
    };
    Ok(Json(tags).into_response())
}

/// POST /tags
pub async fn create_tag(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    JsonBody(form): JsonBody<CreateTag>,
) -> AppResult<Response> {
    let tag = tags::create_tag(&state.db, &form.name, form.description.as_deref())?;
    Ok((StatusCode::CREATED, Json(tag)).into_response())
}

/// GET /tags/:id
pub async fn get_tag(
    State(state): State<Arc<AppState>>,
    PathParams(id): PathParams<Uuid>,
) -> AppResult<Response> {
    let tag = tags::get_tag(&state.db, id)?;
    Ok(Json(tag).into_response())
}

/// PUT /tags/:id
pub async fn update_tag(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    PathParams(id): PathParams<Uuid>,
    JsonBody(form): JsonBody<UpdateTag>,
) -> AppResult<Response> {
    let tag = tags::update_tag(&state.db, id, &form)?;
    Ok(Json(tag).into_response())
}

/// DELETE /tags/:id
pub async fn delete_tag(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> AppResult<Response> {
    tags::delete_tag(&state.db, id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
