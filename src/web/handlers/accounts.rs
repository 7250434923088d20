use crate::models::ProfileUpdate;
use crate::services::{auth, ServiceError};
use crate::web::error::AppResult;
use crate::web::extractors::{CurrentUser, JsonBody, PathParams};
use crate::web::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use std::sync::Arc;
use uuid::Uuid;

fn require_self_or_admin(user: &crate::models::Account, id: Uuid) -> Result<(), ServiceError> {
    if user.can_manage(id) {
        Ok(())
    } else {
        Err(ServiceError::Authorization(
            "You do not have permission to modify this profile".to_string(),
        ))
    }
}

/// GET /user-profiles
pub async fn list_profiles(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
) -> AppResult<Response> {
    let accounts = auth::list_accounts(&state.db)?;
    Ok(Json(accounts).into_response())
}

/// GET /user-profile/:id
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> AppResult<Response> {
    let account = auth::get_account(&state.db, id)?;
    Ok(Json(account).into_response())
}

/// PUT /user-profile/:id
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    PathParams(id): PathParams<Uuid>,
    JsonBody(update): JsonBody<ProfileUpdate>,
) -> AppResult<Response> {
    require_self_or_admin(&user, id)?;
    let account = auth::update_profile(&state.db, id, &update)?;
    Ok(Json(account).into_response())
}

/// DELETE /user-profile/:id
pub async fn delete_profile(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> AppResult<Response> {
    require_self_or_admin(&user, id)?;
    auth::delete_account(&state.db, id)?;
    tracing::info!("Account {} deleted by '{}'", id, user.username);
    Ok(StatusCode::NO_CONTENT.into_response())
}
