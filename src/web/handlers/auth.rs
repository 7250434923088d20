use crate::models::NewAccount;
use crate::services::{auth, tokens};
use crate::web::error::AppResult;
use crate::web::extractors::ValidatedJson;
use crate::web::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Username must be 1 to 255 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "Please provide a password"))]
    pub password: String,
    #[validate(length(max = 200, message = "First name must be 200 characters or less"))]
    pub first_name: Option<String>,
    #[validate(length(max = 200, message = "Last name must be 200 characters or less"))]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Please provide an email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please provide a password"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Please provide a refresh token"))]
    pub refresh: String,
}

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> AppResult<Response> {
    let new = NewAccount {
        email: req.email,
        username: req.username,
        password: req.password,
        first_name: req.first_name,
        last_name: req.last_name,
    };
    let account = auth::create_account(&state.db, &new)?;
    Ok((StatusCode::CREATED, Json(account)).into_response())
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AppResult<Response> {
    let account = auth::verify_credentials(&state.db, &req.email, &req.password)?;
    let pair = tokens::issue_pair(&account, state.jwt_secret(), state.token_lifetimes())?;
    tracing::info!("Account '{}' logged in", account.username);
    Ok(Json(pair).into_response())
}

/// POST /token/refresh
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> AppResult<Response> {
    let access = tokens::refresh(
        &state.db,
        &req.refresh,
        state.jwt_secret(),
        state.token_lifetimes(),
    )?;
    Ok(Json(json!({ "access": access })).into_response())
}
