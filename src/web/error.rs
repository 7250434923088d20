use crate::services::ServiceError;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    Service(ServiceError),
    /// A request that could not be extracted, with the status axum chose for it.
    Rejected(StatusCode, String),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Service(err) => match &err {
                ServiceError::Validation(_) => (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "validation_error",
                        "message": err.to_string(),
                        "fields": err.field_messages(),
                    }),
                ),
                ServiceError::Authentication(msg) => {
                    let body = json!({ "error": "unauthorized", "message": msg });
                    let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
                    response.headers_mut().insert(
                        header::WWW_AUTHENTICATE,
                        HeaderValue::from_static("Bearer"),
                    );
                    return response;
                }
                ServiceError::Authorization(msg) => (
                    StatusCode::FORBIDDEN,
                    json!({ "error": "forbidden", "message": msg }),
                ),
                ServiceError::NotFound(what) => (
                    StatusCode::NOT_FOUND,
                    json!({ "error": "not_found", "message": format!("{} not found", what) }),
                ),
                _ => {
                    tracing::error!("Service error: {}", err);
                    internal_error()
                }
            },
            AppError::Rejected(status, msg) => {
                let error = match status {
                    StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
                    StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported_media_type",
                    _ => "bad_request",
                };
                (status, json!({ "error": error, "message": msg }))
            }
            AppError::Internal(err) => {
                tracing::error!("Application error: {:?}", err);
                internal_error()
            }
        };

        (status, Json(body)).into_response()
    }
}

fn internal_error() -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "internal_error", "message": "Internal server error" }),
    )
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        Self::Rejected(err.status(), err.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;
