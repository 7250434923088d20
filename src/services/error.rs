use serde::Serialize;
use std::collections::BTreeMap;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("not permitted: {0}")]
    Authorization(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Field errors grouped by field name, in the shape the API returns them.
    pub fn field_messages(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        if let Self::Validation(errors) = self {
            for error in errors {
                grouped
                    .entry(error.field.clone())
                    .or_default()
                    .push(error.message.clone());
            }
        }
        grouped
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Maps a UNIQUE constraint violation on `column` to a validation error on `field`.
///
/// Application code checks for duplicates before writing; this catches the
/// race where two requests pass that check at the same time.
pub fn map_unique_violation(err: rusqlite::Error, column: &str, field: &str, message: &str) -> ServiceError {
    if let rusqlite::Error::SqliteFailure(ref failure, Some(ref detail)) = err {
        if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE && detail.contains(column) {
            return ServiceError::invalid(field, message);
        }
    }
    ServiceError::Database(err)
}

/// Collects validation failures so every bad field is reported at once.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldError>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn check(&mut self, result: Result<(), String>, field: &str) {
        if let Err(message) = result {
            self.push(field, message);
        }
    }

    pub fn into_result(self) -> ServiceResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(self.0))
        }
    }
}
