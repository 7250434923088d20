pub mod auth;
pub mod error;
pub mod media;
pub mod storage;
pub mod tags;
pub mod tokens;

pub use error::{FieldError, ServiceError, ServiceResult};
