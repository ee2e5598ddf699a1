//! Numeric error codes carried in JSON error bodies

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::ShortlyError;

/// Grouped by thousands:
/// - 0: success
/// - 1000-1099: generic
/// - 2000-2099: auth
/// - 3000-3099: links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,

    AuthFailed = 2000,
    RateLimitExceeded = 2004,

    LinkNotFound = 3000,
    LinkConflict = 3001,
    LinkInvalidUrl = 3002,
    LinkTitleUnavailable = 3003,
    LinkCodeExhausted = 3004,
    LinkDatabaseError = 3005,
}

impl From<&ShortlyError> for ErrorCode {
    fn from(err: &ShortlyError) -> Self {
        match err {
            ShortlyError::Validation(_) => ErrorCode::LinkInvalidUrl,
            ShortlyError::TitleFetch(_) => ErrorCode::LinkTitleUnavailable,
            ShortlyError::NotFound(_) => ErrorCode::LinkNotFound,
            ShortlyError::Conflict(_) => ErrorCode::LinkConflict,
            ShortlyError::CodeSpaceExhausted(_) => ErrorCode::LinkCodeExhausted,
            ShortlyError::DatabaseConfig(_)
            | ShortlyError::DatabaseConnection(_)
            | ShortlyError::DatabaseOperation(_) => ErrorCode::LinkDatabaseError,
            ShortlyError::Auth(_) | ShortlyError::PasswordHash(_) => ErrorCode::AuthFailed,
            ShortlyError::FileOperation(_) | ShortlyError::Serialization(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}
