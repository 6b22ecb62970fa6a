use thiserror::Error;

use crate::database::{DatabaseError, FilterError};
use crate::models::FieldError;
use crate::uploads::UploadError;

/// Failures of the resource and admin services
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed input; the message is client-facing
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(&'static str),

    /// Rejected or unwritable image: unsupported media, payload too large, I/O
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

impl ServiceError {
    /// Map a field error onto the kind's client-facing message
    pub fn from_field(err: FieldError, required_message: &'static str) -> Self {
        match err {
            FieldError::Missing(_) => ServiceError::Validation(required_message.to_string()),
            FieldError::Invalid(field) => ServiceError::Validation(format!("Nilai {} tidak valid", field)),
        }
    }
}

impl From<FilterError> for ServiceError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::InvalidValue { field, .. } => ServiceError::Validation(format!("Nilai {} tidak valid", field)),
        }
    }
}
