//! Error types for the Campus core crate.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Top-level error type for all Campus core operations.
#[derive(Debug, Error)]
pub enum CampusError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("validation error: {0}")]
    Validation(ValidationErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}

impl CampusError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<ValidationErrors> for CampusError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// A convenience Result alias that defaults to [`CampusError`].
pub type Result<T> = std::result::Result<T, CampusError>;
