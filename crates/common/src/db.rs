//! Shared database types for Roster
//!
//! Repository implementations report failures as [`RepositoryError`], which
//! classifies constraint violations before they reach the HTTP layer.

use crate::error::Error;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Record already exists")]
    AlreadyExists,

    #[error("Referenced record does not exist: {0}")]
    Referential(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Database error: {0}")]
    Storage(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        let kind = match &err {
            sqlx::Error::Database(db_err) => Some(db_err.kind()),
            _ => None,
        };

        match kind {
            Some(ErrorKind::ForeignKeyViolation) => RepositoryError::Referential(err.to_string()),
            Some(ErrorKind::UniqueViolation) => RepositoryError::AlreadyExists,
            Some(ErrorKind::NotNullViolation) | Some(ErrorKind::CheckViolation) => {
                RepositoryError::InvalidData(err.to_string())
            }
            _ => RepositoryError::Storage(err),
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Error::NotFound(msg),
            RepositoryError::AlreadyExists => Error::Conflict("Record already exists".to_string()),
            RepositoryError::Referential(msg) => Error::NotFound(msg),
            RepositoryError::InvalidData(msg) => Error::Validation(msg),
            RepositoryError::Storage(e) => Error::Database(e),
        }
    }
}
