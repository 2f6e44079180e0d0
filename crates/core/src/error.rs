// Central Error Type for the Application

use crate::domain::{ActorId, MovieId};
use thiserror::Error;

/// Application-level error type.
///
/// Not-found variants are expected, addressable outcomes: read paths map an
/// absent entity to `Ok(None)` instead, so these only surface from operations
/// that require the entity to exist (targeted mutations, `movies_of`).
/// Write-path variants are returned only after the enclosing transaction has
/// been rolled back.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Actor with ID {0} not found")]
    ActorNotFound(ActorId),

    #[error("Movie with ID {0} not found")]
    MovieNotFound(MovieId),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// True for the recoverable "entity absent" outcomes.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::ActorNotFound(_) | AppError::MovieNotFound(_))
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-sqlite
// by mapping to the typed variants (orphan rules prevent a From impl here)
