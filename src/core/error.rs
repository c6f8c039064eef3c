//! Unified error handling
//!
//! Every failure in this crate degrades to "local state intact, external
//! effect not confirmed":
//!
//! - [`AppError::Validation`] blocks a mutation before any state change and
//!   carries the user-visible message
//! - [`AppError::Sync`] means the local mutation already succeeded and stands;
//!   only a transient notice is shown
//! - malformed persisted data is never an error at all; the schema patcher
//!   absorbs it by defaulting

use crate::store::storage::StorageError;
use crate::sync::SyncError;
use thiserror::Error;

/// Application error enum
#[derive(Debug, Error)]
pub enum AppError {
    /// A required order field is missing; message is shown to the user as-is
    #[error("{0}")]
    Validation(String),

    /// Sink push failed; local state is unaffected
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Durable storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Create a validation error with a user-visible message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
