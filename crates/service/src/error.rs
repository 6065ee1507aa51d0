//! Typed error enum for the service layer.
//!
//! Unifies RemoteStore, cache, and validation failures so callers can match
//! on the failure mode.

use movie_tracker_client::ClientError;
use movie_tracker_core::CoreError;
use thiserror::Error;

/// Service-layer error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// RemoteStore request failed or the endpoint reported failure.
    #[error("remote store: {0}")]
    Remote(#[from] ClientError),

    /// LocalCache read or write failed.
    #[error("local cache: {0}")]
    Cache(#[source] anyhow::Error),

    /// Domain validation failed.
    #[error("core: {0}")]
    Core(#[from] CoreError),

    /// Caller provided invalid input (empty title, unresolvable year).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error is likely transient: the same request may succeed
    /// if the user submits it again.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Remote(e) => e.is_transient(),
            _ => false,
        }
    }
}
