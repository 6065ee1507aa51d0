//! Local cache abstraction
//!
//! One durable slot holding the whole collection. Read once at startup,
//! overwritten in full after every successful reconciliation. Writes are
//! synchronous.

use std::sync::{Mutex, PoisonError};

use anyhow::Result;

use crate::movie::Movie;

/// Durable single-slot storage for the movie collection.
pub trait LocalCache: Send + Sync {
    /// Read the slot. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Movie>>>;

    /// Replace the slot contents with `movies`.
    fn store(&self, movies: &[Movie]) -> Result<()>;
}

/// Process-local cache, for tests and offline previews.
#[derive(Debug, Default)]
pub struct MemoryCache {
    slot: Mutex<Option<Vec<Movie>>>,
}

impl MemoryCache {
    #[must_use]
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self { slot: Mutex::new(Some(movies)) }
    }
}

impl LocalCache for MemoryCache {
    fn load(&self) -> Result<Option<Vec<Movie>>> {
        let slot = self
            .slot
            .lock()
            .map_err(|e: PoisonError<_>| anyhow::anyhow!("cache lock poisoned: {e}"))?;
        Ok(slot.clone())
    }

    fn store(&self, movies: &[Movie]) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e: PoisonError<_>| anyhow::anyhow!("cache lock poisoned: {e}"))?;
        *slot = Some(movies.to_vec());
        Ok(())
    }
}
