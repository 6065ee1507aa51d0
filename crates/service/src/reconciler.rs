//! Fetch, merge, write-through, fall back.

use chrono::{NaiveDate, Utc};
use movie_tracker_core::{
    AppendRequest, LocalCache, Movie, NewMovie, ReconcileReport, reconcile,
};
use serde::Serialize;

use crate::error::ServiceError;
use crate::remote::RemoteStore;

/// What a sync did to the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "kebab-case")]
pub enum SyncOutcome {
    /// Remote data replaced the collection. `cached` is false when the
    /// write-through to the LocalCache failed.
    Remote { report: ReconcileReport, cached: bool },
    /// The fetch failed; the collection is unchanged.
    UsedCache { reason: String },
}

impl SyncOutcome {
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

/// Sole writer of the collection. Pairs the RemoteStore with the LocalCache.
pub struct Reconciler<R, C> {
    remote: R,
    cache: C,
}

impl<R: RemoteStore, C: LocalCache> Reconciler<R, C> {
    pub const fn new(remote: R, cache: C) -> Self {
        Self { remote, cache }
    }

    pub const fn remote(&self) -> &R {
        &self.remote
    }

    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// Read the LocalCache slot. A missing slot is an empty collection;
    /// an unreadable one is logged and treated the same way.
    pub fn load_cached(&self) -> Vec<Movie> {
        match self.cache.load().map_err(ServiceError::Cache) {
            Ok(Some(movies)) => {
                tracing::debug!(count = movies.len(), "loaded movies from local cache");
                movies
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "starting empty");
                Vec::new()
            },
        }
    }

    /// Replace `collection` with the deduplicated remote rows.
    ///
    /// Any remote failure leaves `collection` and the cache untouched.
    pub async fn reconcile(&self, collection: &mut Vec<Movie>) -> SyncOutcome {
        let rows = match self.remote.fetch_all().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, "remote fetch failed, using cached movies");
                return SyncOutcome::UsedCache { reason: e.to_string() };
            },
        };

        let reconciled = reconcile(rows);
        let report = reconciled.report;
        tracing::info!(
            kept = report.kept,
            duplicates_dropped = report.duplicates_dropped,
            invalid_dropped = report.invalid_dropped,
            "reconciled movies from remote store"
        );

        let cached = self.write_through(&reconciled.movies).is_ok();
        *collection = reconciled.movies;
        SyncOutcome::Remote { report, cached }
    }

    /// Append a movie remotely, then add it to `collection` unless its
    /// `(title, year)` is already present.
    pub async fn submit(
        &self,
        collection: &mut Vec<Movie>,
        movie: &NewMovie,
        today: NaiveDate,
    ) -> Result<AddOutcome, ServiceError> {
        let request = AppendRequest::from_new_movie(movie, today);
        request.validate().map_err(|e| ServiceError::InvalidInput(e.to_string()))?;

        self.remote.append(&request).await?;

        let mut added = Movie::from_remote(request.to_remote_movie())?;
        added.date_added = Some(Utc::now());

        let exists = collection.iter().any(|m| m.dedup_key() == added.dedup_key());
        if exists {
            tracing::info!(title = %added.title, year = added.year, "movie already in collection");
            return Ok(AddOutcome { movie: added, inserted: false, cached: true });
        }

        collection.push(added.clone());
        let cached = self.write_through(collection).is_ok();
        tracing::info!(title = %added.title, year = added.year, "added movie");
        Ok(AddOutcome { movie: added, inserted: true, cached })
    }

    /// Replace the cache slot. Failure is logged; callers only learn whether
    /// the slot now matches memory.
    fn write_through(&self, movies: &[Movie]) -> Result<(), ServiceError> {
        self.cache.store(movies).map_err(ServiceError::Cache).inspect_err(|e| {
            tracing::warn!(error = %e, "write-through failed");
        })
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddOutcome {
    pub movie: Movie,
    /// False when the collection already held this `(title, year)`.
    pub inserted: bool,
    /// False when the LocalCache could not be updated after the add.
    pub cached: bool,
}
