use std::path::PathBuf;

use chrono::Local;
use movie_tracker_client::{ClientError, SheetsClient};
use movie_tracker_core::{
    LocalCache, Movie, NewMovie, ViewQuery, YearGroup, available_years, derive, group_by_year,
    suggest,
};
use movie_tracker_storage::FileCache;

use crate::error::ServiceError;
use crate::reconciler::{AddOutcome, Reconciler, SyncOutcome};
use crate::remote::RemoteStore;

/// Tracker wired to the HTTP RemoteStore and a JSON file cache.
pub type SheetsTracker = MovieTracker<SheetsClient, FileCache>;

/// The authoritative in-memory collection.
///
/// `refresh` and `add_movie` take `&mut self` and are the only writers;
/// every view borrows.
pub struct MovieTracker<R, C> {
    reconciler: Reconciler<R, C>,
    movies: Vec<Movie>,
}

impl SheetsTracker {
    /// Build a tracker from environment configuration and load the cache at
    /// `cache_path`.
    pub fn from_env(cache_path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let client = SheetsClient::from_env()?;
        Ok(Self::load(client, FileCache::new(cache_path)))
    }
}

impl<R: RemoteStore, C: LocalCache> MovieTracker<R, C> {
    /// Start from whatever the LocalCache holds. No remote call is made.
    pub fn load(remote: R, cache: C) -> Self {
        let reconciler = Reconciler::new(remote, cache);
        let movies = reconciler.load_cached();
        Self { reconciler, movies }
    }

    /// Reconcile with the RemoteStore. Never fails; see [`SyncOutcome`].
    pub async fn refresh(&mut self) -> SyncOutcome {
        self.reconciler.reconcile(&mut self.movies).await
    }

    /// Submit a movie. `date` defaults to today.
    pub async fn add_movie(&mut self, movie: NewMovie) -> Result<AddOutcome, ServiceError> {
        let today = Local::now().date_naive();
        self.reconciler.submit(&mut self.movies, &movie, today).await
    }

    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Filtered and sorted movies.
    #[must_use]
    pub fn derive(&self, query: &ViewQuery) -> Vec<&Movie> {
        derive(&self.movies, query)
    }

    /// Filtered, sorted, and grouped by year, newest first.
    #[must_use]
    pub fn view(&self, query: &ViewQuery) -> Vec<YearGroup<'_>> {
        group_by_year(&self.derive(query))
    }

    #[must_use]
    pub fn suggest(&self, term: &str) -> Vec<String> {
        suggest(&self.movies, term)
    }

    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        available_years(&self.movies)
    }

    pub const fn reconciler(&self) -> &Reconciler<R, C> {
        &self.reconciler
    }
}
