//! Shared constants for movie-tracker.

/// Maximum number of typeahead suggestions returned by [`crate::suggest`].
pub const MAX_SUGGESTIONS: usize = 5;

/// Header row written to a freshly created year tab.
pub const SHEET_HEADER: [&str; 3] = ["Title", "Score", "Notes"];

/// Years that map to a four-digit tab name and so can be read back.
pub const TAB_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Score used when a sheet cell is empty or not an integer.
pub const DEFAULT_SCORE: i64 = 0;

/// Default RemoteStore endpoint (the bundled `serve` command).
pub const DEFAULT_REMOTE_URL: &str = "http://127.0.0.1:37780/exec";

/// Default port for the bundled RemoteStore server.
pub const DEFAULT_SERVER_PORT: u16 = 37780;

/// HTTP client timeout when `MOVIE_TRACKER_HTTP_TIMEOUT_SECS` is unset.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// SQLite pool size for the spreadsheet store.
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

/// Message shown when a derived view has no rows.
pub const EMPTY_STATE_MESSAGE: &str = "No movies yet! Add your first movie to get started.";
