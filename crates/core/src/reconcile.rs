//! Pure reconciliation: validate raw rows and deduplicate by `(title, year)`.
//!
//! The I/O half (fetching, write-through, cache fallback) lives in the
//! service crate; this module only turns rows into a collection.

use std::collections::HashSet;

use serde::Serialize;

use crate::movie::{Movie, RemoteMovie};

/// Counts describing what a reconciliation kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub kept: usize,
    pub duplicates_dropped: usize,
    pub invalid_dropped: usize,
}

impl ReconcileReport {
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.duplicates_dropped.saturating_add(self.invalid_dropped)
    }
}

/// A deduplicated collection plus its diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciled {
    pub movies: Vec<Movie>,
    pub report: ReconcileReport,
}

/// Build a collection from raw rows.
///
/// Rows are taken in arrival order. A row without a non-empty title or a
/// resolvable year is dropped; the first row for a given `(title, year)`
/// wins and later ones are dropped.
#[must_use]
pub fn reconcile<I>(rows: I) -> Reconciled
where
    I: IntoIterator<Item = RemoteMovie>,
{
    let mut seen: HashSet<(String, i32)> = HashSet::new();
    let mut out = Reconciled::default();

    for row in rows {
        let movie = match Movie::from_remote(row) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!(error = %e, "dropping invalid movie row");
                out.report.invalid_dropped = out.report.invalid_dropped.saturating_add(1);
                continue;
            },
        };

        let (title, year) = movie.dedup_key();
        if !seen.insert((title.to_owned(), year)) {
            tracing::debug!(title, year, "dropping duplicate movie row");
            out.report.duplicates_dropped = out.report.duplicates_dropped.saturating_add(1);
            continue;
        }
        out.movies.push(movie);
    }

    out.report.kept = out.movies.len();
    out
}
