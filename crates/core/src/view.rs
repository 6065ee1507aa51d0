//! View model: filter, sort, and group the in-memory collection.
//!
//! Everything here borrows from the collection; deriving a view never
//! mutates or clones movies.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::collation::CollationKey;
use crate::error::CoreError;
use crate::movie::Movie;

/// Ordering applied to a derived list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Newest date first
    #[default]
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Highest score first
    ScoreDesc,
    /// Lowest score first
    ScoreAsc,
    /// Locale-aware title order
    Title,
}

impl SortKey {
    pub const ALL_VARIANTS_STR: &'static str = "date-desc|date-asc|score-desc|score-asc|title";

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::ScoreDesc => "score-desc",
            Self::ScoreAsc => "score-asc",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date-desc" => Ok(Self::DateDesc),
            "date-asc" => Ok(Self::DateAsc),
            "score-desc" => Ok(Self::ScoreDesc),
            "score-asc" => Ok(Self::ScoreAsc),
            "title" => Ok(Self::Title),
            other => Err(CoreError::InvalidSortKey(other.to_owned())),
        }
    }
}

/// Either no filtering (`all`) or an exact-match value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExactFilter<T> {
    #[default]
    All,
    Exact(T),
}

impl<T: PartialEq> ExactFilter<T> {
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Exact(expected) => expected == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for ExactFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Exact(v) => v.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for ExactFilter<T> {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse()
            .map(Self::Exact)
            .map_err(|_| CoreError::InvalidFilter(trimmed.to_owned()))
    }
}

/// Current search/filter/sort selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub score: ExactFilter<i64>,
    pub year: ExactFilter<i32>,
    pub sort: SortKey,
}

impl ViewQuery {
    fn matches(&self, movie: &Movie, needle: Option<&str>) -> bool {
        needle.is_none_or(|n| movie.title.to_lowercase().contains(n))
            && self.score.matches(&movie.score)
            && self.year.matches(&movie.year)
    }
}

/// Filter then sort the collection.
///
/// Filters are conjunctive: title search (case-insensitive substring), exact
/// score, exact year. Sorting is stable, so equal keys keep collection order.
#[must_use]
pub fn derive<'a>(movies: &'a [Movie], query: &ViewQuery) -> Vec<&'a Movie> {
    let needle = query.search.to_lowercase();
    let needle = (!needle.is_empty()).then_some(needle.as_str());

    let mut out: Vec<&Movie> = movies.iter().filter(|m| query.matches(m, needle)).collect();

    match query.sort {
        SortKey::DateDesc => out.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::DateAsc => out.sort_by(|a, b| a.date.cmp(&b.date)),
        SortKey::ScoreDesc => out.sort_by(|a, b| b.score.cmp(&a.score)),
        SortKey::ScoreAsc => out.sort_by(|a, b| a.score.cmp(&b.score)),
        SortKey::Title => out.sort_by_cached_key(|m| CollationKey::new(&m.title)),
    }
    out
}

/// Movies of one year with their net score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearGroup<'a> {
    pub year: i32,
    pub net_score: i64,
    pub movies: Vec<&'a Movie>,
}

impl YearGroup<'_> {
    /// Whether the net score renders as positive (zero counts as positive).
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.net_score >= 0
    }
}

/// Group a derived list by year, newest year first.
///
/// Members keep their order from `movies`; `net_score` is the signed sum of
/// member scores, saturating at the `i64` bounds.
#[must_use]
pub fn group_by_year<'a>(movies: &[&'a Movie]) -> Vec<YearGroup<'a>> {
    let mut by_year: BTreeMap<i32, Vec<&'a Movie>> = BTreeMap::new();
    for movie in movies {
        by_year.entry(movie.year).or_default().push(*movie);
    }

    by_year
        .into_iter()
        .rev()
        .map(|(year, members)| YearGroup {
            year,
            net_score: members.iter().fold(0_i64, |acc, m| acc.saturating_add(m.score)),
            movies: members,
        })
        .collect()
}

/// Distinct years present in the collection, newest first.
#[must_use]
pub fn available_years(movies: &[Movie]) -> Vec<i32> {
    movies.iter().map(|m| m.year).collect::<BTreeSet<_>>().into_iter().rev().collect()
}
