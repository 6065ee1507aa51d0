//! Request and response envelopes for the RemoteStore endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::TAB_YEARS;
use crate::error::CoreError;
use crate::movie::{NewMovie, RemoteMovie, deserialize_lenient_rows, resolve_year};

/// Body of an append request: one movie to add to its year tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl AppendRequest {
    /// Target tab year: explicit `year`, else the year of `date`.
    #[must_use]
    pub fn target_year(&self) -> Option<i32> {
        resolve_year(self.year, Some(&self.date))
    }

    /// Check the request can be stored, returning the trimmed title and target year.
    pub fn validate(&self) -> Result<(&str, i32), CoreError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CoreError::InvalidMovie("title must not be empty".to_owned()));
        }
        let year = self.target_year().ok_or_else(|| {
            CoreError::InvalidMovie(format!("cannot resolve a year from date {:?}", self.date))
        })?;
        if !TAB_YEARS.contains(&year) {
            return Err(CoreError::InvalidMovie(format!(
                "year {year} is outside {}..={}",
                TAB_YEARS.start(),
                TAB_YEARS.end()
            )));
        }
        Ok((title, year))
    }

    /// Build a request from a user submission, dating it `today` when no date is given.
    #[must_use]
    pub fn from_new_movie(movie: &NewMovie, today: NaiveDate) -> Self {
        let date = movie.date.unwrap_or(today);
        Self {
            title: movie.title.trim().to_owned(),
            score: movie.score,
            notes: movie
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(ToOwned::to_owned),
            date: date.format("%Y-%m-%d").to_string(),
            year: movie.year,
        }
    }

    /// The record the submitted movie becomes once stored.
    #[must_use]
    pub fn to_remote_movie(&self) -> RemoteMovie {
        RemoteMovie {
            id: None,
            title: Some(self.title.clone()),
            score: Some(self.score),
            notes: self.notes.clone(),
            year: self.year,
            date: Some(self.date.clone()),
            date_added: None,
        }
    }
}

/// Response to an append: `{success: true}` or `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AppendResponse {
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true, error: None }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, error: Some(error.into()) }
    }
}

/// Response to a full read: `{success, movies}` plus `error` on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_rows")]
    pub movies: Vec<RemoteMovie>,
}

impl ReadResponse {
    #[must_use]
    pub const fn ok(movies: Vec<RemoteMovie>) -> Self {
        Self { success: true, error: None, movies }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, error: Some(error.into()), movies: Vec::new() }
    }
}
