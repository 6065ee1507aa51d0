//! Movie entity, wire record, and year resolution.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_SCORE;
use crate::error::CoreError;

/// Namespace for [`MovieId::stable`]. Changing it changes every id.
const MOVIE_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6d6f_7669_652d_7472_6163_6b65_7200_0001);

/// Identifier of a movie entry.
///
/// Ids minted by this crate are UUID v5 strings over `(title, year)`, so the
/// same row gets the same id on every read. Older payloads carried numeric
/// ids; those deserialize as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MovieId(pub String);

impl MovieId {
    #[must_use]
    pub fn stable(title: &str, year: i32) -> Self {
        let name = format!("{title}\u{1f}{year}");
        Self(Uuid::new_v5(&MOVIE_ID_NAMESPACE, name.as_bytes()).to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

/// A validated movie entry as held in the in-memory collection and the local cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub score: i64,
    #[serde(default)]
    pub notes: String,
    /// Resolved year: explicit when supplied, otherwise taken from `date`.
    pub year: i32,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
}

impl Movie {
    /// Validate a raw record.
    ///
    /// The title must be non-empty after trimming and a year must be resolvable
    /// from either `year` or `date`. Missing score becomes 0, missing notes
    /// become empty, and a missing or unparseable date becomes January 1 of the
    /// resolved year.
    pub fn from_remote(row: RemoteMovie) -> Result<Self, CoreError> {
        let title = row.title.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() {
            return Err(CoreError::InvalidMovie("empty title".to_owned()));
        }

        let parsed_date = row.date.as_deref().and_then(parse_movie_date);
        let year = row
            .year
            .or_else(|| parsed_date.map(|d| d.year()))
            .ok_or_else(|| CoreError::InvalidMovie(format!("no resolvable year for {title:?}")))?;
        let date = match parsed_date {
            Some(d) => d,
            None => january_first(year)?,
        };

        let date_added = row.date_added.as_deref().and_then(|s| {
            DateTime::parse_from_rfc3339(s.trim()).ok().map(|d| d.with_timezone(&Utc))
        });

        Ok(Self {
            id: MovieId::stable(title, year),
            title: title.to_owned(),
            score: row.score.unwrap_or(DEFAULT_SCORE),
            notes: row.notes.map(|n| n.trim().to_owned()).unwrap_or_default(),
            year,
            date,
            date_added,
        })
    }

    /// Deduplication key: `(title, year)`.
    #[must_use]
    pub fn dedup_key(&self) -> (&str, i32) {
        (self.title.as_str(), self.year)
    }
}

/// A movie record as it travels over the wire or sits in an old cache dump.
///
/// Every field is optional so that a single noisy row cannot poison a whole
/// payload; validation happens in [`Movie::from_remote`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMovie {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_id"
    )]
    pub id: Option<MovieId>,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_score")]
    pub score: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_year")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    pub date: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_text"
    )]
    pub date_added: Option<String>,
}

impl RemoteMovie {
    /// Decode one row. A value that is not an object yields an empty record.
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "row is not a movie record");
            Self::default()
        })
    }

    /// Minimal constructor used by tests and the spreadsheet reader.
    #[must_use]
    pub fn new(title: impl Into<String>, score: i64) -> Self {
        Self { title: Some(title.into()), score: Some(score), ..Self::default() }
    }

    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl From<&Movie> for RemoteMovie {
    fn from(movie: &Movie) -> Self {
        Self {
            id: Some(movie.id.clone()),
            title: Some(movie.title.clone()),
            score: Some(movie.score),
            notes: Some(movie.notes.clone()),
            year: Some(movie.year),
            date: Some(movie.date.format("%Y-%m-%d").to_string()),
            date_added: movie.date_added.map(|d| d.to_rfc3339()),
        }
    }
}

/// Deserialize a list of rows where any element that is not a movie object
/// becomes an empty record, which validation then drops and counts.
pub fn deserialize_lenient_rows<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<RemoteMovie>, D::Error> {
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(values.unwrap_or_default().into_iter().map(RemoteMovie::from_value).collect())
}

fn deserialize_lenient_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<MovieId>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Strings pass through and numbers become their decimal text (a sheet cell
/// holding `1917` arrives as a number). Anything else maps to `None`.
fn deserialize_lenient_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Accepts integers, integral floats, and numeric strings that fit an `i32`.
fn deserialize_lenient_year<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i32>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                #[allow(clippy::cast_possible_truncation, reason = "checked integral and in range below")]
                let whole = n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64);
                whole
            })
            .and_then(|y| i32::try_from(y).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Accepts integers, floats (truncated), numeric strings, and null.
/// Anything else maps to `None` so the score falls back to its default.
fn deserialize_lenient_score<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| {
            #[allow(clippy::cast_possible_truncation, reason = "scores are small integers")]
            let truncated = n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64);
            truncated
        }),
        serde_json::Value::String(s) => parse_score_cell(&s),
        _ => None,
    }))
}

/// Parse a spreadsheet score cell the way a lenient integer parse does:
/// leading sign and digits are taken, trailing garbage is ignored.
#[must_use]
pub fn parse_score_cell(cell: &str) -> Option<i64> {
    let trimmed = cell.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    let number: i64 = digits.get(..end)?.parse().ok()?;
    Some(sign * number)
}

/// Parse a movie date: `YYYY-MM-DD`, or a full RFC 3339 timestamp.
#[must_use]
pub fn parse_movie_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
}

/// Year of a date string, if the string parses.
#[must_use]
pub fn year_from_date(raw: &str) -> Option<i32> {
    parse_movie_date(raw).map(|d| d.year())
}

/// Resolve a year from an explicit value or a date string.
#[must_use]
pub fn resolve_year(year: Option<i32>, date: Option<&str>) -> Option<i32> {
    year.or_else(|| date.and_then(year_from_date))
}

/// January 1 of `year`, the default date for rows that only carry a year.
pub fn january_first(year: i32) -> Result<NaiveDate, CoreError> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| CoreError::InvalidMovie(format!("year out of range: {year}")))
}

/// A movie the user is submitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub score: i64,
    pub notes: Option<String>,
    pub date: Option<NaiveDate>,
    pub year: Option<i32>,
}
