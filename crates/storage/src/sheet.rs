//! SQLite-backed spreadsheet: named tabs of string-cell rows.
//!
//! Year tabs (`"2024"`) hold one movie per row under a
//! `[Title, Score, Notes]` header. Rows are append-only.

use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use movie_tracker_core::constants::{DEFAULT_DB_POOL_SIZE, DEFAULT_SCORE, SHEET_HEADER};
use movie_tracker_core::env_config::{DB_POOL_SIZE_ENV, env_parse_with_default};
use movie_tracker_core::{MovieId, RemoteMovie, parse_score_cell};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};

use crate::error::StorageError;
use crate::migrations;

type PooledConn = PooledConnection<SqliteConnectionManager>;

#[allow(clippy::unwrap_used, reason = "static pattern")]
static YEAR_TAB: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}$").unwrap());

/// Whether a tab name is a four-digit year.
#[must_use]
pub fn is_year_tab(name: &str) -> bool {
    YEAR_TAB.is_match(name)
}

/// Map one data row of a year tab to a wire record.
///
/// Returns `None` for rows whose first cell is blank. Score falls back to 0,
/// notes to empty, and the date is January 1 of the tab's year. The id is
/// derived from `(title, year)` so repeated reads agree.
#[must_use]
pub fn row_to_movie(year: i32, cells: &[String], read_at: DateTime<Utc>) -> Option<RemoteMovie> {
    let title = cells.first().map(|c| c.trim()).filter(|t| !t.is_empty())?;
    let score = cells.get(1).and_then(|c| parse_score_cell(c)).unwrap_or(DEFAULT_SCORE);
    let notes = cells.get(2).map(|c| c.trim().to_owned()).unwrap_or_default();

    Some(RemoteMovie {
        id: Some(MovieId::stable(title, year)),
        title: Some(title.to_owned()),
        score: Some(score),
        notes: Some(notes),
        year: Some(year),
        date: Some(format!("{year:04}-01-01")),
        date_added: Some(read_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    })
}

fn log_row_error<T>(result: Result<T, StorageError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 5000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;",
    )
}

/// Spreadsheet store wrapping a SQLite connection pool.
#[derive(Clone, Debug)]
pub struct SheetStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SheetStore {
    /// Open (or create) the spreadsheet database and run migrations.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool_size = env_parse_with_default(DB_POOL_SIZE_ENV, DEFAULT_DB_POOL_SIZE).max(1);
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        let conn = pool.get()?;
        migrations::run_migrations(&conn)?;
        drop(conn);

        tracing::info!(pool_size, path = %db_path.display(), "Sheet store initialized");
        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConn, StorageError> {
        Ok(self.pool.get()?)
    }

    /// Append a row to `tab`, creating the tab with a header row first if it
    /// does not exist yet.
    pub fn append_row(&self, tab: &str, cells: &[String]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(cells)?;
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: Option<i64> = tx
            .query_row("SELECT id FROM tabs WHERE name = ?1", params![tab], |row| row.get(0))
            .optional()?;
        let tab_id = match existing {
            Some(id) => id,
            None => {
                tx.execute(
                    "INSERT INTO tabs (name, created_at) VALUES (?1, ?2)",
                    params![tab, Utc::now().to_rfc3339()],
                )?;
                let id = tx.last_insert_rowid();
                let header = serde_json::to_string(&SHEET_HEADER)?;
                tx.execute(
                    "INSERT INTO sheet_rows (tab_id, row_index, cells) VALUES (?1, 0, ?2)",
                    params![id, header],
                )?;
                tracing::info!(tab, "Created sheet tab");
                id
            },
        };

        let next_index: i64 = tx.query_row(
            "SELECT COALESCE(MAX(row_index) + 1, 0) FROM sheet_rows WHERE tab_id = ?1",
            params![tab_id],
            |row| row.get(0),
        )?;
        tx.execute(
            "INSERT INTO sheet_rows (tab_id, row_index, cells) VALUES (?1, ?2, ?3)",
            params![tab_id, next_index, encoded],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Append `[title, score, notes]` to the tab for `year`.
    pub fn append_movie(
        &self,
        year: i32,
        title: &str,
        score: i64,
        notes: &str,
    ) -> Result<(), StorageError> {
        let cells = [title.to_owned(), score.to_string(), notes.to_owned()];
        self.append_row(&format!("{year:04}"), &cells)
    }

    /// Tab names in creation order.
    pub fn tab_names(&self) -> Result<Vec<String>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT name FROM tabs ORDER BY id")?;
        let names = stmt.query_map([], |row| row.get(0))?.collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    /// All rows of a tab, header included. `None` if the tab does not exist.
    pub fn read_tab(&self, name: &str) -> Result<Option<Vec<Vec<String>>>, StorageError> {
        let conn = self.conn()?;
        let tab_id: Option<i64> = conn
            .query_row("SELECT id FROM tabs WHERE name = ?1", params![name], |row| row.get(0))
            .optional()?;
        let Some(tab_id) = tab_id else {
            return Ok(None);
        };

        let mut stmt =
            conn.prepare("SELECT cells FROM sheet_rows WHERE tab_id = ?1 ORDER BY row_index")?;
        let rows = stmt
            .query_map(params![tab_id], |row| row.get::<_, String>(0))?
            .map(|r| decode_cells(r.map_err(StorageError::from)))
            .filter_map(log_row_error)
            .collect();
        Ok(Some(rows))
    }

    /// Every movie row across year tabs, tabs in creation order, rows in sheet
    /// order. Header rows and rows with a blank title are skipped.
    pub fn read_movies(&self, read_at: DateTime<Utc>) -> Result<Vec<RemoteMovie>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT t.name, r.cells
               FROM sheet_rows r
               JOIN tabs t ON t.id = r.tab_id
              WHERE r.row_index > 0
              ORDER BY t.id, r.row_index",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;

        let mut movies = Vec::new();
        for row in rows {
            let (tab, cells) = row?;
            if !is_year_tab(&tab) {
                continue;
            }
            let Ok(year) = tab.parse::<i32>() else {
                continue;
            };
            let Some(cells) = log_row_error(decode_cells(Ok(cells))) else {
                continue;
            };
            if let Some(movie) = row_to_movie(year, &cells, read_at) {
                movies.push(movie);
            }
        }
        Ok(movies)
    }
}

fn decode_cells(raw: Result<String, StorageError>) -> Result<Vec<String>, StorageError> {
    let raw = raw?;
    serde_json::from_str(&raw).map_err(|e| StorageError::corruption("sheet row cells", e))
}
