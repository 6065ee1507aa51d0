//! Storage layer for movie-tracker
//!
//! Two stores live here:
//! - [`FileCache`], the client-side durable slot for the whole collection.
//! - [`SheetStore`], a SQLite-backed spreadsheet of named tabs holding string
//!   cells, which the RemoteStore server reads and appends to.

mod error;
mod file_cache;
mod migrations;
mod sheet;
#[cfg(test)]
mod tests;

pub use error::StorageError;
pub use file_cache::FileCache;
pub use sheet::{SheetStore, is_year_tab, row_to_movie};
