//! Test utilities and module declarations for storage tests.

use crate::{FileCache, SheetStore};
use movie_tracker_core::{Movie, RemoteMovie, reconcile};
use tempfile::TempDir;

pub fn create_test_sheet() -> (SheetStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("sheet.db");
    let store = SheetStore::new(&db_path).unwrap();
    (store, temp_dir)
}

pub fn create_test_cache() -> (FileCache, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let cache = FileCache::new(temp_dir.path().join("nested").join("movies.json"));
    (cache, temp_dir)
}

pub fn sample_movies() -> Vec<Movie> {
    reconcile(vec![
        RemoteMovie::new("Heat", 2).with_year(1995).with_notes("diner scene"),
        RemoteMovie::new("Tenet", -1).with_date("2020-09-03"),
    ])
    .movies
}
