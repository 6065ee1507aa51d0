use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the user's data dir and pointed at a dead endpoint.
fn movie_tracker(cache: &Path) -> Command {
    let mut cmd = Command::cargo_bin("movie-tracker").unwrap();
    cmd.env("MOVIE_TRACKER_CACHE_PATH", cache)
        .env("MOVIE_TRACKER_REMOTE_URL", "http://127.0.0.1:9/exec")
        .env("MOVIE_TRACKER_HTTP_TIMEOUT_SECS", "2")
        .env_remove("RUST_LOG");
    cmd
}

fn seeded_cache() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let cache = dir.path().join("movies.json");
    fs::write(
        &cache,
        r#"[
            {"title": "Tenet", "score": -1, "year": 2020, "notes": "loud"},
            {"title": "Soul", "score": 2, "year": 2020},
            {"title": "Heat", "score": 2, "date": "1995-12-15"},
            {"title": "Batman", "score": 1, "year": 1989}
        ]"#,
    )
    .unwrap();
    (dir, cache)
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("movie-tracker").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Track and rate the movies you watch"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("movie-tracker").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn offline_list_with_no_cache_shows_empty_state() {
    let dir = TempDir::new().unwrap();
    movie_tracker(&dir.path().join("movies.json"))
        .args(["list", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No movies yet!"));
}

#[test]
fn offline_list_groups_by_year() {
    let (_dir, cache) = seeded_cache();
    movie_tracker(&cache)
        .args(["list", "--offline", "--year", "2020"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2020  net +1 (up)"))
        .stdout(predicate::str::contains("Heat").not());
}

#[test]
fn offline_list_json_carries_net_scores() {
    let (_dir, cache) = seeded_cache();
    let output = movie_tracker(&cache)
        .args(["list", "--offline", "--json", "--score", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let groups: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let years: Vec<_> = groups.as_array().unwrap().iter().map(|g| g["year"].clone()).collect();
    assert_eq!(years, vec![serde_json::json!(2020), serde_json::json!(1995)]);
    assert_eq!(groups[0]["netScore"], 2);
}

#[test]
fn unknown_sort_key_is_rejected() {
    let (_dir, cache) = seeded_cache();
    movie_tracker(&cache)
        .args(["list", "--offline", "--sort", "rating"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid sort key"));
}

#[test]
fn offline_suggest_and_years() {
    let (_dir, cache) = seeded_cache();
    movie_tracker(&cache)
        .args(["suggest", "bat", "--offline"])
        .assert()
        .success()
        .stdout("Batman\n");
    movie_tracker(&cache)
        .args(["years", "--offline"])
        .assert()
        .success()
        .stdout("2020\n1995\n1989\n");
}

#[test]
fn unreachable_remote_falls_back_to_cache() {
    let (_dir, cache) = seeded_cache();
    movie_tracker(&cache)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tenet"));
    movie_tracker(&cache)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("keeping 4 cached movies"));
}

#[test]
fn add_reports_unreachable_remote() {
    let dir = TempDir::new().unwrap();
    movie_tracker(&dir.path().join("movies.json"))
        .args(["add", "Dune", "--score", "-1", "--date", "2021-10-22"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("the movie was not saved, try again"));
}

#[test]
fn search_without_matches_shows_empty_state() {
    let (_dir, cache) = seeded_cache();
    movie_tracker(&cache)
        .args(["list", "--offline", "--search", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No movies yet!"));
}

#[test]
fn filter_without_matches_still_prints_empty_json_array() {
    let (_dir, cache) = seeded_cache();
    movie_tracker(&cache)
        .args(["list", "--offline", "--json", "--year", "1900"])
        .assert()
        .success()
        .stdout("[]\n");
}
