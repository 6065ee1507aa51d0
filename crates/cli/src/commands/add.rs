use anyhow::{Context, Result};
use movie_tracker_core::NewMovie;
use movie_tracker_service::SheetsTracker;

use crate::get_cache_path;

pub(crate) async fn run(movie: NewMovie) -> Result<()> {
    let mut tracker = SheetsTracker::from_env(get_cache_path())?;
    let outcome = match tracker.add_movie(movie).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_transient() => {
            return Err(e).context("RemoteStore unreachable; the movie was not saved, try again");
        },
        Err(e) => return Err(e.into()),
    };

    let added = &outcome.movie;
    if outcome.inserted {
        println!("Added {} ({}) with score {:+}", added.title, added.year, added.score);
    } else {
        println!("Saved {} ({}); it was already in your list", added.title, added.year);
    }
    if !outcome.cached {
        eprintln!("Warning: local cache could not be updated");
    }
    Ok(())
}
