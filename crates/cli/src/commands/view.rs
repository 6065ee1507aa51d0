use anyhow::Result;
use movie_tracker_core::ViewQuery;

use super::open_tracker;
use crate::render;

pub(crate) async fn run_list(query: &ViewQuery, offline: bool, json: bool) -> Result<()> {
    let (tracker, _) = open_tracker(offline).await?;
    let groups = tracker.view(query);
    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else if groups.is_empty() {
        println!("{}", movie_tracker_core::constants::EMPTY_STATE_MESSAGE);
    } else {
        print!("{}", render::year_groups(&groups));
    }
    Ok(())
}

pub(crate) async fn run_suggest(term: &str, offline: bool) -> Result<()> {
    let (tracker, _) = open_tracker(offline).await?;
    for title in tracker.suggest(term) {
        println!("{title}");
    }
    Ok(())
}

pub(crate) async fn run_years(offline: bool) -> Result<()> {
    let (tracker, _) = open_tracker(offline).await?;
    for year in tracker.years() {
        println!("{year}");
    }
    Ok(())
}
