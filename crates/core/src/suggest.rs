use std::collections::HashSet;

use crate::constants::MAX_SUGGESTIONS;
use crate::movie::Movie;

/// Typeahead titles for `term`.
///
/// Case-insensitive substring match, deduplicated by exact title, capped at
/// [`MAX_SUGGESTIONS`], in collection order. An empty term suggests nothing.
#[must_use]
pub fn suggest(movies: &[Movie], term: &str) -> Vec<String> {
    if term.is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    let mut seen: HashSet<&str> = HashSet::new();

    movies
        .iter()
        .map(|m| m.title.as_str())
        .filter(|title| title.to_lowercase().contains(&needle))
        .filter(|title| seen.insert(*title))
        .take(MAX_SUGGESTIONS)
        .map(ToOwned::to_owned)
        .collect()
}
