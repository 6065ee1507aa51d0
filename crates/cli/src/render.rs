//! Plain-text rendering of the grouped view.

use movie_tracker_core::{Movie, YearGroup};

/// One block per year: a header with the net score, then one line per movie.
pub(crate) fn year_groups(groups: &[YearGroup<'_>]) -> String {
    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let trend = if group.is_positive() { "up" } else { "down" };
        out.push_str(&format!("{}  net {:+} ({trend})\n", group.year, group.net_score));
        let width = group.movies.iter().map(|m| m.title.chars().count()).max().unwrap_or(0);
        for movie in &group.movies {
            out.push_str(&movie_line(movie, width));
            out.push('\n');
        }
    }
    out
}

fn movie_line(movie: &Movie, width: usize) -> String {
    let mut line = format!("  {:<width$}  {:+}", movie.title, movie.score);
    if !movie.notes.is_empty() {
        line.push_str(&format!("  {}", movie.notes));
    }
    line
}

#[cfg(test)]
mod tests {
    use movie_tracker_core::{RemoteMovie, ViewQuery, derive, group_by_year, reconcile};

    use super::*;

    #[test]
    fn renders_net_scores_and_notes() {
        let movies = reconcile(vec![
            RemoteMovie::new("Tenet", -1).with_year(2020).with_notes("loud"),
            RemoteMovie::new("Soul", 2).with_year(2020),
            RemoteMovie::new("Cats", -1).with_year(2019),
        ])
        .movies;
        let derived = derive(&movies, &ViewQuery::default());
        let text = year_groups(&group_by_year(&derived));

        assert_eq!(
            text,
            "2020  net +1 (up)\n  Tenet  -1  loud\n  Soul   +2\n\n2019  net -1 (down)\n  Cats  -1\n"
        );
    }

    #[test]
    fn zero_net_counts_as_up() {
        let movies = reconcile(vec![RemoteMovie::new("Meh", 0).with_year(2018)]).movies;
        let derived = derive(&movies, &ViewQuery::default());
        assert!(year_groups(&group_by_year(&derived)).starts_with("2018  net +0 (up)"));
    }

    #[test]
    fn no_groups_renders_nothing() {
        assert_eq!(year_groups(&[]), "");
    }
}
