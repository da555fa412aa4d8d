use std::collections::BTreeMap;

use super::types::{EnrichedMatch, PlayerMatch, SeasonEndRanking};

/// One ranking per (participant, season): the rank recorded on the latest
/// match date of that season.
///
/// Every match of a tournament shares its date, so several rows usually tie
/// on the latest date. The best (lowest) recorded rank among them wins; the
/// season has no ranking when none of the tied rows carries one.
pub fn season_end_rankings(rows: &[PlayerMatch]) -> Vec<SeasonEndRanking> {
    let mut latest: BTreeMap<(&str, i32), (u32, Option<f64>)> = BTreeMap::new();

    for row in rows {
        let key = (row.name.as_str(), row.tourney_year);
        let candidate = (row.tourney_date, row.rank);
        latest
            .entry(key)
            .and_modify(|current| {
                if candidate.0 > current.0 {
                    *current = candidate;
                } else if candidate.0 == current.0 {
                    current.1 = best_rank(current.1, candidate.1);
                }
            })
            .or_insert(candidate);
    }

    latest
        .into_iter()
        .map(|((name, year), (date, rank))| SeasonEndRanking {
            name: name.to_string(),
            tourney_year: year,
            last_date: date,
            rank,
        })
        .collect()
}

/// Wraps each row with its season-end ranking, keeping row count and order.
pub fn attach_season_end_rank(rows: &[PlayerMatch]) -> Vec<EnrichedMatch> {
    let rankings = season_end_rankings(rows);
    let lookup: BTreeMap<(&str, i32), Option<f64>> = rankings
        .iter()
        .map(|r| ((r.name.as_str(), r.tourney_year), r.rank))
        .collect();

    rows.iter()
        .map(|row| {
            let mut enriched = EnrichedMatch::from(row.clone());
            enriched.end_of_season_rank = lookup
                .get(&(row.name.as_str(), row.tourney_year))
                .copied()
                .flatten();
            enriched
        })
        .collect()
}

fn best_rank(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}
