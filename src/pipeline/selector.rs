use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::types::{PlayerMatch, PlayerStanding};

/// Wins and matches for every participant, best first.
///
/// Ordered by wins, then win rate, both descending; remaining ties fall back
/// to the name in ascending order.
pub fn rank_players(rows: &[PlayerMatch]) -> Vec<PlayerStanding> {
    let mut tally: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for row in rows {
        let entry = tally.entry(row.name.as_str()).or_default();
        if row.won {
            entry.0 += 1;
        }
        entry.1 += 1;
    }

    let mut standings: Vec<PlayerStanding> = tally
        .into_iter()
        .map(|(name, (wins, matches))| PlayerStanding {
            name: name.to_string(),
            match_wins: wins,
            total_matches: matches,
            win_rate: wins as f64 / matches as f64,
        })
        .collect();

    standings.sort_by(compare_standings);
    standings
}

pub fn select_top_players(rows: &[PlayerMatch], limit: usize) -> Vec<PlayerStanding> {
    let mut standings = rank_players(rows);
    standings.truncate(limit);
    standings
}

fn compare_standings(a: &PlayerStanding, b: &PlayerStanding) -> Ordering {
    b.match_wins
        .cmp(&a.match_wins)
        .then_with(|| b.win_rate.total_cmp(&a.win_rate))
        .then_with(|| a.name.cmp(&b.name))
}
