//! Winner/loser columns to one row per participant.
//!
//! A match row carries the same attributes twice, once under a winner prefix
//! and once under a loser prefix. Reshaping strips the prefixes so both sides
//! share column names, tags each side with its outcome and stacks them.

use std::collections::HashMap;
use tracing::debug;

use crate::error::{ServeForgeError, SfResult};
use crate::table::Table;

pub const OUTCOME_COLUMN: &str = "win";

pub const BASE_COLUMNS: [&str; 8] = [
    "match_id",
    "tourney_name",
    "tourney_year",
    "surface",
    "tourney_level",
    "tourney_date",
    "score",
    "round",
];

pub const PROFILE_SUFFIXES: [&str; 7] = ["id", "name", "hand", "ht", "ioc", "rank", "rank_points"];

pub const SERVE_SUFFIXES: [&str; 9] = [
    "ace", "df", "svpt", "1stIn", "1stWon", "2ndWon", "SvGms", "bpSaved", "bpFaced",
];

/// One prefix and the attribute suffixes stored under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixGroup {
    pub prefix: String,
    pub suffixes: Vec<String>,
}

impl PrefixGroup {
    pub fn new(prefix: &str, suffixes: &[&str]) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReshapeSpec {
    pub base: Vec<String>,
    pub winner: Vec<PrefixGroup>,
    pub loser: Vec<PrefixGroup>,
}

impl ReshapeSpec {
    /// Column layout of the historical tour-level match files.
    pub fn tour_matches() -> Self {
        Self {
            base: BASE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            winner: vec![
                PrefixGroup::new("winner_", &PROFILE_SUFFIXES),
                PrefixGroup::new("w_", &SERVE_SUFFIXES),
            ],
            loser: vec![
                PrefixGroup::new("loser_", &PROFILE_SUFFIXES),
                PrefixGroup::new("l_", &SERVE_SUFFIXES),
            ],
        }
    }

    fn stripped_columns(groups: &[PrefixGroup]) -> Vec<&str> {
        groups
            .iter()
            .flat_map(|g| g.suffixes.iter().map(String::as_str))
            .collect()
    }
}

/// Splits `matches` into a winner table and a loser table with identical
/// columns: base columns, stripped attributes, then the outcome flag.
pub fn reshape(matches: &Table, spec: &ReshapeSpec) -> SfResult<(Table, Table)> {
    let winner_attrs = ReshapeSpec::stripped_columns(&spec.winner);
    let loser_attrs = ReshapeSpec::stripped_columns(&spec.loser);
    if winner_attrs != loser_attrs {
        return Err(ServeForgeError::Schema(format!(
            "winner attributes {:?} do not mirror loser attributes {:?}",
            winner_attrs, loser_attrs
        )));
    }

    let winners = side_table(matches, &spec.base, &spec.winner, 1)?;
    let losers = side_table(matches, &spec.base, &spec.loser, 0)?;
    debug!(
        "Reshaped {} matches into {} winner and {} loser rows",
        matches.len(),
        winners.len(),
        losers.len()
    );
    Ok((winners, losers))
}

/// Winner rows first, then loser rows, each in source order.
pub fn stack(winners: &Table, losers: &Table) -> SfResult<Table> {
    winners.concat(losers)
}

pub fn to_player_rows(matches: &Table, spec: &ReshapeSpec) -> SfResult<Table> {
    let (winners, losers) = reshape(matches, spec)?;
    stack(&winners, &losers)
}

fn side_table(
    matches: &Table,
    base: &[String],
    groups: &[PrefixGroup],
    outcome: u8,
) -> SfResult<Table> {
    let mut selected: Vec<String> = base.to_vec();
    let mut renames: HashMap<String, String> = HashMap::new();
    for group in groups {
        for suffix in &group.suffixes {
            let full = format!("{}{}", group.prefix, suffix);
            renames.insert(full.clone(), suffix.clone());
            selected.push(full);
        }
    }

    let side = matches.select(&selected)?;
    let side = side.rename_columns(|c| renames.get(c).cloned().unwrap_or_else(|| c.to_string()));
    side.with_column(OUTCOME_COLUMN, |_| Ok(outcome.to_string()))
}
