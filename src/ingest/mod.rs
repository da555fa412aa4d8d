pub mod filter;
pub mod loader;

pub use self::filter::filter_tournaments;
pub use self::loader::{load_matches_from_dir, load_matches_from_file, load_matches_from_reader};

use crate::error::{ServeForgeError, SfResult};
use crate::table::Table;

/// Parses a `YYYYMMDD` tournament date. Float-formatted dates ("20190114.0")
/// are accepted because re-exported files often carry them.
pub fn parse_tourney_date(raw: &str) -> SfResult<u32> {
    let trimmed = raw.trim();
    let parsed = trimmed
        .parse::<u32>()
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
                .map(|v| v as u32)
        });
    match parsed {
        Some(date) if date >= 10_000 => Ok(date),
        _ => Err(ServeForgeError::Validation(format!(
            "tourney_date '{}' is not a YYYYMMDD date",
            raw
        ))),
    }
}

pub fn season_of(date: u32) -> i32 {
    (date / 10_000) as i32
}

/// Adds the derived `tourney_year` and `match_id` columns.
pub fn prepare_matches(matches: &Table) -> SfResult<Table> {
    let date_idx = matches.column_index("tourney_date")?;
    let with_year = matches.with_column("tourney_year", |row| {
        parse_tourney_date(&row[date_idx]).map(|d| season_of(d).to_string())
    })?;

    let idx = with_year.column_indices(&[
        "tourney_year",
        "tourney_name",
        "winner_name",
        "loser_name",
    ])?;
    with_year.with_column("match_id", |row| {
        Ok(format!(
            "{}_{}_{}_{}",
            row[idx[0]], row[idx[1]], row[idx[2]], row[idx[3]]
        ))
    })
}
