use std::collections::HashSet;
use tracing::info;

use crate::config::FilterParams;
use crate::error::{ServeForgeError, SfResult};
use crate::table::Table;

/// Keeps matches from accepted tiers, outside the excluded events, inside the
/// inclusive year window. Expects `tourney_year` to be present.
pub fn filter_tournaments(matches: &Table, params: &FilterParams) -> SfResult<Table> {
    let level_idx = matches.column_index("tourney_level")?;
    let name_idx = matches.column_index("tourney_name")?;
    let year_idx = matches.column_index("tourney_year")?;

    let levels: HashSet<String> = params.get_tourney_levels().into_iter().collect();
    let excluded: HashSet<String> = params.get_excluded_tourneys().into_iter().collect();

    for (row_no, row) in matches.rows().iter().enumerate() {
        if row[year_idx].parse::<i32>().is_err() {
            return Err(ServeForgeError::Validation(format!(
                "row {}: tourney_year '{}' is not a year",
                row_no, row[year_idx]
            )));
        }
    }

    let filtered = matches.filter_rows(|row| {
        let year = row[year_idx].parse::<i32>().unwrap_or(i32::MIN);
        levels.contains(&row[level_idx])
            && !excluded.contains(&row[name_idx])
            && params.contains_year(year)
    });

    info!(
        "🎾 Tournament filter: {} -> {} matches (levels {:?}, {}..={})",
        matches.len(),
        filtered.len(),
        params.get_tourney_levels(),
        params.year_min,
        params.year_max
    );
    Ok(filtered)
}
