use serde::Serialize;

use super::reshape::OUTCOME_COLUMN;
use super::score::GameTally;
use crate::error::{ServeForgeError, SfResult};
use crate::ingest::parse_tourney_date;
use crate::table::Table;

/// Raw serve counters of the participant named in the row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ServeCounters {
    pub ace: Option<f64>,
    pub df: Option<f64>,
    pub svpt: Option<f64>,
    pub first_in: Option<f64>,
    pub first_won: Option<f64>,
    pub second_won: Option<f64>,
    pub sv_gms: Option<f64>,
    pub bp_saved: Option<f64>,
    pub bp_faced: Option<f64>,
}

/// One participant's side of one match.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMatch {
    pub match_id: String,
    pub tourney_name: String,
    pub tourney_year: i32,
    pub surface: String,
    pub tourney_level: String,
    pub tourney_date: u32,
    pub score: String,
    pub round: String,
    pub id: String,
    pub name: String,
    pub hand: String,
    pub ht: Option<f64>,
    pub ioc: String,
    pub rank: Option<f64>,
    pub rank_points: Option<f64>,
    pub serve: ServeCounters,
    pub won: bool,
}

const REQUIRED_COLUMNS: [&str; 25] = [
    "match_id",
    "tourney_name",
    "tourney_year",
    "surface",
    "tourney_level",
    "tourney_date",
    "score",
    "round",
    "id",
    "name",
    "hand",
    "ht",
    "ioc",
    "rank",
    "rank_points",
    "ace",
    "df",
    "svpt",
    "1stIn",
    "1stWon",
    "2ndWon",
    "SvGms",
    "bpSaved",
    "bpFaced",
    OUTCOME_COLUMN,
];

impl PlayerMatch {
    /// Types the unified player-match table produced by the reshaper.
    pub fn from_table(table: &Table) -> SfResult<Vec<PlayerMatch>> {
        let idx = table.column_indices(&REQUIRED_COLUMNS)?;
        let mut out = Vec::with_capacity(table.len());

        for (r, row) in table.rows().iter().enumerate() {
            let text = |i: usize| row[idx[i]].clone();
            let num = |i: usize| parse_optional_f64(&row[idx[i]], REQUIRED_COLUMNS[i], r);

            let tourney_year = row[idx[2]].parse::<i32>().map_err(|_| {
                ServeForgeError::Validation(format!(
                    "row {}: tourney_year '{}' is not a year",
                    r, row[idx[2]]
                ))
            })?;

            out.push(PlayerMatch {
                match_id: text(0),
                tourney_name: text(1),
                tourney_year,
                surface: text(3),
                tourney_level: text(4),
                tourney_date: parse_tourney_date(&row[idx[5]])?,
                score: text(6),
                round: text(7),
                id: text(8),
                name: text(9),
                hand: text(10),
                ht: num(11)?,
                ioc: text(12),
                rank: num(13)?,
                rank_points: num(14)?,
                serve: ServeCounters {
                    ace: num(15)?,
                    df: num(16)?,
                    svpt: num(17)?,
                    first_in: num(18)?,
                    first_won: num(19)?,
                    second_won: num(20)?,
                    sv_gms: num(21)?,
                    bp_saved: num(22)?,
                    bp_faced: num(23)?,
                },
                won: parse_outcome(&row[idx[24]], r)?,
            });
        }
        Ok(out)
    }
}

fn parse_optional_f64(raw: &str, column: &str, row: usize) -> SfResult<Option<f64>> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("na") {
        return Ok(None);
    }
    s.parse::<f64>().map(Some).map_err(|_| {
        ServeForgeError::Validation(format!(
            "row {}: column '{}' holds '{}', expected a number",
            row, column, raw
        ))
    })
}

fn parse_outcome(raw: &str, row: usize) -> SfResult<bool> {
    match raw.trim() {
        "1" | "1.0" | "true" | "True" => Ok(true),
        "0" | "0.0" | "false" | "False" => Ok(false),
        other => Err(ServeForgeError::Validation(format!(
            "row {}: outcome '{}' is neither 1 nor 0",
            row, other
        ))),
    }
}

/// Ratio-based serve statistics of one row. `None` marks an undefined value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ServeFeatures {
    pub second_in: Option<f64>,
    pub first_in_rate: Option<f64>,
    pub first_win_rate: Option<f64>,
    pub second_win_rate: Option<f64>,
    pub avg_points_per_service_game: Option<f64>,
    pub break_points_saved_rate: Option<f64>,
}

/// Ranking recorded at a participant's last match of a season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonEndRanking {
    pub name: String,
    pub tourney_year: i32,
    pub last_date: u32,
    pub rank: Option<f64>,
}

/// Match volume and win rate of one participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStanding {
    pub name: String,
    pub match_wins: u32,
    pub total_matches: u32,
    pub win_rate: f64,
}

/// A player-match row with every derived column attached.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedMatch {
    pub player: PlayerMatch,
    pub end_of_season_rank: Option<f64>,
    pub games: Option<GameTally>,
    pub serve: Option<ServeFeatures>,
    pub components: Option<[f64; 2]>,
}

impl From<PlayerMatch> for EnrichedMatch {
    fn from(player: PlayerMatch) -> Self {
        Self {
            player,
            end_of_season_rank: None,
            games: None,
            serve: None,
            components: None,
        }
    }
}

/// Column order of the per-player files read by the dashboard.
pub const OUTPUT_COLUMNS: [&str; 36] = [
    "match_id",
    "tourney_name",
    "tourney_year",
    "surface",
    "tourney_level",
    "tourney_date",
    "score",
    "round",
    "id",
    "name",
    "hand",
    "ht",
    "ioc",
    "rank",
    "rank_points",
    "ace",
    "df",
    "svpt",
    "1stIn",
    "1stWon",
    "2ndWon",
    "SvGms",
    "bpSaved",
    "bpFaced",
    "win",
    "end_of_season_rank",
    "total_games_won",
    "total_games_lost",
    "2ndIn",
    "1st_in_percentage",
    "1st_win_percentage",
    "2nd_win_percentage",
    "avg_pts_per_sv_game",
    "saved_breaks_percentage",
    "serve_first_component",
    "serve_second_component",
];

impl EnrichedMatch {
    pub fn to_record(&self) -> Vec<String> {
        let p = &self.player;
        let s = &p.serve;
        let f = self.serve.unwrap_or_default();
        let [first, second] = match self.components {
            Some([a, b]) => [Some(a), Some(b)],
            None => [None, None],
        };

        vec![
            p.match_id.clone(),
            p.tourney_name.clone(),
            p.tourney_year.to_string(),
            p.surface.clone(),
            p.tourney_level.clone(),
            p.tourney_date.to_string(),
            p.score.clone(),
            p.round.clone(),
            p.id.clone(),
            p.name.clone(),
            p.hand.clone(),
            format_float(p.ht),
            p.ioc.clone(),
            format_float(p.rank),
            format_float(p.rank_points),
            format_float(s.ace),
            format_float(s.df),
            format_float(s.svpt),
            format_float(s.first_in),
            format_float(s.first_won),
            format_float(s.second_won),
            format_float(s.sv_gms),
            format_float(s.bp_saved),
            format_float(s.bp_faced),
            if p.won { "1" } else { "0" }.to_string(),
            format_float(self.end_of_season_rank),
            self.games.map(|g| g.won.to_string()).unwrap_or_default(),
            self.games.map(|g| g.lost.to_string()).unwrap_or_default(),
            format_float(f.second_in),
            format_float(f.first_in_rate),
            format_float(f.first_win_rate),
            format_float(f.second_win_rate),
            format_float(f.avg_points_per_service_game),
            format_float(f.break_points_saved_rate),
            format_float(first),
            format_float(second),
        ]
    }
}

/// Empty for missing values, a trailing `.0` for integral ones.
pub fn format_float(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => format!("{:.1}", v),
        Some(v) if v.is_finite() => v.to_string(),
        _ => String::new(),
    }
}
