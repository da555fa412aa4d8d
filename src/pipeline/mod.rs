pub mod linalg;
pub mod reduce;
pub mod reshape;
pub mod score;
pub mod season;
pub mod selector;
pub mod serve;
pub mod types;

pub use self::reduce::ProjectionModel;
pub use self::types::{EnrichedMatch, PlayerMatch, PlayerStanding, SeasonEndRanking};

use std::collections::HashSet;
use tracing::info;

use self::reshape::ReshapeSpec;
use crate::config::Config;
use crate::error::{ServeForgeError, SfResult};
use crate::ingest;
use crate::table::Table;

/// Row counts after each stage of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineSummary {
    pub matches_loaded: usize,
    pub matches_filtered: usize,
    pub player_rows: usize,
    pub selected_rows: usize,
    pub serve_rows: usize,
    pub projected_rows: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub standings: Vec<PlayerStanding>,
    pub season_rankings: Vec<SeasonEndRanking>,
    pub rows: Vec<EnrichedMatch>,
    pub model: ProjectionModel,
    pub summary: PipelineSummary,
}

impl PipelineOutput {
    pub fn rows_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a EnrichedMatch> + 'a {
        self.rows.iter().filter(move |r| r.player.name == name)
    }

    /// Ranking from the participant's most recent season in the window.
    pub fn latest_rank(&self, name: &str) -> Option<f64> {
        self.season_rankings
            .iter()
            .filter(|r| r.name == name)
            .max_by_key(|r| r.tourney_year)
            .and_then(|r| r.rank)
    }
}

/// Runs every stage over raw match rows, as loaded from the match files.
pub fn run_pipeline(matches: &Table, config: &Config) -> SfResult<PipelineOutput> {
    config.validate()?;
    let mut summary = PipelineSummary {
        matches_loaded: matches.len(),
        ..Default::default()
    };

    let prepared = ingest::prepare_matches(matches)?;
    let filtered = ingest::filter_tournaments(&prepared, &config.filter)?;
    summary.matches_filtered = filtered.len();

    let player_table = reshape::to_player_rows(&filtered, &ReshapeSpec::tour_matches())?;
    let player_rows = PlayerMatch::from_table(&player_table)?;
    summary.player_rows = player_rows.len();

    let standings = selector::select_top_players(&player_rows, config.filter.top_players);
    if standings.is_empty() {
        return Err(ServeForgeError::EmptySelection(format!(
            "no matches left after filtering {} loaded matches to levels {:?} in {}..={}",
            matches.len(),
            config.filter.get_tourney_levels(),
            config.filter.year_min,
            config.filter.year_max
        )));
    }
    info!("🏆 Selected {} players", standings.len());

    let selected: HashSet<&str> = standings.iter().map(|s| s.name.as_str()).collect();
    let selected_rows: Vec<PlayerMatch> = player_rows
        .iter()
        .filter(|r| selected.contains(r.name.as_str()))
        .cloned()
        .collect();
    summary.selected_rows = selected_rows.len();

    let season_rankings = season::season_end_rankings(&selected_rows);
    let ranked = season::attach_season_end_rank(&selected_rows);
    let scored = score::attach_game_tallies(&ranked, config.features.score_mode)?;
    let served = serve::derive_serve_features(&scored, &config.features);
    summary.serve_rows = served.len();

    let projection = reduce::reduce(&served, &config.features)?;
    summary.projected_rows = projection.rows.len();

    Ok(PipelineOutput {
        standings,
        season_rankings,
        rows: projection.rows,
        model: projection.model,
        summary,
    })
}
