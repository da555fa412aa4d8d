use clap::Args;
use serveforge::config::Config;
use serveforge::error::{ServeForgeError, SfResult};
use serveforge::pipeline::{run_pipeline, EnrichedMatch};
use serveforge::table::Table;

use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub config: Config,

    /// Show the rows of the first selected player whose name contains this text
    #[arg(short, long)]
    pub player: Option<String>,

    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,
}

pub fn run(args: &InspectArgs, config: &Config, matches: &Table) -> SfResult<()> {
    println!("\n🔎 === PIPELINE AUDIT === 🔎");
    let output = run_pipeline(matches, config)?;

    reports::print_summary(&output.summary);
    reports::print_standings(&output);
    reports::print_projection(&output.model);

    if let Some(ref filter) = args.player {
        let needle = filter.to_lowercase();
        let standing = output
            .standings
            .iter()
            .find(|s| s.name.to_lowercase().contains(&needle))
            .ok_or_else(|| {
                ServeForgeError::EmptySelection(format!(
                    "no selected player matches '{}'",
                    filter
                ))
            })?;
        let rows: Vec<&EnrichedMatch> = output.rows_for(&standing.name).collect();
        reports::print_player_rows(&standing.name, &rows, args.limit);
    }
    Ok(())
}
