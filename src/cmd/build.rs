use clap::Args;
use serveforge::config::Config;
use serveforge::error::SfResult;
use serveforge::export::export_players;
use serveforge::pipeline::run_pipeline;
use serveforge::table::Table;

use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub config: Config,

    /// Directory receiving one file per selected player
    #[arg(short, long, default_value = "players_data")]
    pub out_dir: String,
}

pub fn run(args: &BuildArgs, config: &Config, matches: &Table) -> SfResult<()> {
    println!("\n🎾 === BUILD PLAYER FILES === 🎾");
    let output = run_pipeline(matches, config)?;

    reports::print_standings(&output);
    reports::print_summary(&output.summary);

    let report = export_players(&args.out_dir, &output)?;
    println!(
        "\n✅ {} files, {} player rows -> {}",
        report.files_written,
        report.rows_written,
        report.out_dir.display()
    );
    Ok(())
}
