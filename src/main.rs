use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use serveforge::config::Config;
use serveforge::error::SfResult;
use serveforge::ingest::load_matches_from_dir;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding one match file per season
    #[arg(global = true, short, long, default_value = "data")]
    data_dir: String,

    /// JSON file providing base settings; explicit flags win
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Build(cmd::build::BuildArgs),
    Inspect(cmd::inspect::InspectArgs),
}

fn main() {
    // Raw matches tell user input apart from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    if let Err(e) = run(&cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, matches: &clap::ArgMatches) -> SfResult<()> {
    // Flags of the subcommand live in its own matches, not the root
    let (cli_config, sub_matches) = match &cli.command {
        Commands::Build(args) => (&args.config, matches.subcommand_matches("build")),
        Commands::Inspect(args) => (&args.config, matches.subcommand_matches("inspect")),
    };

    let config = match &cli.config_file {
        Some(path) => {
            info!("⚖️  Loading settings from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            if let Some(sub) = sub_matches {
                file_config.merge_from_cli(cli_config, sub);
            }
            file_config
        }
        None => cli_config.clone(),
    };

    info!("📂 Loading matches from: {}", cli.data_dir);
    let table = load_matches_from_dir(&cli.data_dir)?;

    match &cli.command {
        Commands::Build(args) => cmd::build::run(args, &config, &table),
        Commands::Inspect(args) => cmd::inspect::run(args, &config, &table),
    }
}
