use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ServeForgeError, SfResult};
use crate::pipeline::types::OUTPUT_COLUMNS;
use crate::pipeline::{EnrichedMatch, PipelineOutput};

pub const PLAYERS_LIST_FILE: &str = "players_list.json";
pub const RANKINGS_FILE: &str = "rankings.json";
pub const PROJECTION_FILE: &str = "projection.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub out_dir: PathBuf,
    pub files_written: usize,
    pub rows_written: usize,
}

#[derive(Debug, Serialize)]
struct PlayerListEntry<'a> {
    name: &'a str,
    rank: Option<f64>,
    match_wins: u32,
    total_matches: u32,
    win_rate: f64,
}

#[derive(Debug, Serialize)]
struct RankingEntry<'a> {
    name: &'a str,
    tourney_year: String,
    ranking: Option<f64>,
}

/// `<name>.csv`, with path separators replaced.
pub fn player_file_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}.csv", safe)
}

/// Writes the header and one record per row. Returns the number of rows.
pub fn write_player_rows<W: Write>(writer: W, rows: &[&EnrichedMatch]) -> SfResult<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        wtr.write_record(row.to_record())?;
    }
    wtr.flush()?;
    Ok(rows.len())
}

pub fn export_players<P: AsRef<Path>>(out_dir: P, output: &PipelineOutput) -> SfResult<ExportReport> {
    let out_dir = out_dir.as_ref();
    let file_names = unique_file_names(output)?;
    fs::create_dir_all(out_dir)?;

    let mut report = ExportReport {
        out_dir: out_dir.to_path_buf(),
        files_written: 0,
        rows_written: 0,
    };

    for (standing, file_name) in output.standings.iter().zip(&file_names) {
        let rows: Vec<&EnrichedMatch> = output.rows_for(&standing.name).collect();
        let path = out_dir.join(file_name);
        let file = BufWriter::new(File::create(&path)?);
        let written = write_player_rows(file, &rows)?;
        debug!("   {} -> {} rows", path.display(), written);
        report.files_written += 1;
        report.rows_written += written;
    }

    let players: Vec<PlayerListEntry> = output
        .standings
        .iter()
        .map(|s| PlayerListEntry {
            name: &s.name,
            rank: output.latest_rank(&s.name),
            match_wins: s.match_wins,
            total_matches: s.total_matches,
            win_rate: s.win_rate,
        })
        .collect();
    write_json(&out_dir.join(PLAYERS_LIST_FILE), &players)?;

    let rankings: Vec<RankingEntry> = output
        .season_rankings
        .iter()
        .map(|r| RankingEntry {
            name: &r.name,
            tourney_year: r.tourney_year.to_string(),
            ranking: r.rank,
        })
        .collect();
    write_json(&out_dir.join(RANKINGS_FILE), &rankings)?;

    write_json(&out_dir.join(PROJECTION_FILE), &output.model)?;
    report.files_written += 3;

    info!(
        "💾 Wrote {} files ({} player rows) to {}",
        report.files_written,
        report.rows_written,
        out_dir.display()
    );
    Ok(report)
}

// One file name per selected player, in standings order.
fn unique_file_names(output: &PipelineOutput) -> SfResult<Vec<String>> {
    let mut owners: HashMap<String, &str> = HashMap::new();
    let mut names = Vec::with_capacity(output.standings.len());
    for standing in &output.standings {
        let file_name = player_file_name(&standing.name);
        if let Some(other) = owners.insert(file_name.clone(), &standing.name) {
            return Err(ServeForgeError::Schema(format!(
                "players '{}' and '{}' would both be written to '{}'",
                other, standing.name, file_name
            )));
        }
        names.push(file_name);
    }
    Ok(names)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> SfResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
