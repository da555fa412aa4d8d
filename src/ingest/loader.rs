use rayon::prelude::*;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ServeForgeError, SfResult};
use crate::table::Table;

/// Reads one headed, comma-delimited match file.
pub fn load_matches_from_reader<R: Read>(reader: R) -> SfResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = rdr.byte_headers()?.iter().map(decode_field).collect();
    let mut table = Table::new(headers);

    for result in rdr.byte_records() {
        let rec = result?;
        table.push_row(rec.iter().map(decode_field).collect())?;
    }
    Ok(table)
}

pub fn load_matches_from_file<P: AsRef<Path>>(path: P) -> SfResult<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        ServeForgeError::Validation(format!(
            "could not open match file '{}': {}",
            path.display(),
            e
        ))
    })?;
    let table = load_matches_from_reader(file)?;
    debug!("   {} -> {} rows", path.display(), table.len());
    Ok(table)
}

/// Loads every `*.csv` in `dir` and stacks them in file-name order.
pub fn load_matches_from_dir<P: AsRef<Path>>(dir: P) -> SfResult<Table> {
    let dir = dir.as_ref();
    let paths = list_match_files(dir)?;
    if paths.is_empty() {
        return Err(ServeForgeError::Validation(format!(
            "no .csv match files found in '{}'",
            dir.display()
        )));
    }
    info!("📂 Reading {} match files from {}", paths.len(), dir.display());

    let tables = paths
        .par_iter()
        .map(load_matches_from_file)
        .collect::<SfResult<Vec<_>>>()?;

    let mut iter = paths.iter().zip(tables);
    let Some((_, mut combined)) = iter.next() else {
        return Ok(Table::default());
    };
    for (path, table) in iter {
        if table.columns() != combined.columns() {
            return Err(ServeForgeError::Schema(format!(
                "'{}' does not share the header of the other match files",
                path.display()
            )));
        }
        combined = combined.concat(&table)?;
    }

    info!("   -> {} matches loaded", combined.len());
    Ok(combined)
}

fn list_match_files(dir: &Path) -> SfResult<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .collect();
    paths.sort();
    Ok(paths)
}

// Historical files mix UTF-8 with ISO-8859-1 names.
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.trim().to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect::<String>().trim().to_string(),
    }
}
