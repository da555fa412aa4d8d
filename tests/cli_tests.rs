mod common;

use common::{round_robin, write_season, MatchBuilder};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data = dir.path().join("data");
        fs::create_dir(&data).unwrap();

        let players = ["Alpha", "Beta", "Gamma", "Delta", "Epsilon"];
        let matches = round_robin(&players);
        let (early, late) = matches.split_at(matches.len() / 2);
        write_season(&data, "atp_matches_a.csv", early);
        write_season(&data, "atp_matches_b.csv", late);
        write_season(
            &data,
            "atp_matches_c.csv",
            &[MatchBuilder::new("Outsider", "Alpha").tourney("Futures", "F")],
        );
        Self { dir }
    }

    fn path(&self, rel: &str) -> String {
        self.dir.path().join(rel).to_string_lossy().into_owned()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_serveforge"))
            .arg("--data-dir")
            .arg(self.path("data"))
            .args(args)
            .output()
            .expect("Failed to execute binary")
    }
}

fn csv_count(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|x| x == "csv"))
        .count()
}

#[test]
fn test_build_writes_player_files() {
    let ctx = TestContext::new();
    let out = ctx.path("players_data");
    let output = ctx.run(&["build", "--out-dir", &out]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out = Path::new(&out);
    assert_eq!(csv_count(out), 5);
    assert!(out.join("Alpha.csv").exists());
    assert!(!out.join("Outsider.csv").exists());
    assert!(out.join("players_list.json").exists());
    assert!(out.join("rankings.json").exists());
    assert!(out.join("projection.json").exists());
}

#[test]
fn test_top_players_flag_limits_files() {
    let ctx = TestContext::new();
    let out = ctx.path("top2");
    let output = ctx.run(&["build", "--out-dir", &out, "--top-players", "2"]);
    assert!(output.status.success());
    assert_eq!(csv_count(Path::new(&out)), 2);
}

#[test]
fn test_config_file_with_override() {
    let ctx = TestContext::new();
    let cfg = ctx.path("settings.json");
    fs::write(&cfg, r#"{ "filter": { "top_players": 1 } }"#).unwrap();

    let out = ctx.path("from_file");
    let output = ctx.run(&["--config", &cfg, "build", "--out-dir", &out]);
    assert!(output.status.success());
    assert_eq!(csv_count(Path::new(&out)), 1);

    let out = ctx.path("overridden");
    let output = ctx.run(&[
        "--config",
        &cfg,
        "build",
        "--out-dir",
        &out,
        "--top-players",
        "3",
    ]);
    assert!(output.status.success());
    assert_eq!(csv_count(Path::new(&out)), 3);
}

#[test]
fn test_inspect_prints_reports() {
    let ctx = TestContext::new();
    let output = ctx.run(&["inspect", "--player", "alp", "--limit", "3"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Alpha"));
    assert!(stdout.contains("PC1"));
    assert!(!Path::new(&ctx.path("players_data")).exists());
}

#[test]
fn test_empty_window_fails() {
    let ctx = TestContext::new();
    let out = ctx.path("none");
    let output = ctx.run(&["build", "--out-dir", &out, "--year-min", "1990", "--year-max", "1995"]);
    assert!(!output.status.success());
    assert!(!Path::new(&out).exists());
}

#[test]
fn test_missing_data_dir_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_serveforge"))
        .args(["--data-dir", "/definitely/not/here", "inspect"])
        .output()
        .expect("Failed to execute binary");
    assert!(!output.status.success());
}
