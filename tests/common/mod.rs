#![allow(dead_code)]

use serveforge::pipeline::types::ServeCounters;
use serveforge::pipeline::{EnrichedMatch, PlayerMatch};
use serveforge::table::Table;
use std::fs;
use std::path::Path;

pub const RAW_HEADER: [&str; 49] = [
    "tourney_id",
    "tourney_name",
    "surface",
    "draw_size",
    "tourney_level",
    "tourney_date",
    "match_num",
    "winner_id",
    "winner_seed",
    "winner_entry",
    "winner_name",
    "winner_hand",
    "winner_ht",
    "winner_ioc",
    "winner_age",
    "loser_id",
    "loser_seed",
    "loser_entry",
    "loser_name",
    "loser_hand",
    "loser_ht",
    "loser_ioc",
    "loser_age",
    "score",
    "best_of",
    "round",
    "minutes",
    "w_ace",
    "w_df",
    "w_svpt",
    "w_1stIn",
    "w_1stWon",
    "w_2ndWon",
    "w_SvGms",
    "w_bpSaved",
    "w_bpFaced",
    "l_ace",
    "l_df",
    "l_svpt",
    "l_1stIn",
    "l_1stWon",
    "l_2ndWon",
    "l_SvGms",
    "l_bpSaved",
    "l_bpFaced",
    "winner_rank",
    "winner_rank_points",
    "loser_rank",
    "loser_rank_points",
];

/// One raw match row, built fluently.
#[derive(Debug, Clone)]
pub struct MatchBuilder {
    pub tourney_name: String,
    pub level: String,
    pub date: String,
    pub winner: String,
    pub loser: String,
    pub score: String,
    pub winner_rank: String,
    pub loser_rank: String,
    pub w_serve: [String; 9],
    pub l_serve: [String; 9],
}

fn counters(values: [f64; 9]) -> [String; 9] {
    values.map(|v| v.to_string())
}

impl MatchBuilder {
    pub fn new(winner: &str, loser: &str) -> Self {
        Self {
            tourney_name: "Australian Open".to_string(),
            level: "G".to_string(),
            date: "20150119".to_string(),
            winner: winner.to_string(),
            loser: loser.to_string(),
            score: "6-4 6-4".to_string(),
            winner_rank: "1".to_string(),
            loser_rank: "2".to_string(),
            w_serve: counters([5.0, 2.0, 80.0, 50.0, 38.0, 18.0, 12.0, 3.0, 4.0]),
            l_serve: counters([3.0, 4.0, 85.0, 52.0, 33.0, 14.0, 12.0, 5.0, 9.0]),
        }
    }

    pub fn tourney(mut self, name: &str, level: &str) -> Self {
        self.tourney_name = name.to_string();
        self.level = level.to_string();
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    pub fn score(mut self, score: &str) -> Self {
        self.score = score.to_string();
        self
    }

    pub fn ranks(mut self, winner: &str, loser: &str) -> Self {
        self.winner_rank = winner.to_string();
        self.loser_rank = loser.to_string();
        self
    }

    pub fn w_serve(mut self, values: [f64; 9]) -> Self {
        self.w_serve = counters(values);
        self
    }

    pub fn l_serve(mut self, values: [f64; 9]) -> Self {
        self.l_serve = counters(values);
        self
    }

    pub fn no_serve_stats(mut self) -> Self {
        self.w_serve = Default::default();
        self.l_serve = Default::default();
        self
    }

    pub fn record(&self) -> Vec<String> {
        let year = &self.date[..4.min(self.date.len())];
        let mut row: Vec<String> = vec![
            format!("{}-{}", year, self.tourney_name.len()),
            self.tourney_name.clone(),
            "Hard".to_string(),
            "128".to_string(),
            self.level.clone(),
            self.date.clone(),
            "1".to_string(),
            format!("id-{}", self.winner),
            String::new(),
            String::new(),
            self.winner.clone(),
            "R".to_string(),
            "185".to_string(),
            "SUI".to_string(),
            "28.5".to_string(),
            format!("id-{}", self.loser),
            String::new(),
            String::new(),
            self.loser.clone(),
            "L".to_string(),
            "188".to_string(),
            "ESP".to_string(),
            "27.1".to_string(),
            self.score.clone(),
            "5".to_string(),
            "F".to_string(),
            "120".to_string(),
        ];
        row.extend(self.w_serve.iter().cloned());
        row.extend(self.l_serve.iter().cloned());
        row.extend([
            self.winner_rank.clone(),
            "5000".to_string(),
            self.loser_rank.clone(),
            "4000".to_string(),
        ]);
        row
    }
}

pub fn match_table(matches: &[MatchBuilder]) -> Table {
    Table::from_rows(RAW_HEADER, matches.iter().map(MatchBuilder::record).collect())
        .expect("builder rows match the header")
}

pub fn csv_text(matches: &[MatchBuilder]) -> String {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(RAW_HEADER).unwrap();
    for m in matches {
        wtr.write_record(m.record()).unwrap();
    }
    String::from_utf8(wtr.into_inner().unwrap()).unwrap()
}

pub fn write_season(dir: &Path, file_name: &str, matches: &[MatchBuilder]) {
    fs::write(dir.join(file_name), csv_text(matches)).unwrap();
}

/// A round robin among `players` spread over the 2010s, with serve counters
/// that vary from match to match.
pub fn round_robin(players: &[&str]) -> Vec<MatchBuilder> {
    let mut out = Vec::new();
    let mut k = 0.0;
    for (i, winner) in players.iter().enumerate() {
        for loser in players.iter().skip(i + 1) {
            k += 1.0;
            let year = 2010 + (k as u32 % 10);
            out.push(
                MatchBuilder::new(winner, loser)
                    .date(&format!("{}0{}15", year, 1 + (k as u32 % 9)))
                    .ranks(&(i + 1).to_string(), &(i + 2).to_string())
                    .w_serve([
                        4.0 + k % 7.0,
                        1.0 + k % 3.0,
                        70.0 + k % 11.0,
                        45.0 + k % 5.0,
                        33.0 + k % 4.0,
                        12.0 + k % 6.0,
                        10.0 + k % 3.0,
                        2.0 + k % 2.0,
                        3.0 + k % 4.0,
                    ])
                    .l_serve([
                        1.0 + k % 5.0,
                        2.0 + k % 4.0,
                        75.0 + k % 13.0,
                        44.0 + k % 7.0,
                        28.0 + k % 5.0,
                        10.0 + k % 4.0,
                        10.0 + k % 2.0,
                        3.0 + k % 3.0,
                        6.0 + k % 5.0,
                    ]),
            );
        }
    }
    out
}

pub fn player_match(name: &str, date: u32, rank: Option<f64>, won: bool) -> PlayerMatch {
    PlayerMatch {
        match_id: format!("{}_{}_{}", date / 10_000, date, name),
        tourney_name: "Test Open".to_string(),
        tourney_year: (date / 10_000) as i32,
        surface: "Hard".to_string(),
        tourney_level: "A".to_string(),
        tourney_date: date,
        score: "6-4 6-4".to_string(),
        round: "R32".to_string(),
        id: format!("id-{}", name),
        name: name.to_string(),
        hand: "R".to_string(),
        ht: Some(185.0),
        ioc: "SUI".to_string(),
        rank,
        rank_points: None,
        serve: ServeCounters::default(),
        won,
    }
}

pub fn with_serve(mut row: PlayerMatch, values: [f64; 9]) -> PlayerMatch {
    let [ace, df, svpt, first_in, first_won, second_won, sv_gms, bp_saved, bp_faced] = values;
    row.serve = ServeCounters {
        ace: Some(ace),
        df: Some(df),
        svpt: Some(svpt),
        first_in: Some(first_in),
        first_won: Some(first_won),
        second_won: Some(second_won),
        sv_gms: Some(sv_gms),
        bp_saved: Some(bp_saved),
        bp_faced: Some(bp_faced),
    };
    row
}

pub fn enriched(row: PlayerMatch) -> EnrichedMatch {
    EnrichedMatch::from(row)
}
