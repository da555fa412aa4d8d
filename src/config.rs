use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumString};

use crate::error::{ServeForgeError, SfResult};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub filter: FilterParams,
    #[command(flatten)]
    pub features: FeatureParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    // Grand Slams, Masters 1000, tour-level
    #[arg(long, default_value = "G,M,A")]
    pub tourney_levels: String,
    #[arg(long, default_value = "Laver Cup")]
    pub excluded_tourneys: String,
    #[arg(long, default_value_t = 2010)]
    pub year_min: i32,
    #[arg(long, default_value_t = 2019)]
    pub year_max: i32,
    #[arg(long, default_value_t = 20)]
    pub top_players: usize,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            tourney_levels: "G,M,A".to_string(),
            excluded_tourneys: "Laver Cup".to_string(),
            year_min: 2010,
            year_max: 2019,
            top_players: 20,
        }
    }
}

/// How the reducer treats rows with a missing serve feature.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MissingPolicy {
    /// Fill each missing value with its column mean.
    Impute,
    /// Remove the row before standardizing.
    Drop,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ScoreParseMode {
    /// Whole leading digit run of each side ("10(8)" -> 10).
    Full,
    /// First character of each side only. Kept to reproduce old exports.
    LegacyFirstDigit,
}

/// Value of the saved-break-point rate when no break point was faced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BreakPointSentinel {
    One,
    Missing,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureParams {
    #[arg(long, value_enum, default_value_t = MissingPolicy::Impute)]
    pub missing_policy: MissingPolicy,
    #[arg(long, value_enum, default_value_t = ScoreParseMode::Full)]
    pub score_mode: ScoreParseMode,
    #[arg(long, value_enum, default_value_t = BreakPointSentinel::One)]
    pub bp_sentinel: BreakPointSentinel,
    #[arg(long, default_value_t = false)]
    pub include_bp_saved_rate: bool,
    // Rows without an ace count are dropped before feature derivation
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub require_ace: bool,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            missing_policy: MissingPolicy::Impute,
            score_mode: ScoreParseMode::Full,
            bp_sentinel: BreakPointSentinel::One,
            include_bp_saved_rate: false,
            require_ace: true,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ServeForgeError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies every flag the user typed explicitly over the file-provided values.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident, $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(filter, tourney_levels);
        update_if_present!(filter, excluded_tourneys);
        update_if_present!(filter, year_min);
        update_if_present!(filter, year_max);
        update_if_present!(filter, top_players);

        update_if_present!(features, missing_policy);
        update_if_present!(features, score_mode);
        update_if_present!(features, bp_sentinel);
        update_if_present!(features, include_bp_saved_rate);
        update_if_present!(features, require_ace);
    }

    pub fn validate(&self) -> SfResult<()> {
        let f = &self.filter;
        if f.year_min > f.year_max {
            return Err(ServeForgeError::Config(format!(
                "year window is empty: {} > {}",
                f.year_min, f.year_max
            )));
        }
        if f.top_players == 0 {
            return Err(ServeForgeError::Config(
                "top_players must be at least 1".to_string(),
            ));
        }
        if f.get_tourney_levels().is_empty() {
            return Err(ServeForgeError::Config(
                "at least one tourney level is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl FilterParams {
    pub fn get_tourney_levels(&self) -> Vec<String> {
        parse_list(&self.tourney_levels)
    }

    pub fn get_excluded_tourneys(&self) -> Vec<String> {
        parse_list(&self.excluded_tourneys)
    }

    pub fn contains_year(&self, year: i32) -> bool {
        (self.year_min..=self.year_max).contains(&year)
    }
}

fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
