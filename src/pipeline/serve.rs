use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::info;

use super::types::{EnrichedMatch, ServeCounters, ServeFeatures};
use crate::config::{BreakPointSentinel, FeatureParams};

/// Columns fed to the reducer, in vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum ServeFeature {
    #[strum(serialize = "ace")]
    Aces,
    #[strum(serialize = "df")]
    DoubleFaults,
    #[strum(serialize = "1st_in_percentage")]
    FirstInRate,
    #[strum(serialize = "1st_win_percentage")]
    FirstWinRate,
    #[strum(serialize = "2nd_win_percentage")]
    SecondWinRate,
    #[strum(serialize = "avg_pts_per_sv_game")]
    PointsPerServiceGame,
    #[strum(serialize = "bpFaced")]
    BreakPointsFaced,
    #[strum(serialize = "saved_breaks_percentage")]
    BreakPointsSavedRate,
}

impl ServeFeature {
    /// The seven base features, plus the saved-break-point rate on request.
    pub fn feature_set(include_bp_saved_rate: bool) -> Vec<ServeFeature> {
        Self::iter()
            .filter(|f| include_bp_saved_rate || *f != Self::BreakPointsSavedRate)
            .collect()
    }

    pub fn value(self, row: &EnrichedMatch) -> Option<f64> {
        let counters = &row.player.serve;
        let derived = row.serve.unwrap_or_default();
        let v = match self {
            Self::Aces => counters.ace,
            Self::DoubleFaults => counters.df,
            Self::FirstInRate => derived.first_in_rate,
            Self::FirstWinRate => derived.first_win_rate,
            Self::SecondWinRate => derived.second_win_rate,
            Self::PointsPerServiceGame => derived.avg_points_per_service_game,
            Self::BreakPointsFaced => counters.bp_faced,
            Self::BreakPointsSavedRate => derived.break_points_saved_rate,
        };
        v.filter(|x| x.is_finite())
    }
}

pub fn serve_features(c: &ServeCounters, sentinel: BreakPointSentinel) -> ServeFeatures {
    let second_in = match (c.svpt, c.df, c.first_in) {
        (Some(svpt), Some(df), Some(first_in)) => Some(svpt - (df + first_in)),
        _ => None,
    };

    let break_points_saved_rate = match (c.bp_saved, c.bp_faced) {
        (_, Some(faced)) if faced == 0.0 => match sentinel {
            BreakPointSentinel::One => Some(1.0),
            BreakPointSentinel::Missing => None,
        },
        (saved, faced) => ratio(saved, faced),
    };

    ServeFeatures {
        second_in,
        first_in_rate: ratio(c.first_in, c.svpt),
        first_win_rate: ratio(c.first_won, c.first_in),
        second_win_rate: ratio(c.second_won, second_in),
        avg_points_per_service_game: ratio(c.svpt, c.sv_gms),
        break_points_saved_rate,
    }
}

/// Drops rows without an ace count (when `require_ace` is set) and attaches
/// the derived serve statistics to the rest.
pub fn derive_serve_features(rows: &[EnrichedMatch], params: &FeatureParams) -> Vec<EnrichedMatch> {
    let out: Vec<EnrichedMatch> = rows
        .iter()
        .filter(|row| !params.require_ace || row.player.serve.ace.is_some())
        .map(|row| {
            let mut enriched = row.clone();
            enriched.serve = Some(serve_features(&row.player.serve, params.bp_sentinel));
            enriched
        })
        .collect();

    info!(
        "🎯 Serve features: {} rows in, {} with serve counters",
        rows.len(),
        out.len()
    );
    out
}

// Undefined when either side is missing or the denominator is zero.
fn ratio(num: Option<f64>, den: Option<f64>) -> Option<f64> {
    match (num, den) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}
