mod common;

use common::{enriched, player_match, with_serve};
use serveforge::config::{BreakPointSentinel, FeatureParams};
use serveforge::pipeline::serve::{derive_serve_features, serve_features, ServeFeature};
use serveforge::pipeline::types::ServeCounters;

// ace, df, svpt, 1stIn, 1stWon, 2ndWon, SvGms, bpSaved, bpFaced
const TYPICAL: [f64; 9] = [5.0, 2.0, 80.0, 50.0, 38.0, 18.0, 12.0, 3.0, 4.0];

fn counters(values: [f64; 9]) -> ServeCounters {
    with_serve(player_match("Alpha", 20150119, None, true), values).serve
}

#[test]
fn test_ratios_of_a_typical_match() {
    let f = serve_features(&counters(TYPICAL), BreakPointSentinel::One);
    assert_eq!(f.second_in, Some(28.0));
    assert_eq!(f.first_in_rate, Some(50.0 / 80.0));
    assert_eq!(f.first_win_rate, Some(38.0 / 50.0));
    assert_eq!(f.second_win_rate, Some(18.0 / 28.0));
    assert_eq!(f.avg_points_per_service_game, Some(80.0 / 12.0));
    assert_eq!(f.break_points_saved_rate, Some(0.75));
}

#[test]
fn test_no_break_points_faced_is_a_perfect_save_rate() {
    let mut values = TYPICAL;
    values[7] = 0.0;
    values[8] = 0.0;
    let f = serve_features(&counters(values), BreakPointSentinel::One);
    assert_eq!(f.break_points_saved_rate, Some(1.0));

    let f = serve_features(&counters(values), BreakPointSentinel::Missing);
    assert_eq!(f.break_points_saved_rate, None);
}

#[test]
fn test_zero_first_serves_in_leaves_rate_missing() {
    let mut values = TYPICAL;
    values[3] = 0.0;
    values[4] = 0.0;
    let f = serve_features(&counters(values), BreakPointSentinel::One);
    assert_eq!(f.first_win_rate, None);
    assert_eq!(f.first_in_rate, Some(0.0));
}

#[test]
fn test_zero_denominators_never_produce_infinities() {
    let f = serve_features(&counters([0.0; 9]), BreakPointSentinel::One);
    assert_eq!(f.second_in, Some(0.0));
    assert_eq!(f.first_in_rate, None);
    assert_eq!(f.first_win_rate, None);
    assert_eq!(f.second_win_rate, None);
    assert_eq!(f.avg_points_per_service_game, None);
}

#[test]
fn test_missing_counters_propagate() {
    let f = serve_features(&ServeCounters::default(), BreakPointSentinel::One);
    assert_eq!(f.second_in, None);
    assert_eq!(f.first_in_rate, None);
    assert_eq!(f.break_points_saved_rate, None);
}

#[test]
fn test_ace_gate_drops_incomplete_rows() {
    let complete = enriched(with_serve(player_match("Alpha", 20150119, None, true), TYPICAL));
    let mut partial = complete.clone();
    partial.player.serve.ace = None;

    let rows = vec![complete, partial];
    let gated = derive_serve_features(&rows, &FeatureParams::default());
    assert_eq!(gated.len(), 1);
    assert!(gated[0].serve.is_some());

    let params = FeatureParams {
        require_ace: false,
        ..Default::default()
    };
    let ungated = derive_serve_features(&rows, &params);
    assert_eq!(ungated.len(), 2);
    assert_eq!(ServeFeature::Aces.value(&ungated[1]), None);
    assert_eq!(ServeFeature::FirstInRate.value(&ungated[1]), Some(50.0 / 80.0));
}

#[test]
fn test_feature_set_names_and_order() {
    let base: Vec<String> = ServeFeature::feature_set(false)
        .iter()
        .map(|f| f.to_string())
        .collect();
    assert_eq!(
        base,
        [
            "ace",
            "df",
            "1st_in_percentage",
            "1st_win_percentage",
            "2nd_win_percentage",
            "avg_pts_per_sv_game",
            "bpFaced"
        ]
    );
    let extended = ServeFeature::feature_set(true);
    assert_eq!(extended.len(), 8);
    assert_eq!(extended[7], ServeFeature::BreakPointsSavedRate);
}

#[test]
fn test_full_feature_set_covers_every_feature() {
    use strum::IntoEnumIterator;
    let all: Vec<ServeFeature> = ServeFeature::iter().collect();
    assert_eq!(ServeFeature::feature_set(true), all);
    assert!(!ServeFeature::feature_set(false).contains(&ServeFeature::BreakPointsSavedRate));
}
