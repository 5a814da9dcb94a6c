#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn pull_options_default_matches_constants() {
    let opts = PullOptions::default();
    assert_eq!(opts.threshold, 110.0);
    assert_eq!(opts.resistance, 2.5);
    assert_eq!(opts.min_spinner_ms, 800);
    assert_eq!(opts.settle_ms, 200);
}

#[test]
fn from_dataset_reads_threshold_and_resistance() {
    let opts = PullOptions::from_dataset(Some("80"), Some(" 3 "));
    assert_eq!(opts.threshold, 80.0);
    assert_eq!(opts.resistance, 3.0);
    assert_eq!(opts.min_spinner_ms, DEFAULT_MIN_SPINNER_MS);
}

#[test]
fn from_dataset_ignores_garbage_and_non_positive_values() {
    let opts = PullOptions::from_dataset(Some("tall"), Some("0"));
    assert_eq!(opts, PullOptions::default());

    let opts = PullOptions::from_dataset(Some("-20"), Some("NaN"));
    assert_eq!(opts, PullOptions::default());
}

#[test]
fn from_dataset_with_nothing_is_default() {
    assert_eq!(PullOptions::from_dataset(None, None), PullOptions::default());
}

#[test]
fn routes_map_root_and_home_to_home_link() {
    let home: Vec<_> = ROUTES.iter().filter(|(_, id)| *id == HOME_LINK_ID).map(|(p, _)| *p).collect();
    assert_eq!(home, vec!["/", "/home"]);
}

#[test]
fn routes_paths_are_unique() {
    for (i, (a, _)) in ROUTES.iter().enumerate() {
        for (b, _) in &ROUTES[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
