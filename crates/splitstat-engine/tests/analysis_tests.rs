//! End-to-end scenarios for the analysis engine

mod common;

use approx::assert_abs_diff_eq;
use common::{record, reference_table};
use splitstat_core::{NotComputable, RecordTable, Significance};
use splitstat_engine::{analyze, Analyzer, CachePolicy, Comparison, SummaryCache};

#[test]
fn test_reference_scenario_end_to_end() {
    let summary = analyze(&reference_table(), &Comparison::default()).unwrap();

    let labels: Vec<&str> = summary.rows().iter().map(|r| r.variant.as_str()).collect();
    assert_eq!(labels, vec!["A", "B"]);

    let a = summary.get("A").unwrap();
    assert_eq!(a.sample_size, 2);
    assert_abs_diff_eq!(a.click_rate, 1.5, epsilon = 1e-12);
    assert_abs_diff_eq!(a.avg_dwell_time, 9.0, epsilon = 1e-12);
    assert_abs_diff_eq!(a.feedback_positive_rate, 0.5, epsilon = 1e-12);

    let b = summary.get("B").unwrap();
    assert_abs_diff_eq!(b.click_rate, 4.5, epsilon = 1e-12);
    assert_abs_diff_eq!(b.avg_dwell_time, 19.0, epsilon = 1e-12);
    assert_abs_diff_eq!(b.feedback_positive_rate, 1.0, epsilon = 1e-12);

    let sig = summary.significance();
    assert_abs_diff_eq!(sig.click_rate.p_value().unwrap(), 0.051317, epsilon = 1e-5);
    assert_abs_diff_eq!(sig.dwell_time.p_value().unwrap(), 0.019419, epsilon = 1e-5);
    assert_abs_diff_eq!(
        sig.feedback_score.p_value().unwrap(),
        0.617075,
        epsilon = 1e-5
    );
}

#[test]
fn test_label_swap_symmetry() {
    let forward = analyze(&reference_table(), &Comparison::default()).unwrap();
    let backward = analyze(&reference_table(), &Comparison::new("B", "A").unwrap()).unwrap();

    let f = forward.significance();
    let b = backward.significance();
    assert_abs_diff_eq!(
        f.click_rate.p_value().unwrap(),
        b.click_rate.p_value().unwrap(),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        f.dwell_time.p_value().unwrap(),
        b.dwell_time.p_value().unwrap(),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        f.feedback_score.p_value().unwrap(),
        b.feedback_score.p_value().unwrap(),
        epsilon = 1e-12
    );
    // Aggregate rows do not depend on the compared pair at all
    assert_eq!(forward.rows(), backward.rows());
}

#[test]
fn test_query_filter_changes_eligible_rows() {
    let table = reference_table();

    let full = analyze(&table, &Comparison::default()).unwrap();
    assert_eq!(full.get("A").unwrap().sample_size, 2);

    // Filtering to one query leaves one session per variant, which is
    // enough to aggregate but too few to test
    let filtered = table.filter_queries(&["red shoes"]);
    let summary = analyze(&filtered, &Comparison::default()).unwrap();

    assert_eq!(summary.get("A").unwrap().sample_size, 1);
    assert_abs_diff_eq!(summary.get("A").unwrap().click_rate, 2.0, epsilon = 1e-12);
    assert_eq!(
        summary.significance().click_rate,
        Significance::Undefined(NotComputable::InsufficientSample {
            observed: 1,
            required: 2,
        })
    );
}

#[test]
fn test_identical_rows_mark_all_metrics_degenerate() {
    let table = RecordTable::from_records(vec![
        record("A", "q", 1.0, 5.0, 1.0),
        record("A", "q", 1.0, 5.0, 1.0),
        record("B", "q", 1.0, 5.0, 1.0),
        record("B", "q", 1.0, 5.0, 1.0),
    ]);
    let summary = analyze(&table, &Comparison::default()).unwrap();

    let degenerate = Significance::Undefined(NotComputable::DegenerateDistribution);
    assert_eq!(summary.significance().click_rate, degenerate);
    assert_eq!(summary.significance().dwell_time, degenerate);
    assert_eq!(summary.significance().feedback_score, degenerate);

    // Aggregates are still well-defined
    assert_abs_diff_eq!(summary.get("A").unwrap().click_rate, 1.0, epsilon = 1e-12);
}

#[test]
fn test_unknown_compared_labels_are_tolerated() {
    let comparison = Comparison::new("X", "Y").unwrap();
    let summary = analyze(&reference_table(), &comparison).unwrap();

    // Observed variants are summarized even though neither is compared
    assert_eq!(summary.len(), 2);
    assert_eq!(
        summary.significance().click_rate,
        Significance::Undefined(NotComputable::InsufficientSample {
            observed: 0,
            required: 2,
        })
    );
}

#[test]
fn test_larger_sample_reaches_significance() {
    // Forty sessions per variant with a clear difference on every metric
    let mut records = Vec::new();
    for i in 0..40 {
        let wiggle = (i % 5) as f64;
        records.push(record("A", "q", 1.0 + wiggle, 10.0 + wiggle, -1.0));
        records.push(record("B", "q", 6.0 + wiggle, 30.0 + wiggle, 1.0));
    }
    let summary = analyze(&RecordTable::from_records(records), &Comparison::default()).unwrap();

    let sig = summary.significance();
    assert!(sig.click_rate.p_value().unwrap() < 1e-6);
    assert!(sig.dwell_time.p_value().unwrap() < 1e-6);
    assert!(sig.feedback_score.p_value().unwrap() < 1e-6);
}

#[test]
fn test_cached_analysis_matches_direct() {
    let cache = SummaryCache::new(CachePolicy::Lru { max_entries: 16 });
    let analyzer = Analyzer::new();
    let table = reference_table();
    let comparison = Comparison::default();

    let direct = analyzer.analyze(&table, &comparison).unwrap();
    let cached = cache
        .get_or_compute(&analyzer, &table, &comparison)
        .unwrap();
    let again = cache
        .get_or_compute(&analyzer, &table, &comparison)
        .unwrap();

    assert_eq!(*cached, direct);
    assert_eq!(*again, direct);
    assert_eq!(cache.stats().hits, 1);
    assert_eq!(cache.stats().misses, 1);
}
