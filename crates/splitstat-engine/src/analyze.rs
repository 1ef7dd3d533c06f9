//! The analysis engine
//!
//! One pure pass from record table to summary table: validate the metric
//! columns, partition rows by variant, aggregate each group, then test the
//! compared pair on each metric. The engine performs no I/O, never mutates
//! its input, and produces byte-identical output for identical input, which
//! is what makes its results safe to memoize and to throw away.
//!
//! Cost is O(n log n) in the number of rows, driven by the rank test's
//! sort; no row cap is enforced here.

use std::collections::BTreeMap;

use splitstat_core::{
    Error, NotComputable, RecordTable, Result, SessionRecord, Significance, SignificanceSet,
    SummaryTable, VariantSummary,
};
use splitstat_hypothesis::{MannWhitneyU, TTest, TestOutcome, TwoSampleTest};
use tracing::{debug, instrument};

use crate::config::Comparison;

/// The analysis engine.
///
/// Metric/test pairing is fixed: group means of `clicks` and
/// `dwell_time_sec` are compared with the t-test, and the binary
/// `feedback_score > 0` indicator with the Mann-Whitney U test, where a
/// mean-based test would lean on a normality the indicator does not have.
///
/// The t-test is the equal-variance form by default;
/// [`with_welch_t`](Self::with_welch_t) switches both t-tested metrics to
/// Welch's form together, so one engine always applies one choice
/// consistently.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    t_test: TTest,
    rank_test: MannWhitneyU,
}

impl Analyzer {
    /// Create an engine with the default test configuration
    pub fn new() -> Self {
        Self {
            t_test: TTest::new(),
            rank_test: MannWhitneyU::new(),
        }
    }

    /// Use Welch's unequal-variance t-test for both t-tested metrics
    pub fn with_welch_t(mut self) -> Self {
        self.t_test = TTest::new().with_welch_correction();
        self
    }

    /// Summarize every observed variant and test the compared pair.
    ///
    /// Schema problems (non-finite metric values) fail fast with the
    /// offending column named. Small or degenerate compared samples do not
    /// fail: the affected p-values come back as explicit
    /// [`Significance::Undefined`] markers while aggregation proceeds. An
    /// empty table yields an empty summary with all three markers
    /// undefined.
    #[instrument(skip(self, table), fields(rows = table.len()))]
    pub fn analyze(&self, table: &RecordTable, comparison: &Comparison) -> Result<SummaryTable> {
        table.validate_metrics()?;

        // BTreeMap iteration fixes the lexicographic row order
        let mut groups: BTreeMap<&str, Vec<&SessionRecord>> = BTreeMap::new();
        for record in table {
            groups
                .entry(record.variant.as_str())
                .or_default()
                .push(record);
        }

        let rows: Vec<VariantSummary> = groups
            .iter()
            .map(|(&variant, records)| summarize_group(variant, records))
            .collect();

        let empty: Vec<&SessionRecord> = Vec::new();
        let group_a = groups.get(comparison.variant_a.as_str()).unwrap_or(&empty);
        let group_b = groups.get(comparison.variant_b.as_str()).unwrap_or(&empty);
        let significance = self.run_tests(group_a, group_b)?;

        debug!(
            variants = rows.len(),
            eligible_a = group_a.len(),
            eligible_b = group_b.len(),
            "analysis complete"
        );

        Ok(SummaryTable::new(rows, significance))
    }

    fn run_tests(
        &self,
        group_a: &[&SessionRecord],
        group_b: &[&SessionRecord],
    ) -> Result<SignificanceSet> {
        let clicks_a = metric(group_a, |r| r.clicks);
        let clicks_b = metric(group_b, |r| r.clicks);
        let dwell_a = metric(group_a, |r| r.dwell_time_sec);
        let dwell_b = metric(group_b, |r| r.dwell_time_sec);
        let feedback_a = metric(group_a, indicator);
        let feedback_b = metric(group_b, indicator);

        Ok(SignificanceSet {
            click_rate: catch_undefined(self.t_test.test(&clicks_a, &clicks_b))?,
            dwell_time: catch_undefined(self.t_test.test(&dwell_a, &dwell_b))?,
            feedback_score: catch_undefined(self.rank_test.test(&feedback_a, &feedback_b))?,
        })
    }
}

/// Run a table through an engine with the default configuration
pub fn analyze(table: &RecordTable, comparison: &Comparison) -> Result<SummaryTable> {
    Analyzer::new().analyze(table, comparison)
}

/// Convert the expected per-metric failures into markers; anything else is
/// a real error and propagates
fn catch_undefined(outcome: Result<TestOutcome>) -> Result<Significance> {
    match outcome {
        Ok(outcome) => Ok(Significance::PValue(outcome.p_value)),
        Err(Error::InsufficientData { expected, actual }) => Ok(Significance::Undefined(
            NotComputable::InsufficientSample {
                observed: actual,
                required: expected,
            },
        )),
        Err(Error::DegenerateDistribution(_)) => Ok(Significance::Undefined(
            NotComputable::DegenerateDistribution,
        )),
        Err(e) => Err(e),
    }
}

/// Binary positive-feedback indicator
fn indicator(record: &SessionRecord) -> f64 {
    if record.has_positive_feedback() {
        1.0
    } else {
        0.0
    }
}

fn metric(group: &[&SessionRecord], extract: impl Fn(&SessionRecord) -> f64) -> Vec<f64> {
    group.iter().map(|r| extract(r)).collect()
}

/// Mean of a slice; NaN on empty input. Observed groups are never empty,
/// so the NaN arm is unreachable from `analyze`.
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn summarize_group(variant: &str, records: &[&SessionRecord]) -> VariantSummary {
    let clicks = metric(records, |r| r.clicks);
    let dwell = metric(records, |r| r.dwell_time_sec);
    let positive = records
        .iter()
        .filter(|r| r.has_positive_feedback())
        .count();

    VariantSummary {
        variant: variant.to_string(),
        sample_size: records.len(),
        click_rate: mean(&clicks),
        avg_dwell_time: mean(&dwell),
        feedback_positive_rate: positive as f64 / records.len() as f64,
    }
}
