//! Per-variant summaries and the summary table
//!
//! A [`SummaryTable`] is a pure function of (record table contents, compared
//! label pair): one descriptive row per observed variant, in lexicographic
//! label order, plus the three significance attributes of the compared pair
//! held once at table level. Holding them once makes "identical across all
//! rows" true by construction; presentation layers re-attach them to every
//! row they render.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Descriptive aggregates for one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSummary {
    /// Treatment group label
    pub variant: String,
    /// Number of rows observed for this variant
    pub sample_size: usize,
    /// Mean of `clicks`
    pub click_rate: f64,
    /// Mean of `dwell_time_sec`
    pub avg_dwell_time: f64,
    /// Fraction of rows with `feedback_score > 0`
    pub feedback_positive_rate: f64,
}

/// Why a p-value could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotComputable {
    /// One compared side has fewer eligible rows than the test requires
    InsufficientSample {
        /// Eligible rows on the smaller side
        observed: usize,
        /// Minimum rows the test needs per side
        required: usize,
    },
    /// All observations identical; the test statistic is undefined
    DegenerateDistribution,
}

impl fmt::Display for NotComputable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientSample { observed, required } => {
                write!(f, "insufficient sample: {observed} eligible, {required} required")
            }
            Self::DegenerateDistribution => write!(f, "degenerate distribution"),
        }
    }
}

/// Outcome of one significance test over the compared pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Significance {
    /// Computed two-sided p-value, always in `[0, 1]`
    PValue(f64),
    /// Explicitly undefined, with the reason.
    ///
    /// Undefined is a value, never a crash: a small or degenerate sample is
    /// an expected state of an experiment, not a fault. Callers must not
    /// conflate it with a large computed p-value.
    Undefined(NotComputable),
}

impl Significance {
    /// The p-value if one was computed
    pub fn p_value(&self) -> Option<f64> {
        match self {
            Self::PValue(p) => Some(*p),
            Self::Undefined(_) => None,
        }
    }

    /// Whether a p-value was computed
    pub fn is_defined(&self) -> bool {
        matches!(self, Self::PValue(_))
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PValue(p) => write!(f, "p={p:.4e}"),
            Self::Undefined(reason) => write!(f, "undefined ({reason})"),
        }
    }
}

/// The three shared significance attributes of one comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificanceSet {
    /// t-test on `clicks`
    pub click_rate: Significance,
    /// t-test on `dwell_time_sec`
    pub dwell_time: Significance,
    /// Mann-Whitney U test on the positive-feedback indicator
    pub feedback_score: Significance,
}

impl SignificanceSet {
    /// A set with all three attributes undefined for the same reason
    pub fn undefined(reason: NotComputable) -> Self {
        Self {
            click_rate: Significance::Undefined(reason),
            dwell_time: Significance::Undefined(reason),
            feedback_score: Significance::Undefined(reason),
        }
    }
}

/// Aggregated experiment results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    rows: Vec<VariantSummary>,
    significance: SignificanceSet,
}

impl SummaryTable {
    /// Assemble a table, sorting rows lexicographically by variant label.
    ///
    /// Sorting here rather than trusting the caller makes the deterministic
    /// row ordering structural.
    pub fn new(mut rows: Vec<VariantSummary>, significance: SignificanceSet) -> Self {
        rows.sort_by(|a, b| a.variant.cmp(&b.variant));
        Self { rows, significance }
    }

    /// Rows in lexicographic variant order, one per observed variant
    pub fn rows(&self) -> &[VariantSummary] {
        &self.rows
    }

    /// The shared significance attributes of the compared pair
    pub fn significance(&self) -> &SignificanceSet {
        &self.significance
    }

    /// Look up one variant's row by label
    pub fn get(&self, variant: &str) -> Option<&VariantSummary> {
        self.rows.iter().find(|r| r.variant == variant)
    }

    /// Number of summarized variants
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no variant was observed
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
