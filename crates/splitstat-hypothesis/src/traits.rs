//! Test trait and shared outcome type

use std::fmt;

use serde::{Deserialize, Serialize};
use splitstat_core::{Error, Result};

/// A two-sample hypothesis test producing a two-sided p-value
pub trait TwoSampleTest {
    /// Run the test on two independent samples.
    ///
    /// Both samples must hold at least two finite observations; the
    /// two-sided p-value is symmetric under swapping the samples.
    fn test(&self, sample_a: &[f64], sample_b: &[f64]) -> Result<TestOutcome>;

    /// Short name for diagnostics
    fn name(&self) -> &'static str;
}

/// Statistic and p-value of one test run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// The test statistic (t or U depending on the test)
    pub statistic: f64,
    /// Two-sided p-value in `[0, 1]`
    pub p_value: f64,
    /// Degrees of freedom, for tests that have them
    pub degrees_of_freedom: Option<f64>,
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.degrees_of_freedom {
            Some(df) => write!(
                f,
                "statistic={:.4}, p={:.4e}, df={:.2}",
                self.statistic, self.p_value, df
            ),
            None => write!(f, "statistic={:.4}, p={:.4e}", self.statistic, self.p_value),
        }
    }
}

/// Reject samples that are too small or not finite.
///
/// The smaller side's length is reported so callers can surface how many
/// eligible rows they actually had.
pub(crate) fn check_input(sample_a: &[f64], sample_b: &[f64], required: usize) -> Result<()> {
    let smaller = sample_a.len().min(sample_b.len());
    if smaller < required {
        return Err(Error::too_few_samples(required, smaller));
    }
    for (label, sample) in [("first", sample_a), ("second", sample_b)] {
        if sample.iter().any(|x| !x.is_finite()) {
            return Err(Error::Computation(format!(
                "{label} sample contains non-finite values"
            )));
        }
    }
    Ok(())
}
