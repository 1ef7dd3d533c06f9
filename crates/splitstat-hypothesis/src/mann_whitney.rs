//! Mann-Whitney U rank-sum test
//!
//! A nonparametric two-sample test on ranks, the right tool when the
//! underlying metric is ordinal or heavily non-normal (for example a binary
//! satisfaction indicator). Reports the U statistic of the first sample and
//! a two-sided p-value.
//!
//! Two p-value methods are available:
//!
//! - **Exact**: the full permutation distribution of U, computed by the
//!   standard counting recurrence. Valid only for untied samples.
//! - **Asymptotic**: normal approximation with tie-corrected variance and,
//!   by default, a continuity correction of 0.5.
//!
//! The default [`MannWhitneyMethod::Auto`] uses the exact distribution when
//! both samples are small and untied, where the approximation is weakest,
//! and the approximation otherwise.

use splitstat_core::{Error, Result};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::traits::{check_input, TestOutcome, TwoSampleTest};

/// Largest per-sample size for which `Auto` selects the exact method
const EXACT_LIMIT: usize = 8;

/// How the p-value is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MannWhitneyMethod {
    /// Exact for small untied samples, asymptotic otherwise
    #[default]
    Auto,
    /// Exact permutation distribution; rejects tied samples
    Exact,
    /// Normal approximation with tie correction
    Asymptotic,
}

/// Two-sided Mann-Whitney U test
#[derive(Debug, Clone, Copy)]
pub struct MannWhitneyU {
    method: MannWhitneyMethod,
    use_continuity_correction: bool,
}

impl MannWhitneyU {
    /// Create a test with automatic method selection and continuity
    /// correction enabled
    pub fn new() -> Self {
        Self {
            method: MannWhitneyMethod::Auto,
            use_continuity_correction: true,
        }
    }

    /// Select the p-value method explicitly.
    ///
    /// `Exact` works for any sample size but its cost grows with
    /// `n1 * n2`; it errors on tied samples, where the permutation
    /// distribution of midranks is not the textbook one.
    pub fn with_method(mut self, method: MannWhitneyMethod) -> Self {
        self.method = method;
        self
    }

    /// Disable the continuity correction of the normal approximation
    pub fn without_continuity_correction(mut self) -> Self {
        self.use_continuity_correction = false;
        self
    }

    fn asymptotic_p_value(
        &self,
        n1: usize,
        n2: usize,
        u1: f64,
        tie_sizes: &[usize],
    ) -> Result<f64> {
        let n1f = n1 as f64;
        let n2f = n2 as f64;
        let n = n1f + n2f;

        let mu = n1f * n2f / 2.0;
        let tie_term: f64 = tie_sizes
            .iter()
            .map(|&t| {
                let t = t as f64;
                t * t * t - t
            })
            .sum();
        let sigma_sq = n1f * n2f / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));
        if sigma_sq <= 0.0 {
            return Err(Error::DegenerateDistribution(
                "all observations are tied".to_string(),
            ));
        }

        let mut deviation = (u1 - mu).abs();
        if self.use_continuity_correction {
            deviation = (deviation - 0.5).max(0.0);
        }
        let z = deviation / sigma_sq.sqrt();

        let normal = Normal::new(0.0, 1.0).map_err(|e| {
            Error::Computation(format!("Failed to create normal distribution: {}", e))
        })?;
        Ok((2.0 * normal.cdf(-z)).min(1.0))
    }
}

impl Default for MannWhitneyU {
    fn default() -> Self {
        Self::new()
    }
}

struct PooledRanks {
    /// Midrank sum of the first sample
    rank_sum_a: f64,
    /// Sizes of tie groups spanning more than one observation
    tie_sizes: Vec<usize>,
}

/// Assign midranks over the pooled sample and tally tie groups
fn rank_pooled(sample_a: &[f64], sample_b: &[f64]) -> PooledRanks {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Side {
        A,
        B,
    }

    let mut pooled: Vec<(f64, Side)> = Vec::with_capacity(sample_a.len() + sample_b.len());
    pooled.extend(sample_a.iter().map(|&x| (x, Side::A)));
    pooled.extend(sample_b.iter().map(|&x| (x, Side::B)));
    pooled.sort_by(|x, y| x.0.total_cmp(&y.0));

    let mut rank_sum_a = 0.0;
    let mut tie_sizes = Vec::new();
    let mut i = 0;
    while i < pooled.len() {
        let mut j = i + 1;
        while j < pooled.len() && pooled[j].0 == pooled[i].0 {
            j += 1;
        }
        // Positions i..j are one tie group; 1-based ranks i+1..=j average
        // to the midrank below
        let midrank = (i + j + 1) as f64 / 2.0;
        let a_count = pooled[i..j].iter().filter(|(_, s)| *s == Side::A).count();
        rank_sum_a += midrank * a_count as f64;
        if j - i > 1 {
            tie_sizes.push(j - i);
        }
        i = j;
    }

    PooledRanks {
        rank_sum_a,
        tie_sizes,
    }
}

/// Counts of rank arrangements per U value for untied samples, via the
/// recurrence f(m, n, u) = f(m-1, n, u-n) + f(m, n-1, u): the largest
/// pooled observation either belongs to the first sample (beating all n of
/// the second) or to the second (beating none of the first).
fn exact_u_counts(n1: usize, n2: usize) -> Vec<f64> {
    let u_max = n1 * n2;
    // dp[n][u] holds f(m, n, u) for the current m
    let mut dp = vec![vec![0.0; u_max + 1]; n2 + 1];
    for row in dp.iter_mut() {
        row[0] = 1.0;
    }
    for _m in 1..=n1 {
        let mut next = vec![vec![0.0; u_max + 1]; n2 + 1];
        next[0][0] = 1.0;
        for n in 1..=n2 {
            for u in 0..=u_max {
                let take_a = if u >= n { dp[n][u - n] } else { 0.0 };
                next[n][u] = take_a + next[n - 1][u];
            }
        }
        dp = next;
    }
    dp.pop().unwrap_or_default()
}

/// Two-sided exact p-value for an untied U observation
fn exact_p_value(n1: usize, n2: usize, u1: f64) -> f64 {
    let counts = exact_u_counts(n1, n2);
    let total: f64 = counts.iter().sum();
    // Untied ranks make U integral
    let u = u1.round() as usize;
    // By symmetry of the U distribution, the smaller tail decides
    let tail = u.min(n1 * n2 - u);
    let cdf = counts[..=tail].iter().sum::<f64>() / total;
    (2.0 * cdf).min(1.0)
}

impl TwoSampleTest for MannWhitneyU {
    fn test(&self, sample_a: &[f64], sample_b: &[f64]) -> Result<TestOutcome> {
        check_input(sample_a, sample_b, 2)?;

        let n1 = sample_a.len();
        let n2 = sample_b.len();
        let ranked = rank_pooled(sample_a, sample_b);
        let u1 = ranked.rank_sum_a - (n1 * (n1 + 1)) as f64 / 2.0;
        let has_ties = !ranked.tie_sizes.is_empty();

        let use_exact = match self.method {
            MannWhitneyMethod::Exact => {
                if has_ties {
                    return Err(Error::InvalidParameter(
                        "exact method requires samples without ties".to_string(),
                    ));
                }
                true
            }
            MannWhitneyMethod::Asymptotic => false,
            MannWhitneyMethod::Auto => !has_ties && n1 <= EXACT_LIMIT && n2 <= EXACT_LIMIT,
        };

        let p_value = if use_exact {
            exact_p_value(n1, n2, u1)
        } else {
            self.asymptotic_p_value(n1, n2, u1, &ranked.tie_sizes)?
        };

        debug!(
            u1,
            p_value,
            exact = use_exact,
            "Mann-Whitney test complete"
        );

        Ok(TestOutcome {
            statistic: u1,
            p_value,
            degrees_of_freedom: None,
        })
    }

    fn name(&self) -> &'static str {
        "mann-whitney-u"
    }
}
