//! Two-sample significance tests for experiment analysis
//!
//! This crate provides the hypothesis tests an A/B comparison needs: a
//! parametric test on means and a nonparametric test on ranks, both
//! two-sided, behind one [`TwoSampleTest`] trait.
//!
//! # Supported tests
//!
//! - **Student's t-test** ([`TTest`]): equal-variance by default, Welch's
//!   correction as an option. For metrics that behave like continuous
//!   means (click counts, dwell times).
//! - **Mann-Whitney U** ([`MannWhitneyU`]): rank-based, with an exact
//!   small-sample method and a tie-corrected normal approximation. For
//!   ordinal or heavily non-normal metrics such as binary satisfaction
//!   indicators.
//!
//! Tests report a [`TestOutcome`] and fail with typed errors rather than
//! producing NaN: too-small samples raise `InsufficientData`, zero-variance
//! or all-tied input raises `DegenerateDistribution`.
//!
//! # Examples
//!
//! ```rust
//! use splitstat_hypothesis::{student_t, TwoSampleTest};
//!
//! let group_a = vec![2.0, 1.0, 3.0];
//! let group_b = vec![5.0, 4.0, 6.0];
//!
//! let outcome = student_t().test(&group_a, &group_b).unwrap();
//! assert!(outcome.p_value > 0.0 && outcome.p_value <= 1.0);
//! ```

mod mann_whitney;
mod traits;

// Re-exports
pub use mann_whitney::{MannWhitneyMethod, MannWhitneyU};
pub use t_test::TTest;
pub use traits::{TestOutcome, TwoSampleTest};

// Convenience constructors
pub fn student_t() -> TTest {
    TTest::new()
}

pub fn welch_t() -> TTest {
    TTest::new().with_welch_correction()
}

pub fn mann_whitney() -> MannWhitneyU {
    MannWhitneyU::new()
}
