//! Comparison configuration

use serde::{Deserialize, Serialize};
use splitstat_core::{Error, Result};

/// Default label of the control variant
pub const DEFAULT_VARIANT_A: &str = "A";
/// Default label of the treatment variant
pub const DEFAULT_VARIANT_B: &str = "B";

/// The pair of variant labels one comparison tests.
///
/// The engine summarizes every variant it observes, but significance is
/// computed for exactly this pair. Rows with other labels feed aggregates
/// only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// First compared label, conventionally the control
    pub variant_a: String,
    /// Second compared label, conventionally the treatment
    pub variant_b: String,
}

impl Comparison {
    /// Compare two distinct, non-empty labels
    pub fn new(variant_a: impl Into<String>, variant_b: impl Into<String>) -> Result<Self> {
        let variant_a = variant_a.into();
        let variant_b = variant_b.into();
        if variant_a.is_empty() || variant_b.is_empty() {
            return Err(Error::InvalidParameter(
                "variant labels must be non-empty".to_string(),
            ));
        }
        if variant_a == variant_b {
            return Err(Error::InvalidParameter(format!(
                "compared labels must differ, got {variant_a:?} twice"
            )));
        }
        Ok(Self {
            variant_a,
            variant_b,
        })
    }
}

impl Default for Comparison {
    /// The conventional "A" versus "B" comparison
    fn default() -> Self {
        Self {
            variant_a: DEFAULT_VARIANT_A.to_string(),
            variant_b: DEFAULT_VARIANT_B.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        let comparison = Comparison::default();
        assert_eq!(comparison.variant_a, "A");
        assert_eq!(comparison.variant_b, "B");
    }

    #[test]
    fn test_valid_custom_labels() {
        let comparison = Comparison::new("control", "treatment").unwrap();
        assert_eq!(comparison.variant_a, "control");
        assert_eq!(comparison.variant_b, "treatment");
    }

    #[test]
    fn test_rejects_identical_labels() {
        match Comparison::new("A", "A") {
            Err(Error::InvalidParameter(msg)) => assert!(msg.contains("differ")),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_empty_labels() {
        assert!(Comparison::new("", "B").is_err());
        assert!(Comparison::new("A", "").is_err());
    }
}
