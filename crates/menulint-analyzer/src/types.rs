//! Result types for a combined review

use crate::error::AnalysisError;
use menulint_domain::{ComparisonResult, Correction};

/// Outcome of [`crate::Analyzer::review`]
///
/// Each analysis succeeds or fails on its own.
#[derive(Debug, Clone)]
pub struct ReviewReport {
    /// Correction analysis outcome
    pub corrections: Result<Vec<Correction>, AnalysisError>,

    /// Comparison outcome; `None` when no reference was supplied
    pub comparison: Option<Result<Vec<ComparisonResult>, AnalysisError>>,
}

impl ReviewReport {
    /// True if any requested analysis failed
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Failed analyses with their labels
    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &AnalysisError)> {
        let corrections = self.corrections.as_ref().err().map(|e| ("corrections", e));
        let comparison = self
            .comparison
            .as_ref()
            .and_then(|c| c.as_ref().err())
            .map(|e| ("comparison", e));
        corrections.into_iter().chain(comparison)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_failures() {
        let report = ReviewReport {
            corrections: Ok(Vec::new()),
            comparison: None,
        };
        assert!(!report.has_failures());
    }

    #[test]
    fn test_partial_failure() {
        let report = ReviewReport {
            corrections: Ok(Vec::new()),
            comparison: Some(Err(AnalysisError::Timeout(5))),
        };
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "comparison");
    }
}
