//! Tunable scoring thresholds.
//!
//! The defaults implement the reference policy: evidence below 0.5 is noise,
//! a criterion is strong with two confident items or three accepted ones, and
//! an overall favourable estimate needs three qualifying criteria.

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;

/// Thresholds used by the scorer and the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Evidence below this confidence is discarded before scoring.
    pub min_confidence: f64,
    /// Average confidence that makes a single item count as medium.
    pub medium_confidence: f64,
    /// Average confidence that, with enough items, makes a criterion high.
    pub high_confidence: f64,
    /// Accepted items that make a criterion medium regardless of confidence.
    pub medium_count: usize,
    /// Items needed alongside `high_confidence` for a high verdict.
    pub high_confident_count: usize,
    /// Accepted items that make a criterion high regardless of confidence.
    pub high_count: usize,
    /// Evidence items kept per criterion in the report.
    pub max_evidence_shown: usize,
    /// Qualifying criteria needed for a medium or high overall rating.
    pub min_qualifying_criteria: usize,
    /// High-strength criteria needed, on top of the qualifying ones, for a high rating.
    pub min_strong_criteria: usize,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            medium_confidence: 0.6,
            high_confidence: 0.75,
            medium_count: 2,
            high_confident_count: 2,
            high_count: 3,
            max_evidence_shown: 5,
            min_qualifying_criteria: 3,
            min_strong_criteria: 2,
        }
    }
}

impl ScoringPolicy {
    /// Check that thresholds are in range and consistent with each other.
    pub fn validate(&self) -> Result<(), AssessmentError> {
        for (name, value) in [
            ("min_confidence", self.min_confidence),
            ("medium_confidence", self.medium_confidence),
            ("high_confidence", self.high_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AssessmentError::InvalidPolicy(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.min_confidence > self.medium_confidence {
            return Err(AssessmentError::InvalidPolicy(
                "min_confidence must not exceed medium_confidence".into(),
            ));
        }
        if self.medium_confidence > self.high_confidence {
            return Err(AssessmentError::InvalidPolicy(
                "medium_confidence must not exceed high_confidence".into(),
            ));
        }

        for (name, value) in [
            ("medium_count", self.medium_count),
            ("high_confident_count", self.high_confident_count),
            ("high_count", self.high_count),
            ("max_evidence_shown", self.max_evidence_shown),
        ] {
            if value == 0 {
                return Err(AssessmentError::InvalidPolicy(format!(
                    "{name} must be at least 1"
                )));
            }
        }

        // Adding one accepted item must never lower a verdict: an item can
        // pull the average below a confidence band, so the count rule has to
        // take over at the next size.
        if self.medium_count > 2 {
            return Err(AssessmentError::InvalidPolicy(format!(
                "medium_count cannot exceed 2, got {}",
                self.medium_count
            )));
        }
        if self.high_count > self.high_confident_count + 1 {
            return Err(AssessmentError::InvalidPolicy(format!(
                "high_count cannot exceed high_confident_count + 1 ({}), got {}",
                self.high_confident_count + 1,
                self.high_count
            )));
        }

        if self.min_qualifying_criteria > 8 {
            return Err(AssessmentError::InvalidPolicy(format!(
                "min_qualifying_criteria cannot exceed 8, got {}",
                self.min_qualifying_criteria
            )));
        }
        if self.min_strong_criteria > 8 {
            return Err(AssessmentError::InvalidPolicy(format!(
                "min_strong_criteria cannot exceed 8, got {}",
                self.min_strong_criteria
            )));
        }

        Ok(())
    }
}
