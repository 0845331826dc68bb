//! Assessment error types.
//!
//! None of these are caused by the content of a CV: weak or missing evidence
//! always degrades to a `low` verdict instead of an error.

use thiserror::Error;

use crate::model::Criterion;

/// Errors raised by the scoring core.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// An evidence record could not be turned into [`Evidence`](crate::model::Evidence).
    #[error("invalid evidence: {reason}")]
    InvalidEvidence { reason: String },

    /// The aggregator was handed a mapping without all eight criteria.
    #[error("incomplete criteria: missing {}", format_missing(.missing))]
    IncompleteCriteria { missing: Vec<Criterion> },

    /// A configured scoring policy is out of range or inconsistent.
    #[error("invalid scoring policy: {0}")]
    InvalidPolicy(String),
}

impl AssessmentError {
    /// Returns `true` for errors that indicate a broken caller contract rather
    /// than bad input data.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, AssessmentError::IncompleteCriteria { .. })
    }
}

fn format_missing(missing: &[Criterion]) -> String {
    missing
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_criteria_lists_missing_keys() {
        let err = AssessmentError::IncompleteCriteria {
            missing: vec![Criterion::Press, Criterion::HighRemuneration],
        };
        assert_eq!(
            err.to_string(),
            "incomplete criteria: missing press, high_remuneration"
        );
        assert!(err.is_contract_violation());
    }

    #[test]
    fn invalid_evidence_is_not_a_contract_violation() {
        let err = AssessmentError::InvalidEvidence {
            reason: "text is empty".into(),
        };
        assert!(!err.is_contract_violation());
        assert_eq!(err.to_string(), "invalid evidence: text is empty");
    }
}
