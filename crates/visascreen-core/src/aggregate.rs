//! Overall assessment aggregation.
//!
//! Combines the eight per-criterion verdicts into an overall rating following
//! the "at least 3 qualifying criteria" guideline, weighted by how many of
//! them are strong.

use std::collections::BTreeMap;

use crate::error::AssessmentError;
use crate::model::{Criterion, CriterionAssessment, OverallAssessment, Strength};
use crate::policy::ScoringPolicy;
use crate::text::{self, RecommendationContext};

/// Overall rating from the qualifying and strong criterion counts.
pub fn overall_rating(qualifying_count: usize, strong_count: usize, policy: &ScoringPolicy) -> Strength {
    if qualifying_count < policy.min_qualifying_criteria {
        Strength::Low
    } else if strong_count >= policy.min_strong_criteria {
        Strength::High
    } else {
        Strength::Medium
    }
}

/// Aggregate per-criterion assessments into an overall assessment.
///
/// All eight criteria must be present; a missing key means the caller broke
/// the pipeline contract and is reported as [`AssessmentError::IncompleteCriteria`].
pub fn aggregate(
    criteria_assessments: BTreeMap<Criterion, CriterionAssessment>,
    policy: &ScoringPolicy,
) -> Result<OverallAssessment, AssessmentError> {
    let missing: Vec<Criterion> = Criterion::ALL
        .into_iter()
        .filter(|c| !criteria_assessments.contains_key(c))
        .collect();
    if !missing.is_empty() {
        return Err(AssessmentError::IncompleteCriteria { missing });
    }

    let by_strength = |strength: Strength| -> Vec<Criterion> {
        criteria_assessments
            .values()
            .filter(|a| a.strength() == strength)
            .map(|a| a.criterion())
            .collect()
    };
    let strong = by_strength(Strength::High);
    let medium = by_strength(Strength::Medium);
    let weak = by_strength(Strength::Low);

    let qualifying_count = strong.len() + medium.len();
    let strong_count = strong.len();
    let rating = overall_rating(qualifying_count, strong_count, policy);

    tracing::info!(
        qualifying_count,
        strong_count,
        overall_rating = %rating,
        "aggregated assessment"
    );

    let summary = text::summary(qualifying_count);
    let recommendation = text::recommendation(&RecommendationContext {
        rating,
        qualifying_count,
        min_qualifying: policy.min_qualifying_criteria,
        strong: &strong,
        medium: &medium,
        weak: &weak,
    });

    Ok(OverallAssessment::new(
        criteria_assessments,
        rating,
        summary,
        recommendation,
    ))
}
