//! Fixed text templates for descriptions, summaries, and recommendations.
//!
//! Kept apart from the scoring math so wording can be tested on its own and
//! output stays byte-for-byte reproducible.

use crate::model::{Criterion, Strength};

/// Description of a single criterion verdict.
///
/// `accepted` is the number of accepted evidence items, not the number shown.
pub fn criterion_description(criterion: Criterion, strength: Strength, accepted: usize) -> String {
    let label = criterion.label();
    match strength {
        Strength::High => format!(
            "Strong evidence of {label}. Found {accepted} compelling {}.",
            plural(accepted, "example", "examples")
        ),
        Strength::Medium => format!(
            "Some evidence of {label}. Found {accepted} {}.",
            plural(accepted, "example", "examples")
        ),
        Strength::Low => format!("No significant evidence found for {label}."),
    }
}

/// One-sentence summary of how many criteria were met.
pub fn summary(qualifying_count: usize) -> String {
    format!(
        "Based on the analysis of the provided CV, the applicant meets {qualifying_count} of the 8 O-1A criteria."
    )
}

/// Inputs for the recommendation template.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationContext<'a> {
    pub rating: Strength,
    pub qualifying_count: usize,
    pub min_qualifying: usize,
    /// Criteria at high strength, in enumeration order.
    pub strong: &'a [Criterion],
    /// Criteria at medium strength, in enumeration order.
    pub medium: &'a [Criterion],
    /// Criteria at low strength, in enumeration order.
    pub weak: &'a [Criterion],
}

/// Actionable recommendation keyed by the overall rating.
pub fn recommendation(ctx: &RecommendationContext<'_>) -> String {
    match ctx.rating {
        Strength::High => {
            let mut text = String::from(
                "The applicant shows strong qualifications for an O-1A visa and is likely to be found eligible. \
                 It is recommended to proceed with the application",
            );
            if ctx.strong.is_empty() {
                text.push('.');
            } else {
                text.push_str(&format!(
                    ", highlighting the strongest evidence in {}.",
                    join_labels(ctx.strong)
                ));
            }
            text
        }
        Strength::Medium => {
            let mut text = String::from(
                "The applicant meets the minimum requirements for an O-1A visa, but the application would benefit from stronger documentation. ",
            );
            if ctx.weak.is_empty() {
                text.push_str(&format!(
                    "Consider strengthening the criteria currently assessed at medium strength: {}.",
                    join_labels(ctx.medium)
                ));
            } else {
                text.push_str(&format!(
                    "Consider strengthening the application with additional evidence for {}.",
                    join_labels(ctx.weak)
                ));
            }
            text
        }
        Strength::Low => {
            let mut text = format!(
                "The applicant does not currently meet the minimum requirements for an O-1A visa ({} of the required {} criteria met).",
                ctx.qualifying_count, ctx.min_qualifying
            );
            if !ctx.weak.is_empty() {
                text.push_str(&format!(
                    " It is recommended to build evidence in underrepresented criteria: {}.",
                    join_labels(ctx.weak)
                ));
            }
            text
        }
    }
}

fn join_labels(criteria: &[Criterion]) -> String {
    criteria
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}
