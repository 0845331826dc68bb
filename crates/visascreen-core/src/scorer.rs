//! Per-criterion scoring.
//!
//! Reduces the evidence candidates for one criterion to a strength verdict.
//! Quantity and quality both count, so neither a single confident hit nor a
//! pile of weak ones decides the verdict on its own.

use crate::model::{Criterion, CriterionAssessment, Evidence, Strength};
use crate::policy::ScoringPolicy;
use crate::text;

/// Count and mean confidence of the accepted evidence for one criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvidenceStats {
    pub accepted: usize,
    pub avg_confidence: f64,
}

/// Score one criterion.
///
/// Never fails: empty or entirely sub-threshold input yields `Strength::Low`
/// with no evidence shown.
pub fn score(
    criterion: Criterion,
    evidence: Vec<Evidence>,
    policy: &ScoringPolicy,
) -> CriterionAssessment {
    let received = evidence.len();
    let mut accepted: Vec<Evidence> = evidence
        .into_iter()
        .filter(|e| e.confidence() >= policy.min_confidence)
        .collect();

    let discarded = received - accepted.len();
    if discarded > 0 {
        tracing::debug!(
            %criterion,
            discarded,
            threshold = policy.min_confidence,
            "discarded sub-threshold evidence"
        );
    }

    // Stable: equal confidences keep the order they arrived in.
    accepted.sort_by(|a, b| b.confidence().total_cmp(&a.confidence()));

    let stats = evidence_stats(&accepted);
    let strength = classify(&stats, policy);
    let description = text::criterion_description(criterion, strength, stats.accepted);

    tracing::debug!(
        %criterion,
        accepted = stats.accepted,
        avg_confidence = stats.avg_confidence,
        %strength,
        "scored criterion"
    );

    accepted.truncate(policy.max_evidence_shown);
    CriterionAssessment::new(criterion, accepted, description, strength)
}

/// Summarize already-accepted evidence.
///
/// The mean is summed in the given order; callers pass evidence sorted by
/// confidence so that the result does not depend on the input order.
pub fn evidence_stats(accepted: &[Evidence]) -> EvidenceStats {
    let n = accepted.len();
    let avg_confidence = if n == 0 {
        0.0
    } else {
        accepted.iter().map(Evidence::confidence).sum::<f64>() / n as f64
    };
    EvidenceStats {
        accepted: n,
        avg_confidence,
    }
}

/// Map evidence statistics to a strength.
pub fn classify(stats: &EvidenceStats, policy: &ScoringPolicy) -> Strength {
    let n = stats.accepted;
    let avg = stats.avg_confidence;

    if (n >= policy.high_confident_count && avg >= policy.high_confidence) || n >= policy.high_count
    {
        Strength::High
    } else if (n >= 1 && avg >= policy.medium_confidence) || n >= policy.medium_count {
        Strength::Medium
    } else {
        Strength::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(text: &str, confidence: f64) -> Evidence {
        Evidence::new(text, confidence, Some("achievements")).unwrap()
    }

    fn stats(accepted: usize, avg_confidence: f64) -> EvidenceStats {
        EvidenceStats {
            accepted,
            avg_confidence,
        }
    }

    #[test]
    fn empty_input_is_low() {
        let a = score(Criterion::Judging, vec![], &ScoringPolicy::default());
        assert_eq!(a.strength(), Strength::Low);
        assert!(a.evidence().is_empty());
        assert_eq!(a.description(), "No significant evidence found for Judging.");
    }

    #[test]
    fn single_confident_item_is_medium() {
        let a = score(
            Criterion::Awards,
            vec![ev("Turing Award finalist", 0.85)],
            &ScoringPolicy::default(),
        );
        assert_eq!(a.strength(), Strength::Medium);
        assert_eq!(a.description(), "Some evidence of Awards. Found 1 example.");
    }

    #[test]
    fn three_accepted_items_are_high() {
        let a = score(
            Criterion::Press,
            vec![ev("a", 0.9), ev("b", 0.8), ev("c", 0.55)],
            &ScoringPolicy::default(),
        );
        assert_eq!(a.strength(), Strength::High);
        assert_eq!(
            a.description(),
            "Strong evidence of Press. Found 3 compelling examples."
        );
    }

    #[test]
    fn sub_threshold_evidence_is_invisible() {
        let policy = ScoringPolicy::default();
        let with_noise = score(
            Criterion::Membership,
            vec![ev("noise 1", 0.49), ev("real", 0.7), ev("noise 2", 0.1)],
            &policy,
        );
        let without_noise = score(Criterion::Membership, vec![ev("real", 0.7)], &policy);

        assert_eq!(with_noise, without_noise);
        assert_eq!(with_noise.evidence().len(), 1);
        assert_eq!(with_noise.evidence()[0].text(), "real");
    }

    #[test]
    fn single_weak_accepted_item_is_low_but_shown() {
        let a = score(
            Criterion::Judging,
            vec![ev("reviewed papers", 0.55)],
            &ScoringPolicy::default(),
        );
        assert_eq!(a.strength(), Strength::Low);
        assert_eq!(a.evidence().len(), 1);
    }

    #[test]
    fn classification_bands() {
        let p = ScoringPolicy::default();
        assert_eq!(classify(&stats(0, 0.0), &p), Strength::Low);
        assert_eq!(classify(&stats(1, 0.59), &p), Strength::Low);
        assert_eq!(classify(&stats(1, 0.6), &p), Strength::Medium);
        assert_eq!(classify(&stats(1, 1.0), &p), Strength::Medium);
        assert_eq!(classify(&stats(2, 0.5), &p), Strength::Medium);
        assert_eq!(classify(&stats(2, 0.74), &p), Strength::Medium);
        assert_eq!(classify(&stats(2, 0.75), &p), Strength::High);
        assert_eq!(classify(&stats(3, 0.5), &p), Strength::High);
    }

    #[test]
    fn keeps_top_five_by_confidence() {
        let evidence = vec![
            ev("e1", 0.6),
            ev("e2", 0.9),
            ev("e3", 0.7),
            ev("e4", 0.95),
            ev("e5", 0.8),
            ev("e6", 0.65),
            ev("e7", 0.3),
        ];
        let a = score(
            Criterion::ScholarlyArticles,
            evidence,
            &ScoringPolicy::default(),
        );
        let shown: Vec<&str> = a.evidence().iter().map(|e| e.text()).collect();
        assert_eq!(shown, vec!["e4", "e2", "e5", "e3", "e6"]);
        // All six accepted items count, not just the five shown.
        assert!(a.description().contains("Found 6 compelling examples"));
    }

    #[test]
    fn ties_keep_received_order() {
        let a = score(
            Criterion::Press,
            vec![ev("first", 0.8), ev("top", 0.9), ev("second", 0.8)],
            &ScoringPolicy::default(),
        );
        let shown: Vec<&str> = a.evidence().iter().map(|e| e.text()).collect();
        assert_eq!(shown, vec!["top", "first", "second"]);
    }

    #[test]
    fn custom_policy_changes_verdict() {
        let strict = ScoringPolicy {
            high_confident_count: 4,
            high_count: 5,
            max_evidence_shown: 2,
            ..Default::default()
        };
        let a = score(
            Criterion::Press,
            vec![ev("a", 0.6), ev("b", 0.6), ev("c", 0.6)],
            &strict,
        );
        assert_eq!(a.strength(), Strength::Medium);
        assert_eq!(a.evidence().len(), 2);
    }
}
