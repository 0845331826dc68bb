//! Core data model types for visascreen.
//!
//! These are the value types that flow through the scoring core: evidence
//! snippets, the eight O-1A criteria, and the per-criterion and overall
//! assessments built from them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;

/// One of the eight fixed O-1A qualification criteria.
///
/// The declaration order is the enumeration order used everywhere output is
/// ordered (report keys, recommendation lists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Awards,
    Membership,
    Press,
    Judging,
    OriginalContribution,
    ScholarlyArticles,
    CriticalEmployment,
    HighRemuneration,
}

impl Criterion {
    /// All criteria in enumeration order.
    pub const ALL: [Criterion; 8] = [
        Criterion::Awards,
        Criterion::Membership,
        Criterion::Press,
        Criterion::Judging,
        Criterion::OriginalContribution,
        Criterion::ScholarlyArticles,
        Criterion::CriticalEmployment,
        Criterion::HighRemuneration,
    ];

    /// Wire identifier (e.g. "original_contribution").
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Awards => "awards",
            Criterion::Membership => "membership",
            Criterion::Press => "press",
            Criterion::Judging => "judging",
            Criterion::OriginalContribution => "original_contribution",
            Criterion::ScholarlyArticles => "scholarly_articles",
            Criterion::CriticalEmployment => "critical_employment",
            Criterion::HighRemuneration => "high_remuneration",
        }
    }

    /// Human-readable label used in generated text (e.g. "Original Contribution").
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Awards => "Awards",
            Criterion::Membership => "Membership",
            Criterion::Press => "Press",
            Criterion::Judging => "Judging",
            Criterion::OriginalContribution => "Original Contribution",
            Criterion::ScholarlyArticles => "Scholarly Articles",
            Criterion::CriticalEmployment => "Critical Employment",
            Criterion::HighRemuneration => "High Remuneration",
        }
    }

    /// Statutory description of the criterion.
    pub fn description(&self) -> &'static str {
        match self {
            Criterion::Awards => "Receipt of nationally or internationally recognized prizes or awards for excellence in the field of endeavor.",
            Criterion::Membership => "Membership in associations in the field which require outstanding achievements of their members, as judged by recognized national or international experts.",
            Criterion::Press => "Published material about the person in professional or major trade publications or other major media, relating to the person's work in the field.",
            Criterion::Judging => "Participation, either individually or on a panel, as a judge of the work of others in the same or an allied field of specialization.",
            Criterion::OriginalContribution => "Original scientific, scholarly, artistic, or business-related contributions of major significance in the field.",
            Criterion::ScholarlyArticles => "Authorship of scholarly articles in the field, in professional or major trade publications or other major media.",
            Criterion::CriticalEmployment => "Employment in a critical or essential capacity at an organization with a distinguished reputation.",
            Criterion::HighRemuneration => "Command of a high salary or other significantly high remuneration for services, in relation to others in the field.",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Criterion::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("unknown criterion: {s}"))
    }
}

/// Qualitative verdict on how well something is supported.
///
/// Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Low,
    Medium,
    High,
}

impl Strength {
    /// A criterion counts toward the "at least 3" guideline at medium or high.
    pub fn is_qualifying(&self) -> bool {
        matches!(self, Strength::Medium | Strength::High)
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Low => write!(f, "low"),
            Strength::Medium => write!(f, "medium"),
            Strength::High => write!(f, "high"),
        }
    }
}

/// Raw evidence record as handed over by an extraction collaborator.
///
/// Nothing is validated here; convert with [`Evidence::try_from`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    pub text: String,
    pub confidence: f64,
    #[serde(default)]
    pub source_section: Option<String>,
}

/// A validated CV snippet claimed to support a criterion.
///
/// Text is never empty and confidence is always within `[0.0, 1.0]`:
/// out-of-range confidences are clamped on construction, NaN becomes 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EvidenceRecord")]
pub struct Evidence {
    text: String,
    confidence: f64,
    source_section: Option<String>,
}

impl Evidence {
    pub fn new(
        text: impl Into<String>,
        confidence: f64,
        source_section: Option<&str>,
    ) -> Result<Self, AssessmentError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AssessmentError::InvalidEvidence {
                reason: "text is empty".into(),
            });
        }

        let source_section = source_section
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            text: trimmed.to_string(),
            confidence: clamp_confidence(confidence),
            source_section,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// CV section the snippet came from, `None` when unknown.
    pub fn source_section(&self) -> Option<&str> {
        self.source_section.as_deref()
    }
}

impl TryFrom<EvidenceRecord> for Evidence {
    type Error = AssessmentError;

    fn try_from(record: EvidenceRecord) -> Result<Self, Self::Error> {
        Evidence::new(
            record.text,
            record.confidence,
            record.source_section.as_deref(),
        )
    }
}

impl From<Evidence> for EvidenceRecord {
    fn from(evidence: Evidence) -> Self {
        EvidenceRecord {
            text: evidence.text,
            confidence: evidence.confidence,
            source_section: evidence.source_section,
        }
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

/// Evidence candidates keyed by criterion. Absent keys mean "no candidates".
pub type EvidenceByCriterion = BTreeMap<Criterion, Vec<Evidence>>;

/// Verdict for a single criterion.
///
/// Only built by the scorer, so `strength` always follows from the accepted
/// evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionAssessment {
    criterion: Criterion,
    /// Accepted evidence, highest confidence first, capped for display.
    evidence: Vec<Evidence>,
    description: String,
    strength: Strength,
}

impl CriterionAssessment {
    pub(crate) fn new(
        criterion: Criterion,
        evidence: Vec<Evidence>,
        description: String,
        strength: Strength,
    ) -> Self {
        Self {
            criterion,
            evidence,
            description,
            strength,
        }
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }
}

/// Complete O-1A assessment across all eight criteria.
///
/// Deserializing rejects documents that do not carry an entry for every
/// criterion under its own key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OverallAssessmentRecord")]
pub struct OverallAssessment {
    criteria_assessments: BTreeMap<Criterion, CriterionAssessment>,
    overall_rating: Strength,
    summary: String,
    recommendation: String,
}

/// Unchecked wire form of [`OverallAssessment`].
#[derive(Deserialize)]
struct OverallAssessmentRecord {
    criteria_assessments: BTreeMap<Criterion, CriterionAssessment>,
    overall_rating: Strength,
    summary: String,
    recommendation: String,
}

impl TryFrom<OverallAssessmentRecord> for OverallAssessment {
    type Error = AssessmentError;

    fn try_from(record: OverallAssessmentRecord) -> Result<Self, Self::Error> {
        let missing: Vec<Criterion> = Criterion::ALL
            .into_iter()
            .filter(|c| {
                record
                    .criteria_assessments
                    .get(c)
                    .map_or(true, |a| a.criterion != *c)
            })
            .collect();
        if !missing.is_empty() {
            return Err(AssessmentError::IncompleteCriteria { missing });
        }

        Ok(Self::new(
            record.criteria_assessments,
            record.overall_rating,
            record.summary,
            record.recommendation,
        ))
    }
}

impl OverallAssessment {
    pub(crate) fn new(
        criteria_assessments: BTreeMap<Criterion, CriterionAssessment>,
        overall_rating: Strength,
        summary: String,
        recommendation: String,
    ) -> Self {
        Self {
            criteria_assessments,
            overall_rating,
            summary,
            recommendation,
        }
    }

    pub fn criteria_assessments(&self) -> &BTreeMap<Criterion, CriterionAssessment> {
        &self.criteria_assessments
    }

    pub fn get(&self, criterion: Criterion) -> Option<&CriterionAssessment> {
        self.criteria_assessments.get(&criterion)
    }

    pub fn overall_rating(&self) -> Strength {
        self.overall_rating
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    /// Number of criteria at medium or high strength.
    pub fn qualifying_count(&self) -> usize {
        self.criteria_assessments
            .values()
            .filter(|a| a.strength.is_qualifying())
            .count()
    }

    /// Number of criteria at high strength.
    pub fn strong_count(&self) -> usize {
        self.criteria_with(Strength::High).len()
    }

    /// Criteria at exactly `strength`, in enumeration order.
    pub fn criteria_with(&self, strength: Strength) -> Vec<Criterion> {
        self.criteria_assessments
            .values()
            .filter(|a| a.strength == strength)
            .map(|a| a.criterion)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criterion_display_and_parse() {
        assert_eq!(Criterion::OriginalContribution.to_string(), "original_contribution");
        assert_eq!("awards".parse::<Criterion>().unwrap(), Criterion::Awards);
        assert_eq!(
            "High Remuneration".parse::<Criterion>().unwrap(),
            Criterion::HighRemuneration
        );
        assert_eq!(
            "scholarly-articles".parse::<Criterion>().unwrap(),
            Criterion::ScholarlyArticles
        );
        assert!("patents".parse::<Criterion>().is_err());
    }

    #[test]
    fn criterion_order_matches_all() {
        let mut sorted = Criterion::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Criterion::ALL.to_vec());
    }

    #[test]
    fn strength_ordering() {
        assert!(Strength::Low < Strength::Medium);
        assert!(Strength::Medium < Strength::High);
        assert!(!Strength::Low.is_qualifying());
        assert!(Strength::Medium.is_qualifying());
        assert!(Strength::High.is_qualifying());
    }

    #[test]
    fn evidence_rejects_empty_text() {
        assert!(Evidence::new("", 0.9, None).is_err());
        assert!(Evidence::new("   \n", 0.9, None).is_err());
    }

    #[test]
    fn evidence_clamps_confidence() {
        assert_eq!(Evidence::new("a", 1.7, None).unwrap().confidence(), 1.0);
        assert_eq!(Evidence::new("a", -0.2, None).unwrap().confidence(), 0.0);
        assert_eq!(Evidence::new("a", f64::NAN, None).unwrap().confidence(), 0.0);
        assert_eq!(Evidence::new("a", 0.42, None).unwrap().confidence(), 0.42);
    }

    #[test]
    fn evidence_normalizes_section() {
        let e = Evidence::new("  Best Paper Award  ", 0.8, Some(" ")).unwrap();
        assert_eq!(e.text(), "Best Paper Award");
        assert_eq!(e.source_section(), None);

        let e = Evidence::new("Best Paper Award", 0.8, Some("awards")).unwrap();
        assert_eq!(e.source_section(), Some("awards"));
    }

    #[test]
    fn evidence_deserialize_validates() {
        let ok: Evidence = serde_json::from_str(
            r#"{"text": "Keynote speaker", "confidence": 1.4, "source_section": "awards"}"#,
        )
        .unwrap();
        assert_eq!(ok.confidence(), 1.0);

        let bad = serde_json::from_str::<Evidence>(r#"{"text": "", "confidence": 0.9}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn evidence_serializes_wire_shape() {
        let e = Evidence::new("Fellow of the IEEE", 0.85, None).unwrap();
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "Fellow of the IEEE",
                "confidence": 0.85,
                "source_section": null
            })
        );
    }

    #[test]
    fn assessment_deserialize_requires_every_criterion() {
        let assessment = crate::engine::assess(
            &EvidenceByCriterion::new(),
            &crate::policy::ScoringPolicy::default(),
        )
        .unwrap();
        let mut json = serde_json::to_value(&assessment).unwrap();

        let roundtrip: OverallAssessment = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(roundtrip, assessment);

        json["criteria_assessments"]
            .as_object_mut()
            .unwrap()
            .remove("press");
        let err = serde_json::from_value::<OverallAssessment>(json).unwrap_err();
        assert!(err.to_string().contains("missing press"));
    }

    #[test]
    fn assessment_deserialize_rejects_mislabelled_entry() {
        let assessment = crate::engine::assess(
            &EvidenceByCriterion::new(),
            &crate::policy::ScoringPolicy::default(),
        )
        .unwrap();
        let mut json = serde_json::to_value(&assessment).unwrap();
        json["criteria_assessments"]["judging"]["criterion"] = "awards".into();

        let err = serde_json::from_value::<OverallAssessment>(json).unwrap_err();
        assert!(err.to_string().contains("missing judging"));
    }
}
