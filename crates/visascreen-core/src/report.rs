//! Screening report types with JSON persistence and revision comparison.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Criterion, OverallAssessment, Strength};

/// A saved screening run.
///
/// The embedded assessment is deterministic; `id` and `created_at` only
/// identify the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// What was screened (file name or source label).
    pub input: String,
    /// The assessment itself.
    pub assessment: OverallAssessment,
}

impl ScreeningReport {
    pub fn new(input: impl Into<String>, assessment: OverallAssessment) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            input: input.into(),
            assessment,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ScreeningReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against a baseline, criterion by criterion.
    pub fn compare(&self, baseline: &ScreeningReport) -> RevisionReport {
        compare_assessments(&baseline.assessment, &self.assessment)
    }
}

/// Criterion-level changes between two assessments.
pub fn compare_assessments(baseline: &OverallAssessment, current: &OverallAssessment) -> RevisionReport {
    let mut regressions = Vec::new();
    let mut improvements = Vec::new();
    let mut unchanged = 0usize;

    for criterion in Criterion::ALL {
        let before = baseline
            .get(criterion)
            .map(|a| a.strength())
            .unwrap_or(Strength::Low);
        let after = current
            .get(criterion)
            .map(|a| a.strength())
            .unwrap_or(Strength::Low);

        let change = StrengthChange {
            criterion,
            baseline: before,
            current: after,
        };
        if after < before {
            regressions.push(change);
        } else if after > before {
            improvements.push(change);
        } else {
            unchanged += 1;
        }
    }

    RevisionReport {
        baseline_rating: baseline.overall_rating(),
        current_rating: current.overall_rating(),
        baseline_qualifying: baseline.qualifying_count(),
        current_qualifying: current.qualifying_count(),
        regressions,
        improvements,
        unchanged,
    }
}

/// Result of comparing two assessments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionReport {
    pub baseline_rating: Strength,
    pub current_rating: Strength,
    pub baseline_qualifying: usize,
    pub current_qualifying: usize,
    /// Criteria whose strength went down.
    pub regressions: Vec<StrengthChange>,
    /// Criteria whose strength went up.
    pub improvements: Vec<StrengthChange>,
    /// Criteria with the same strength.
    pub unchanged: usize,
}

/// A change in strength for one criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthChange {
    pub criterion: Criterion,
    pub baseline: Strength,
    pub current: Strength,
}

impl RevisionReport {
    /// Returns true if any criterion or the overall rating went down.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty() || self.current_rating < self.baseline_rating
    }

    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Overall:** {} -> {} ({} -> {} qualifying criteria)\n\n",
            self.baseline_rating,
            self.current_rating,
            self.baseline_qualifying,
            self.current_qualifying
        ));
        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        for (title, changes) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Criterion | Baseline | Current |\n");
            md.push_str("|-----------|----------|---------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    c.criterion.label(),
                    c.baseline,
                    c.current
                ));
            }
            md.push('\n');
        }

        md
    }
}

impl OverallAssessment {
    /// Format the assessment as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# O-1A Qualification Assessment\n\n");
        md.push_str(&format!("**Overall rating:** {}\n\n", self.overall_rating()));
        md.push_str(&format!("{}\n\n", self.summary()));
        md.push_str(&format!("**Recommendation:** {}\n\n", self.recommendation()));

        md.push_str("| Criterion | Strength | Evidence |\n");
        md.push_str("|-----------|----------|----------|\n");
        for a in self.criteria_assessments().values() {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                a.criterion().label(),
                a.strength(),
                a.evidence().len()
            ));
        }
        md.push('\n');

        for a in self.criteria_assessments().values() {
            md.push_str(&format!("## {}\n\n", a.criterion().label()));
            md.push_str(&format!("{}\n\n", a.description()));
            for e in a.evidence() {
                let section = e.source_section().unwrap_or("unknown");
                md.push_str(&format!(
                    "- ({:.2}, {}) {}\n",
                    e.confidence(),
                    section,
                    e.text().replace('\n', " ")
                ));
            }
            if !a.evidence().is_empty() {
                md.push('\n');
            }
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assess;
    use crate::model::{Evidence, EvidenceByCriterion};
    use crate::policy::ScoringPolicy;

    fn assessment(entries: &[(Criterion, Vec<f64>)]) -> OverallAssessment {
        let mut evidence = EvidenceByCriterion::new();
        for (criterion, confidences) in entries {
            let list = confidences
                .iter()
                .enumerate()
                .map(|(i, &c)| Evidence::new(format!("{criterion} item {i}"), c, None).unwrap())
                .collect::<Vec<_>>();
            evidence.insert(*criterion, list);
        }
        assess(&evidence, &ScoringPolicy::default()).unwrap()
    }

    #[test]
    fn compare_identical_assessments() {
        let a = assessment(&[(Criterion::Awards, vec![0.9, 0.9])]);
        let report = compare_assessments(&a, &a);
        assert!(!report.has_regressions());
        assert!(report.improvements.is_empty());
        assert_eq!(report.unchanged, 8);
    }

    #[test]
    fn compare_detects_changes() {
        let baseline = assessment(&[(Criterion::Awards, vec![0.9, 0.9]), (Criterion::Press, vec![0.7])]);
        let current = assessment(&[(Criterion::Awards, vec![0.7]), (Criterion::Judging, vec![0.7])]);

        let report = compare_assessments(&baseline, &current);
        assert!(report.has_regressions());
        assert_eq!(report.regressions.len(), 2);
        assert_eq!(report.regressions[0].criterion, Criterion::Awards);
        assert_eq!(report.regressions[0].current, Strength::Medium);
        assert_eq!(report.improvements.len(), 1);
        assert_eq!(report.improvements[0].criterion, Criterion::Judging);
        assert_eq!(report.unchanged, 5);

        let md = report.to_markdown();
        assert!(md.contains("### Regressions"));
        assert!(md.contains("| Awards | high | medium |"));
    }

    #[test]
    fn json_roundtrip() {
        let report = ScreeningReport::new(
            "cv.json",
            assessment(&[(Criterion::Press, vec![0.9, 0.8, 0.55])]),
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/report.json");

        report.save_json(&path).unwrap();
        let loaded = ScreeningReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.input, "cv.json");
        assert_eq!(loaded.assessment, report.assessment);
    }

    #[test]
    fn assessment_markdown() {
        let md = assessment(&[(Criterion::Awards, vec![0.85])]).to_markdown();
        assert!(md.contains("**Overall rating:** low"));
        assert!(md.contains("| Awards | medium | 1 |"));
        assert!(md.contains("- (0.85, unknown) awards item 0"));
    }

    #[test]
    fn load_json_rejects_report_missing_criteria() {
        let report = ScreeningReport::new("cv.json", assessment(&[(Criterion::Awards, vec![0.9])]));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edited.json");
        report.save_json(&path).unwrap();

        let mut json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        json["assessment"]["criteria_assessments"]
            .as_object_mut()
            .unwrap()
            .remove("high_remuneration");
        std::fs::write(&path, json.to_string()).unwrap();

        let err = ScreeningReport::load_json(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing high_remuneration"));
    }
}
