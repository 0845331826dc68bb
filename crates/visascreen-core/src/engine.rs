//! Assessment pipeline.
//!
//! Scores all eight criteria in enumeration order and aggregates the result.
//! [`assess`] is the pure entry point; [`ScreeningEngine`] adds a
//! scoring policy and the ability to pull evidence from an [`EvidenceSource`].

use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};

use crate::aggregate::aggregate;
use crate::error::AssessmentError;
use crate::model::{Criterion, Evidence, EvidenceByCriterion, EvidenceRecord, OverallAssessment};
use crate::policy::ScoringPolicy;
use crate::scorer::score;
use crate::traits::EvidenceSource;

/// Run the pipeline with the given policy.
///
/// Criteria missing from `evidence_by_criterion` are scored with no evidence,
/// so the aggregator always sees all eight keys.
pub fn assess(
    evidence_by_criterion: &EvidenceByCriterion,
    policy: &ScoringPolicy,
) -> Result<OverallAssessment, AssessmentError> {
    let assessments = Criterion::ALL
        .into_iter()
        .map(|criterion| {
            let evidence = evidence_by_criterion
                .get(&criterion)
                .cloned()
                .unwrap_or_default();
            (criterion, score(criterion, evidence, policy))
        })
        .collect::<BTreeMap<_, _>>();

    aggregate(assessments, policy)
}

/// Convert raw records into evidence, dropping the ones that fail validation.
///
/// One malformed record never fails the whole assessment; each rejection is
/// logged and reported back to the caller.
pub fn accept_records(
    records: BTreeMap<Criterion, Vec<EvidenceRecord>>,
) -> (EvidenceByCriterion, Vec<(Criterion, AssessmentError)>) {
    let mut evidence = EvidenceByCriterion::new();
    let mut rejected = Vec::new();

    for (criterion, list) in records {
        let entry = evidence.entry(criterion).or_default();
        for record in list {
            match Evidence::try_from(record) {
                Ok(e) => entry.push(e),
                Err(err) => {
                    tracing::warn!(%criterion, "rejected evidence record: {err}");
                    rejected.push((criterion, err));
                }
            }
        }
    }

    (evidence, rejected)
}

/// Scoring pipeline bound to a policy.
#[derive(Debug, Clone, Default)]
pub struct ScreeningEngine {
    policy: ScoringPolicy,
}

impl ScreeningEngine {
    /// Create an engine, rejecting an invalid policy up front.
    pub fn new(policy: ScoringPolicy) -> Result<Self, AssessmentError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Assess evidence that has already been gathered.
    pub fn assess(
        &self,
        evidence_by_criterion: &EvidenceByCriterion,
    ) -> Result<OverallAssessment, AssessmentError> {
        assess(evidence_by_criterion, &self.policy)
    }

    /// Gather evidence for all eight criteria from `source` and assess it.
    ///
    /// Extraction runs concurrently per criterion; results are reassembled in
    /// enumeration order before scoring, so the outcome does not depend on
    /// completion order. An extraction error fails the run.
    pub async fn run(&self, source: &dyn EvidenceSource) -> Result<OverallAssessment> {
        let start = Instant::now();

        let mut futures = Criterion::ALL
            .into_iter()
            .map(|criterion| async move { (criterion, source.extract(criterion).await) })
            .collect::<FuturesUnordered<_>>();

        let mut evidence = EvidenceByCriterion::new();
        while let Some((criterion, result)) = futures.next().await {
            let found = result.with_context(|| {
                format!(
                    "evidence source '{}' failed for criterion {criterion}",
                    source.name()
                )
            })?;
            tracing::debug!(%criterion, candidates = found.len(), "extracted evidence");
            evidence.insert(criterion, found);
        }

        let assessment = self.assess(&evidence)?;
        tracing::debug!(
            source = source.name(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "screening complete"
        );
        Ok(assessment)
    }
}
