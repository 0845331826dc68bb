//! Fixed evidence source.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use visascreen_core::model::{Criterion, Evidence, EvidenceByCriterion};
use visascreen_core::traits::EvidenceSource;

/// An evidence source that hands back a pre-built evidence map.
///
/// Used when evidence was extracted elsewhere and loaded from a file, and as
/// a test double for the screening engine.
pub struct StaticSource {
    name: String,
    evidence: EvidenceByCriterion,
    call_count: AtomicU32,
}

impl StaticSource {
    pub fn new(evidence: EvidenceByCriterion) -> Self {
        Self::named("static", evidence)
    }

    pub fn named(name: impl Into<String>, evidence: EvidenceByCriterion) -> Self {
        Self {
            name: name.into(),
            evidence,
            call_count: AtomicU32::new(0),
        }
    }

    /// Get the number of `extract` calls made to this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EvidenceSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn extract(&self, criterion: Criterion) -> anyhow::Result<Vec<Evidence>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.evidence.get(&criterion).cloned().unwrap_or_default())
    }
}
