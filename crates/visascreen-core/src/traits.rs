//! Core trait definitions for evidence extraction collaborators.
//!
//! The scoring core never looks at a CV itself. Anything that can produce
//! evidence candidates for a criterion implements [`EvidenceSource`]; the
//! `visascreen-extract` crate provides a keyword matcher and a fixture source.

use async_trait::async_trait;

use crate::model::{Criterion, Evidence};

/// Trait for collaborators that produce evidence candidates for a criterion.
#[async_trait]
pub trait EvidenceSource: Send + Sync {
    /// Human-readable source name (e.g. "keyword").
    fn name(&self) -> &str;

    /// Evidence candidates for one criterion, in any order.
    ///
    /// Candidates do not need to be filtered or sorted; the scorer does both.
    /// Near-duplicate snippets should already be merged.
    async fn extract(&self, criterion: Criterion) -> anyhow::Result<Vec<Evidence>>;
}
