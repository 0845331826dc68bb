//! Evidence model, criterion scoring and assessment aggregation for O-1A screening.
//!
//! This crate turns per-criterion evidence candidates extracted from a CV into
//! a strength verdict per O-1A criterion and an overall qualification estimate.
//! Everything here is deterministic: the same evidence always yields the same
//! assessment.

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod policy;
pub mod report;
pub mod scorer;
pub mod text;
pub mod traits;

pub use engine::{assess, ScreeningEngine};
pub use error::AssessmentError;
pub use model::{
    Criterion, CriterionAssessment, Evidence, EvidenceByCriterion, EvidenceRecord,
    OverallAssessment, Strength,
};
pub use policy::ScoringPolicy;
