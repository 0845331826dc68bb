//! Evidence sources for visascreen.
//!
//! Implements the `EvidenceSource` trait for a deterministic keyword matcher
//! over plain-text CVs and for fixed evidence maps used in tests and when
//! evidence arrives pre-extracted.

pub mod fixture;
pub mod keyword;
pub mod sections;
pub mod vocabulary;

pub use fixture::StaticSource;
pub use keyword::KeywordExtractor;
