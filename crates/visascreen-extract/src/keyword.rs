//! Deterministic keyword-based evidence extraction from plain-text CVs.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;

use visascreen_core::model::{Criterion, Evidence};
use visascreen_core::traits::EvidenceSource;

use crate::sections::{split_sections, Section};
use crate::vocabulary::{keyword_hits, section_criteria};

const BASE_CONFIDENCE: f64 = 0.5;
const PER_KEYWORD: f64 = 0.1;
const MAX_KEYWORD_BONUS: f64 = 0.4;
const SECTION_BOOST: f64 = 1.2;

/// Extracts evidence candidates by matching per-criterion keywords
/// against the sentences of a CV.
pub struct KeywordExtractor {
    sections: Vec<Section>,
}

impl KeywordExtractor {
    pub fn new(text: &str) -> Self {
        let sections = split_sections(text);
        tracing::debug!(sections = sections.len(), "segmented CV text");
        Self { sections }
    }

    /// Read a plain-text CV from disk.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read CV {}", path.display()))?;
        Ok(Self::new(&text))
    }

    /// Sections recognized in the CV, in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All candidate snippets for one criterion, in document order.
    pub fn candidates(&self, criterion: Criterion) -> Vec<Evidence> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for section in &self.sections {
            let boosted = section_criteria(&section.name).contains(&criterion);
            for sentence in section.lines.iter().flat_map(|l| split_sentences(l)) {
                let hits = keyword_hits(criterion, sentence);
                if hits == 0 || !seen.insert(sentence) {
                    continue;
                }
                let confidence = keyword_confidence(hits, boosted);
                let section_name = Some(section.name.as_str());
                if let Ok(evidence) = Evidence::new(sentence, confidence, section_name) {
                    found.push(evidence);
                }
            }
        }

        found
    }
}

#[async_trait]
impl EvidenceSource for KeywordExtractor {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn extract(&self, criterion: Criterion) -> anyhow::Result<Vec<Evidence>> {
        let found = self.candidates(criterion);
        tracing::debug!(criterion = %criterion, candidates = found.len(), "keyword extraction");
        Ok(found)
    }
}

/// Confidence for a sentence with `hits` distinct keyword matches.
pub fn keyword_confidence(hits: usize, section_boost: bool) -> f64 {
    let mut confidence = BASE_CONFIDENCE + (hits as f64 * PER_KEYWORD).min(MAX_KEYWORD_BONUS);
    if section_boost {
        confidence *= SECTION_BOOST;
    }
    (confidence.min(1.0) * 100.0).round() / 100.0
}

/// Split a CV line into sentences, dropping list markers.
fn split_sentences(line: &str) -> Vec<&str> {
    let line = strip_bullet(line);
    let mut sentences = Vec::new();
    let mut start = 0;

    let mut chars = line.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(next, n)) = chars.peek() {
                if n.is_whitespace() {
                    sentences.push(&line[start..=i]);
                    start = next;
                }
            }
        }
    }
    sentences.push(&line[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| s.chars().any(char::is_alphabetic))
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim_start_matches(['-', '*', '•', '·', '–', '>']).trim_start();
    // "1. " or "2) "
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &trimmed[digits..];
        if let Some(rest) = rest.strip_prefix(['.', ')']) {
            if rest.starts_with(' ') {
                return rest.trim_start();
            }
        }
    }
    trimmed
}
