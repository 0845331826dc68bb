//! Splitting plain-text CVs into titled sections.

use crate::vocabulary::{contains_phrase, SECTION_HEADERS};

/// Section name for content that appears before the first recognized header.
pub const UNKNOWN_SECTION: &str = "unknown";

/// A contiguous block of CV lines under one header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Lowercase header name, or [`UNKNOWN_SECTION`].
    pub name: String,
    /// Non-empty, trimmed content lines in document order.
    pub lines: Vec<String>,
}

/// Split CV text into sections by recognized header lines.
///
/// Sections are returned in document order. A header that appears twice
/// starts a second section with the same name. Sections without content
/// are omitted.
pub fn split_sections(text: &str) -> Vec<Section> {
    let mut sections = vec![Section {
        name: UNKNOWN_SECTION.to_string(),
        lines: Vec::new(),
    }];

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match detect_header(line) {
            Some((header, rest)) => {
                let mut lines = Vec::new();
                if let Some(rest) = rest {
                    lines.push(rest);
                }
                sections.push(Section {
                    name: header.to_string(),
                    lines,
                });
            }
            None => {
                if let Some(current) = sections.last_mut() {
                    current.lines.push(line.to_string());
                }
            }
        }
    }

    sections.retain(|s| !s.lines.is_empty());
    sections
}

/// Recognize a header line.
///
/// Returns the header name and, for the `Header: content` form, the inline
/// content after the colon.
fn detect_header(line: &str) -> Option<(&'static str, Option<String>)> {
    // "Awards: Best Paper 2021"
    if let Some((head, rest)) = line.split_once(':') {
        let head = head.trim().to_lowercase();
        if let Some(header) = SECTION_HEADERS.iter().find(|h| **h == head) {
            let rest = rest.trim();
            let inline = (!rest.is_empty()).then(|| rest.to_string());
            return Some((header, inline));
        }
    }

    // "== Work Experience ==", "**Awards**"
    let letters = normalize_letters(&line.to_lowercase());
    if let Some(header) = SECTION_HEADERS.iter().find(|h| **h == letters) {
        return Some((header, None));
    }

    // "AWARDS AND HONORS", "PROFESSIONAL EXPERIENCE"
    let shouting = line.chars().any(char::is_alphabetic) && !line.chars().any(char::is_lowercase);
    if shouting && letters.split_whitespace().count() <= 4 {
        return SECTION_HEADERS
            .iter()
            .find(|h| contains_phrase(&letters, h))
            .map(|h| (*h, None));
    }

    None
}

/// Keep only letters and single spaces.
fn normalize_letters(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphabetic() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
