//! Evidence input file parser.
//!
//! Loads evidence-by-criterion maps from JSON or TOML files and directories,
//! and validates them.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::engine::accept_records;
use crate::model::{Criterion, EvidenceByCriterion, EvidenceRecord};
use crate::policy::ScoringPolicy;

/// Raw records keyed by criterion, before validation.
pub type EvidenceRecords = BTreeMap<Criterion, Vec<EvidenceRecord>>;

/// Supported evidence file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
}

impl InputFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "json" => Some(InputFormat::Json),
            "toml" => Some(InputFormat::Toml),
            _ => None,
        }
    }
}

/// Parse an evidence file into raw records.
pub fn parse_evidence_file(path: &Path) -> Result<EvidenceRecords> {
    let format = InputFormat::from_path(path).with_context(|| {
        format!(
            "unsupported evidence file (expected .json or .toml): {}",
            path.display()
        )
    })?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read evidence file: {}", path.display()))?;

    parse_evidence_str(&content, format, path)
}

/// Parse an evidence string (useful for testing).
///
/// Unknown criterion keys are an error naming the key.
pub fn parse_evidence_str(
    content: &str,
    format: InputFormat,
    source_path: &Path,
) -> Result<EvidenceRecords> {
    let raw: BTreeMap<String, Vec<EvidenceRecord>> = match format {
        InputFormat::Json => serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?,
        InputFormat::Toml => toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?,
    };

    let mut records = EvidenceRecords::new();
    for (key, list) in raw {
        let criterion: Criterion = key.parse().map_err(|e: String| {
            anyhow::anyhow!("{e} in {} (expected one of: {})", source_path.display(), known_keys())
        })?;
        records.entry(criterion).or_default().extend(list);
    }

    Ok(records)
}

fn known_keys() -> String {
    Criterion::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Evidence loaded from a file, plus the records that had to be dropped.
#[derive(Debug, Clone)]
pub struct LoadedEvidence {
    pub evidence: EvidenceByCriterion,
    pub warnings: Vec<ValidationWarning>,
}

/// Load an evidence file, dropping invalid records instead of failing.
pub fn load_evidence_file(path: &Path) -> Result<LoadedEvidence> {
    let records = parse_evidence_file(path)?;
    let (evidence, rejected) = accept_records(records);
    let warnings = rejected
        .into_iter()
        .map(|(criterion, err)| ValidationWarning {
            criterion: Some(criterion),
            message: format!("record rejected: {err}"),
        })
        .collect();

    Ok(LoadedEvidence { evidence, warnings })
}

/// Recursively load all evidence files from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_evidence_directory(dir: &Path) -> Result<Vec<(PathBuf, EvidenceRecords)>> {
    let mut files = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            files.extend(load_evidence_directory(&path)?);
        } else if InputFormat::from_path(&path).is_some() {
            match parse_evidence_file(&path) {
                Ok(records) => files.push((path, records)),
                Err(e) => {
                    tracing::warn!("skipping {}: {e:#}", path.display());
                }
            }
        }
    }

    Ok(files)
}

/// A warning from evidence validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// The criterion concerned (if applicable).
    pub criterion: Option<Criterion>,
    /// Warning message.
    pub message: String,
}

/// Validate raw evidence records for common issues.
pub fn validate_evidence(records: &EvidenceRecords, policy: &ScoringPolicy) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for criterion in Criterion::ALL {
        let list = records.get(&criterion).map(Vec::as_slice).unwrap_or_default();
        let warn = |message: String| ValidationWarning {
            criterion: Some(criterion),
            message,
        };

        if list.is_empty() {
            warnings.push(warn("no evidence candidates".into()));
            continue;
        }

        let mut seen = HashSet::new();
        for (i, record) in list.iter().enumerate() {
            let text = record.text.trim();
            if text.is_empty() {
                warnings.push(warn(format!("record {i}: text is empty and will be rejected")));
                continue;
            }
            if !(0.0..=1.0).contains(&record.confidence) {
                warnings.push(warn(format!(
                    "record {i}: confidence {} is outside [0, 1] and will be clamped",
                    record.confidence
                )));
            } else if record.confidence < policy.min_confidence {
                warnings.push(warn(format!(
                    "record {i}: confidence {} is below the acceptance threshold {} and will be ignored",
                    record.confidence, policy.min_confidence
                )));
            }
            if !seen.insert(text) {
                warnings.push(warn(format!("record {i}: duplicate snippet")));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_JSON: &str = r#"{
  "awards": [
    {"text": "Best Paper Award, NeurIPS 2021", "confidence": 0.85, "source_section": "awards"}
  ],
  "press": [
    {"text": "Profiled in Wired", "confidence": 0.9},
    {"text": "Interviewed by the BBC", "confidence": 0.8, "source_section": "press"}
  ]
}"#;

    const VALID_TOML: &str = r#"
[[awards]]
text = "Best Paper Award, NeurIPS 2021"
confidence = 0.85
source_section = "awards"

[[judging]]
text = "Reviewer for ICML"
confidence = 0.7
"#;

    #[test]
    fn parse_valid_json() {
        let records =
            parse_evidence_str(VALID_JSON, InputFormat::Json, Path::new("e.json")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[&Criterion::Press].len(), 2);
        assert_eq!(records[&Criterion::Press][0].source_section, None);
    }

    #[test]
    fn parse_valid_toml() {
        let records =
            parse_evidence_str(VALID_TOML, InputFormat::Toml, Path::new("e.toml")).unwrap();
        assert_eq!(records[&Criterion::Awards][0].confidence, 0.85);
        assert_eq!(records[&Criterion::Judging][0].text, "Reviewer for ICML");
    }

    #[test]
    fn unknown_criterion_is_an_error() {
        let err = parse_evidence_str(
            r#"{"patents": []}"#,
            InputFormat::Json,
            Path::new("e.json"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown criterion: patents"));
    }

    #[test]
    fn parse_malformed_json() {
        let result = parse_evidence_str("{not json", InputFormat::Json, Path::new("bad.json"));
        assert!(result.is_err());
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.JSON")), Some(InputFormat::Json));
        assert_eq!(InputFormat::from_path(Path::new("a.toml")), Some(InputFormat::Toml));
        assert_eq!(InputFormat::from_path(Path::new("a.txt")), None);
        assert_eq!(InputFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn load_file_drops_invalid_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evidence.json");
        std::fs::write(
            &path,
            r#"{"press": [{"text": "", "confidence": 0.9}, {"text": "Profiled in Wired", "confidence": 0.9}]}"#,
        )
        .unwrap();

        let loaded = load_evidence_file(&path).unwrap();
        assert_eq!(loaded.evidence[&Criterion::Press].len(), 1);
        assert_eq!(loaded.warnings.len(), 1);
        assert_eq!(loaded.warnings[0].criterion, Some(Criterion::Press));
    }

    #[test]
    fn validate_reports_issues() {
        let records = parse_evidence_str(
            r#"{
  "awards": [
    {"text": "Gold medal", "confidence": 1.3},
    {"text": "Gold medal", "confidence": 0.8},
    {"text": "Honorable mention", "confidence": 0.2},
    {"text": "  ", "confidence": 0.9}
  ]
}"#,
            InputFormat::Json,
            Path::new("e.json"),
        )
        .unwrap();

        let warnings = validate_evidence(&records, &ScoringPolicy::default());
        let awards: Vec<&str> = warnings
            .iter()
            .filter(|w| w.criterion == Some(Criterion::Awards))
            .map(|w| w.message.as_str())
            .collect();

        assert!(awards.iter().any(|m| m.contains("will be clamped")));
        assert!(awards.iter().any(|m| m.contains("duplicate snippet")));
        assert!(awards.iter().any(|m| m.contains("below the acceptance threshold")));
        assert!(awards.iter().any(|m| m.contains("text is empty")));

        let empty = warnings
            .iter()
            .filter(|w| w.message == "no evidence candidates")
            .count();
        assert_eq!(empty, 7);
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), VALID_JSON).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/b.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = load_evidence_directory(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
    }
}
