//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::policy::ScoringPolicy;

/// Top-level visascreen configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisascreenConfig {
    /// Scoring thresholds.
    #[serde(default)]
    pub policy: ScoringPolicy,
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./visascreen-results")
}

impl Default for VisascreenConfig {
    fn default() -> Self {
        Self {
            policy: ScoringPolicy::default(),
            output_dir: default_output_dir(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `visascreen.toml` in the current directory
/// 2. `~/.config/visascreen/config.toml`
///
/// Environment variable overrides: `VISASCREEN_MIN_CONFIDENCE`, `VISASCREEN_MAX_EVIDENCE`.
pub fn load_config_from(path: Option<&Path>) -> Result<VisascreenConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("visascreen.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => VisascreenConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    config.policy.validate()?;

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config_str(content: &str) -> Result<VisascreenConfig> {
    Ok(toml::from_str::<VisascreenConfig>(content)?)
}

fn apply_env_overrides(config: &mut VisascreenConfig) -> Result<()> {
    if let Ok(value) = std::env::var("VISASCREEN_MIN_CONFIDENCE") {
        config.policy.min_confidence = value
            .trim()
            .parse()
            .with_context(|| format!("invalid VISASCREEN_MIN_CONFIDENCE: '{value}'"))?;
    }
    if let Ok(value) = std::env::var("VISASCREEN_MAX_EVIDENCE") {
        config.policy.max_evidence_shown = value
            .trim()
            .parse()
            .with_context(|| format!("invalid VISASCREEN_MAX_EVIDENCE: '{value}'"))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("visascreen"))
}
