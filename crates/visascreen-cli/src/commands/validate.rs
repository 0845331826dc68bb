//! The `visascreen validate` command.

use std::path::PathBuf;

use anyhow::Result;

use visascreen_core::config::load_config_from;
use visascreen_core::parser;

pub fn execute(evidence_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let files = if evidence_path.is_dir() {
        parser::load_evidence_directory(&evidence_path)?
    } else {
        let records = parser::parse_evidence_file(&evidence_path)?;
        vec![(evidence_path.clone(), records)]
    };

    let mut total_warnings = 0;

    for (path, records) in &files {
        let record_count: usize = records.values().map(Vec::len).sum();
        println!(
            "Evidence file: {} ({record_count} records, {} criteria)",
            path.display(),
            records.len()
        );

        let warnings = parser::validate_evidence(records, &config.policy);
        for w in &warnings {
            let prefix = w
                .criterion
                .map(|c| format!("  [{c}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All evidence files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
