//! The `visascreen compare` command.

use std::path::PathBuf;

use anyhow::Result;

use visascreen_core::report::ScreeningReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = ScreeningReport::load_json(&baseline_path)?;
    let current = ScreeningReport::load_json(&current_path)?;

    let report = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "Overall: {} -> {} ({} -> {} qualifying criteria)",
                report.baseline_rating,
                report.current_rating,
                report.baseline_qualifying,
                report.current_qualifying
            );
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    println!("  {}: {} -> {}", r.criterion.label(), r.baseline, r.current);
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!("  {}: {} -> {}", i.criterion.label(), i.baseline, i.current);
                }
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
