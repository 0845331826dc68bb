//! The `visascreen assess` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use visascreen_core::config::load_config_from;
use visascreen_core::parser::load_evidence_file;
use visascreen_core::report::ScreeningReport;
use visascreen_core::traits::EvidenceSource;
use visascreen_core::ScreeningEngine;
use visascreen_extract::{KeywordExtractor, StaticSource};
use visascreen_report::html::{generate_html, write_html_report};

const FORMATS: [&str; 3] = ["json", "markdown", "html"];

pub async fn execute(
    evidence_path: Option<PathBuf>,
    cv_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: String,
    to_stdout: bool,
) -> Result<()> {
    let formats: Vec<&str> = if format == "all" {
        FORMATS.to_vec()
    } else {
        format.split(',').map(str::trim).collect()
    };
    if let Some(unknown) = formats.iter().find(|f| !FORMATS.contains(*f)) {
        anyhow::bail!("unknown format '{unknown}' (expected json, markdown, html or all)");
    }
    anyhow::ensure!(
        !to_stdout || formats.len() == 1,
        "--stdout needs exactly one format"
    );

    let config = load_config_from(config_path.as_deref())?;
    let engine = ScreeningEngine::new(config.policy.clone())?;

    let (input, source) = open_source(evidence_path.as_deref(), cv_path.as_deref())?;
    eprintln!("visascreen v{} - assessing {input}", env!("CARGO_PKG_VERSION"));

    let assessment = engine.run(source.as_ref()).await?;
    let report = ScreeningReport::new(input, assessment);

    print_summary(&report);

    if to_stdout {
        let rendered = match formats[0] {
            "markdown" => report.assessment.to_markdown(),
            "html" => generate_html(&report),
            _ => serde_json::to_string_pretty(&report)?,
        };
        println!("{rendered}");
        return Ok(());
    }

    let output = output.unwrap_or(config.output_dir);
    std::fs::create_dir_all(&output)?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("assessment-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "markdown" => {
                let path = output.join(format!("assessment-{timestamp}.md"));
                std::fs::write(&path, report.assessment.to_markdown())?;
                eprintln!("Markdown report: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("assessment-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {}
        }
    }

    Ok(())
}

/// Build the evidence source for the run and a label naming the input.
fn open_source(
    evidence_path: Option<&Path>,
    cv_path: Option<&Path>,
) -> Result<(String, Box<dyn EvidenceSource>)> {
    match (evidence_path, cv_path) {
        (Some(path), _) => {
            let loaded = load_evidence_file(path)?;
            for w in &loaded.warnings {
                let criterion = w.criterion.map(|c| c.to_string()).unwrap_or_default();
                tracing::warn!(%criterion, "{}", w.message);
            }
            let label = path.display().to_string();
            let source: Box<dyn EvidenceSource> =
                Box::new(StaticSource::named(label.clone(), loaded.evidence));
            Ok((label, source))
        }
        (None, Some(path)) => {
            let extractor: Box<dyn EvidenceSource> = Box::new(KeywordExtractor::from_file(path)?);
            Ok((path.display().to_string(), extractor))
        }
        (None, None) => anyhow::bail!("either --evidence or --cv is required"),
    }
}

fn print_summary(report: &ScreeningReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Criterion", "Strength", "Evidence", "Top confidence"]);

    for a in report.assessment.criteria_assessments().values() {
        let top = a
            .evidence()
            .first()
            .map(|e| format!("{:.2}", e.confidence()))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(a.criterion().label()),
            Cell::new(a.strength()),
            Cell::new(a.evidence().len()),
            Cell::new(top),
        ]);
    }

    eprintln!("\n{table}");
    eprintln!(
        "Overall rating: {} ({} qualifying, {} strong)",
        report.assessment.overall_rating(),
        report.assessment.qualifying_count(),
        report.assessment.strong_count()
    );
    eprintln!("{}\n", report.assessment.recommendation());
}
