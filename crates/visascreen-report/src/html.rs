//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use visascreen_core::model::{CriterionAssessment, Strength};
use visascreen_core::report::ScreeningReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn badge(strength: Strength) -> String {
    format!("<span class=\"badge {strength}\">{strength}</span>")
}

/// Generate an HTML report from a screening report.
pub fn generate_html(report: &ScreeningReport) -> String {
    let assessment = &report.assessment;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>O-1A assessment: {}</title>\n",
        html_escape(&report.input)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>O-1A Qualification Assessment</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Input: <strong>{}</strong> | {} | report {}</p>\n",
        html_escape(&report.input),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.id
    ));
    html.push_str("</header>\n");

    // Verdict
    html.push_str("<section class=\"verdict\">\n");
    html.push_str(&format!(
        "<h2>Overall rating {}</h2>\n",
        badge(assessment.overall_rating())
    ));
    html.push_str(&format!("<p>{}</p>\n", html_escape(assessment.summary())));
    html.push_str(&format!(
        "<p class=\"recommendation\">{}</p>\n",
        html_escape(assessment.recommendation())
    ));

    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Criterion</th><th>Strength</th><th>Evidence shown</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for a in assessment.criteria_assessments().values() {
        html.push_str(&format!(
            "<tr><td><a href=\"#{}\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
            a.criterion().as_str(),
            html_escape(a.criterion().label()),
            badge(a.strength()),
            a.evidence().len()
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Per-criterion detail
    html.push_str("<section class=\"criteria\">\n");
    html.push_str("<h2>Criteria</h2>\n");
    for a in assessment.criteria_assessments().values() {
        html.push_str(&criterion_section(a));
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

fn criterion_section(a: &CriterionAssessment) -> String {
    let mut html = format!(
        "<article id=\"{}\">\n<h3>{} {}</h3>\n<p class=\"meta\">{}</p>\n<p>{}</p>\n",
        a.criterion().as_str(),
        html_escape(a.criterion().label()),
        badge(a.strength()),
        html_escape(a.criterion().description()),
        html_escape(a.description())
    );

    if a.evidence().is_empty() {
        html.push_str("</article>\n");
        return html;
    }

    html.push_str("<table class=\"evidence\">\n");
    html.push_str("<thead><tr><th>Confidence</th><th>Section</th><th>Evidence</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for e in a.evidence() {
        html.push_str(&format!(
            "<tr><td>{:.2}</td><td>{}</td><td>{}</td></tr>\n",
            e.confidence(),
            html_escape(e.source_section().unwrap_or("unknown")),
            html_escape(e.text())
        ));
    }
    html.push_str("</tbody></table>\n</article>\n");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &ScreeningReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --high: #dcfce7; --medium: #fef9c3; --low: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --high: #064e3b; --medium: #713f12; --low: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.recommendation { font-weight: 600; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.badge { display: inline-block; padding: 0.1rem 0.6rem; border-radius: 999px; font-size: 0.8rem; text-transform: uppercase; }
.badge.high { background: var(--high); }
.badge.medium { background: var(--medium); }
.badge.low { background: var(--low); }
article { border-top: 1px solid var(--border); padding-top: 0.5rem; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use visascreen_core::model::{Criterion, Evidence, EvidenceByCriterion};
    use visascreen_core::{assess, ScoringPolicy};

    fn make_test_report() -> ScreeningReport {
        let mut evidence = EvidenceByCriterion::new();
        evidence.insert(
            Criterion::Awards,
            vec![
                Evidence::new("Winner of the <Gold> & \"Silver\" medal", 0.9, Some("awards"))
                    .unwrap(),
                Evidence::new("Received the Test of Time award", 0.8, None).unwrap(),
            ],
        );
        evidence.insert(
            Criterion::Judging,
            vec![Evidence::new("Reviewer for NeurIPS", 0.65, Some("professional activities")).unwrap()],
        );
        let assessment = assess(&evidence, &ScoringPolicy::default()).unwrap();

        ScreeningReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            input: "jane_doe_cv.txt".into(),
            assessment,
        }
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_test_report());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("jane_doe_cv.txt"));
        assert!(html.contains("2024-05-01 12:00:00 UTC"));
        assert!(html.contains("Original Contribution"));
        assert!(html.contains("<span class=\"badge high\">high</span>"));
        assert!(html.contains("<td>0.65</td><td>professional activities</td>"));
        assert!(html.contains("<td>0.80</td><td>unknown</td>"));
    }

    #[test]
    fn evidence_text_is_escaped() {
        let html = generate_html(&make_test_report());

        assert!(html.contains("Winner of the &lt;Gold&gt; &amp; &quot;Silver&quot; medal"));
        assert!(!html.contains("<Gold>"));
    }

    #[test]
    fn html_escape_handles_quotes() {
        assert_eq!(html_escape("a'b\"c"), "a&#x27;b&quot;c");
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
