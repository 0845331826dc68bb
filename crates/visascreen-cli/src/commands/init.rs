//! The `visascreen init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("visascreen.toml").exists() {
        println!("visascreen.toml already exists, skipping.");
    } else {
        std::fs::write("visascreen.toml", SAMPLE_CONFIG)?;
        println!("Created visascreen.toml");
    }

    std::fs::create_dir_all("evidence")?;
    let example_path = std::path::Path::new("evidence/sample.json");
    if example_path.exists() {
        println!("evidence/sample.json already exists, skipping.");
    } else {
        std::fs::write(example_path, SAMPLE_EVIDENCE)?;
        println!("Created evidence/sample.json");
    }

    println!("\nNext steps:");
    println!("  1. Replace evidence/sample.json with evidence from your CV, or use --cv cv.txt");
    println!("  2. Run: visascreen validate --evidence evidence/sample.json");
    println!("  3. Run: visascreen assess --evidence evidence/sample.json --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# visascreen configuration

output_dir = "./visascreen-results"

[policy]
# Evidence below this confidence is ignored.
min_confidence = 0.5
medium_confidence = 0.6
high_confidence = 0.75
medium_count = 2
high_confident_count = 2
high_count = 3
max_evidence_shown = 5
min_qualifying_criteria = 3
min_strong_criteria = 2
"#;

const SAMPLE_EVIDENCE: &str = r#"{
  "awards": [
    {"text": "Best Paper Award, NeurIPS 2021", "confidence": 0.85, "source_section": "awards"}
  ],
  "press": [
    {"text": "Profiled in Wired for work on open-source compilers", "confidence": 0.9, "source_section": "publications"},
    {"text": "Interviewed by the BBC on AI safety", "confidence": 0.8},
    {"text": "Quoted in Nature News", "confidence": 0.55}
  ],
  "judging": [
    {"text": "Reviewer for ICML and NeurIPS program committees", "confidence": 0.78, "source_section": "professional activities"},
    {"text": "Judge for the ACM student research competition", "confidence": 0.76, "source_section": "professional activities"}
  ],
  "original_contribution": [
    {"text": "Invented a novel garbage collection algorithm adopted by two major runtimes", "confidence": 0.7, "source_section": "research"}
  ],
  "scholarly_articles": [],
  "critical_employment": [
    {"text": "Led the storage team as senior director at Acme", "confidence": 0.45, "source_section": "experience"}
  ]
}
"#;
