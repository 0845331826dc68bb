//! visascreen CLI, the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use visascreen_core::AssessmentError;

mod commands;

#[derive(Parser)]
#[command(name = "visascreen", version, about = "O-1A visa CV screening engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a CV against the eight O-1A criteria
    Assess {
        /// Evidence file (.json or .toml) keyed by criterion
        #[arg(long, conflicts_with = "cv", required_unless_present = "cv")]
        evidence: Option<PathBuf>,

        /// Plain-text CV to extract evidence from
        #[arg(long)]
        cv: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, markdown, html, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Print the report to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Check evidence files for common problems
    Validate {
        /// Evidence file or directory of evidence files
        #[arg(long)]
        evidence: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two saved assessment reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Exit code 1 if any criterion or the overall rating went down
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and sample evidence file
    Init,
}

#[tokio::main]
async fn main() {
    let filter = match "visascreen=info".parse() {
        Ok(directive) => tracing_subscriber::EnvFilter::from_default_env().add_directive(directive),
        Err(_) => tracing_subscriber::EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess {
            evidence,
            cv,
            config,
            output,
            format,
            stdout,
        } => commands::assess::execute(evidence, cv, config, output, format, stdout).await,
        Commands::Validate { evidence, config } => commands::validate::execute(evidence, config),
        Commands::Compare {
            baseline,
            current,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, fail_on_regression, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        let code = exit_code(&e);
        if code == 2 {
            eprintln!("This is an internal error in visascreen, not a problem with the input.");
        }
        process::exit(code);
    }
}

/// Exit status for a failed command: 2 for a broken internal contract, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> i32 {
    let contract_violation = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<AssessmentError>())
        .any(AssessmentError::is_contract_violation);
    if contract_violation {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use visascreen_core::Criterion;

    #[test]
    fn contract_violation_exits_with_two() {
        let err: anyhow::Result<()> = Err(AssessmentError::IncompleteCriteria {
            missing: vec![Criterion::Press],
        })
        .context("assessment failed");
        assert_eq!(exit_code(&err.unwrap_err()), 2);
    }

    #[test]
    fn input_errors_exit_with_one() {
        let policy = anyhow::Error::new(AssessmentError::InvalidPolicy("bad".into()));
        assert_eq!(exit_code(&policy), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("file not found")), 1);
    }
}
