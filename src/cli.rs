//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::analysis::OverallResult;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// testsummary - summarize a test-result tree
///
/// Reads a JSON result tree produced by a test framework, counts every
/// test case by outcome and reports the overall result of the run.
///
/// Examples:
///   testsummary results.json
///   cat results.json | testsummary --format json
///   testsummary results.json --fail-on failed
///   testsummary --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Result tree to summarize (JSON). Reads stdin when absent or `-`.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output format (text, json)
    ///
    /// Defaults to the config file setting, or text.
    #[arg(long, value_name = "FORMAT", env = "TESTSUMMARY_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .testsummary.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Fail if the overall result is at or above this level
    ///
    /// Useful for CI pipelines. Exit code 2 when the threshold is reached.
    /// Values: warning, inconclusive, failed
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<FailOnLevel>,

    /// Generate a default .testsummary.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Overall-result threshold for --fail-on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FailOnLevel {
    Warning,
    Inconclusive,
    Failed,
}

impl FailOnLevel {
    /// Severity of an overall result on the threshold scale. Passed has none.
    pub fn of(result: OverallResult) -> Option<Self> {
        match result {
            OverallResult::Passed => None,
            OverallResult::Warning => Some(FailOnLevel::Warning),
            OverallResult::Inconclusive => Some(FailOnLevel::Inconclusive),
            OverallResult::Failed => Some(FailOnLevel::Failed),
        }
    }

    /// Whether `result` reaches this threshold.
    pub fn is_reached_by(&self, result: OverallResult) -> bool {
        Self::of(result).is_some_and(|level| level >= *self)
    }
}

/// Exit code when the run completes below any threshold.
pub const EXIT_OK: i32 = 0;

/// Exit code when the overall result reaches the --fail-on threshold.
pub const EXIT_THRESHOLD_REACHED: i32 = 2;

/// Exit code for a summarized run under an optional --fail-on threshold.
pub fn exit_code(fail_on: Option<FailOnLevel>, result: OverallResult) -> i32 {
    match fail_on {
        Some(level) if level.is_reached_by(result) => EXIT_THRESHOLD_REACHED,
        _ => EXIT_OK,
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref input) = self.input {
            if input.as_os_str() != crate::input::STDIN_PATH && !input.exists() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
