//! Summary report generation.
//!
//! This module renders a [`ResultSummary`] as plain text or JSON.

use crate::analysis::{Bucket, ResultSummary};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Metadata about the summary report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Where the result tree was read from.
    pub source: String,
    /// Name of the summarized root result.
    pub root_name: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of this tool.
    pub tool_version: String,
}

/// Serializable snapshot of a summary, derived counts included.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryCounts {
    pub overall_result: String,
    pub test_count: usize,
    pub run_count: usize,
    pub not_run_count: usize,
    pub pass_count: usize,
    pub failure_count: usize,
    pub error_count: usize,
    pub inconclusive_count: usize,
    pub skip_count: usize,
    pub ignore_count: usize,
    pub explicit_count: usize,
    pub invalid_count: usize,
}

impl From<&ResultSummary> for SummaryCounts {
    fn from(summary: &ResultSummary) -> Self {
        Self {
            overall_result: summary.overall_result().to_string(),
            test_count: summary.test_count(),
            run_count: summary.run_count(),
            not_run_count: summary.not_run_count(),
            pass_count: summary.pass_count(),
            failure_count: summary.failure_count(),
            error_count: summary.error_count(),
            inconclusive_count: summary.inconclusive_count(),
            skip_count: summary.skip_count(),
            ignore_count: summary.ignore_count(),
            explicit_count: summary.explicit_count(),
            invalid_count: summary.invalid_count(),
        }
    }
}

/// The complete summary report.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub metadata: ReportMetadata,
    pub summary: SummaryCounts,
}

impl SummaryReport {
    pub fn new(source: impl Into<String>, summary: &ResultSummary) -> Self {
        Self {
            metadata: ReportMetadata {
                source: source.into(),
                root_name: summary.root_name().to_string(),
                generated_at: Utc::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            summary: SummaryCounts::from(summary),
        }
    }
}

/// Generate a plain-text report.
pub fn generate_text_report(report: &SummaryReport) -> String {
    let counts = &report.summary;
    let mut output = String::new();

    output.push_str("Test Run Summary\n");
    output.push_str(&format!("  Source: {}\n", report.metadata.source));
    if !report.metadata.root_name.is_empty() {
        output.push_str(&format!("  Root: {}\n", report.metadata.root_name));
    }
    output.push_str(&format!("  Overall result: {}\n", counts.overall_result));
    output.push_str(&format!(
        "  Test Count: {}, Run: {}, Not Run: {}\n\n",
        counts.test_count, counts.run_count, counts.not_run_count
    ));

    let rows = [
        (Bucket::Passed, counts.pass_count),
        (Bucket::Failure, counts.failure_count),
        (Bucket::Error, counts.error_count),
        (Bucket::Inconclusive, counts.inconclusive_count),
        (Bucket::Skipped, counts.skip_count),
        (Bucket::Ignored, counts.ignore_count),
        (Bucket::Explicit, counts.explicit_count),
        (Bucket::Invalid, counts.invalid_count),
    ];

    let width = rows
        .iter()
        .map(|(bucket, _)| bucket.label().len())
        .max()
        .unwrap_or(0);

    for (bucket, count) in rows {
        let state = if bucket.was_run() { "run" } else { "not run" };
        output.push_str(&format!(
            "  {:<width$}  {:>6}  ({})\n",
            bucket.label(),
            count,
            state,
            width = width
        ));
    }

    output
}

/// Generate a JSON report, terminated by a newline.
pub fn generate_json_report(report: &SummaryReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

/// Write rendered report content to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    std::fs::write(path, content)?;
    Ok(())
}
