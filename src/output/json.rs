//! JSON output formatter.
//!
//! Formats check reports as machine-readable JSON for deployment tooling.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ReportFormatter;
use crate::checks::{CheckReport, CheckResult, ReportSummary, UpgradeType, Verdict};

/// Formats check reports as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    cluster: &'a str,
    target: &'a str,
    upgrade_type: UpgradeType,
    generated_at: DateTime<Utc>,
    verdict: Verdict,
    results: &'a [CheckResult],
    summary: ReportSummary,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &CheckReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            cluster: &report.cluster,
            target: &report.target,
            upgrade_type: report.upgrade_type,
            generated_at: report.generated_at,
            verdict: report.verdict(),
            results: &report.results,
            summary: report.summary(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)?;

        Ok(())
    }
}
