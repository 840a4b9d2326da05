//! Human-readable output formatter.
//!
//! Passing checks are left out; everything else is listed with its reason
//! and the entities it failed on, followed by counts and the verdict.

use std::io::Write;

use super::ReportFormatter;
use crate::checks::{CheckReport, CheckResult, CheckStatus, Verdict};
use crate::ui::UpgateTheme;

/// Formats check reports for terminal display.
pub struct HumanFormatter {
    theme: UpgateTheme,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self {
            theme: UpgateTheme::for_color(use_color),
        }
    }

    fn result_line(&self, result: &CheckResult) -> Option<String> {
        if result.status == CheckStatus::Pass {
            return None;
        }
        let label = format!("{} [{}]", result.check_id, result.status);
        Some(self.theme.format_toned(result.status.into(), &label))
    }

    fn verdict_line(&self, verdict: Verdict) -> String {
        self.theme
            .format_toned(verdict.into(), &format!("Verdict: {}", verdict))
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &CheckReport, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            writer,
            "{} {}",
            self.theme.format_header(&format!("Upgrade checks for {}", report.cluster)),
            self.theme.dim.apply_to(format!(
                "· {} · {}",
                report.target, report.upgrade_type
            ))
        )?;
        writeln!(writer)?;

        for result in &report.results {
            let Some(line) = self.result_line(result) else {
                continue;
            };
            writeln!(writer, "{}", line)?;
            if result.status == CheckStatus::NotApplicable {
                continue;
            }
            writeln!(writer, "    {}", self.theme.dim.apply_to(&result.description))?;
            if let Some(ref reason) = result.reason {
                writeln!(writer, "    {}", reason)?;
            }
            if !result.failed_on.is_empty() {
                let entities: Vec<&str> = result.failed_on.iter().map(String::as_str).collect();
                writeln!(
                    writer,
                    "    {} {}",
                    self.theme.key.apply_to(format!("{}s:", result.kind)),
                    entities.join(", ")
                )?;
            }
        }

        let summary = report.summary();
        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            self.theme.dim.apply_to(format!(
                "{} check(s): {} passed, {} warning(s), {} failed, {} not applicable, {} cancelled",
                summary.total,
                summary.passed,
                summary.warnings,
                summary.failed,
                summary.not_applicable,
                summary.cancelled
            ))
        )?;
        writeln!(writer, "{}", self.verdict_line(report.verdict()))?;

        Ok(())
    }
}
