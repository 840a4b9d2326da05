//! Report output formatters.
//!
//! This module renders a [`CheckReport`] for people (human) or tools (JSON).

pub mod human;
pub mod json;

use std::io::Write;
use std::str::FromStr;

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::checks::CheckReport;

/// Output format for check reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

/// Trait for formatting a check report.
pub trait ReportFormatter {
    /// Format the report to the given writer.
    fn format(&self, report: &CheckReport, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Render a report to a string with the formatter for `format`.
pub fn render(report: &CheckReport, format: OutputFormat, use_color: bool) -> std::io::Result<String> {
    let mut buf = Vec::new();
    match format {
        OutputFormat::Human => HumanFormatter::new(use_color).format(report, &mut buf)?,
        OutputFormat::Json => JsonFormatter::new().format(report, &mut buf)?,
    }
    String::from_utf8(buf).map_err(std::io::Error::other)
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
