//! Configuration schema types.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::checks::DEFAULT_MAX_PARALLEL;
use crate::output::OutputFormat;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct UpgateConfig {
    /// Engine and output settings.
    pub settings: Settings,

    /// Check selection.
    pub checks: CheckSettings,
}

/// Engine and output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Settings {
    /// Maximum checks evaluated concurrently.
    pub max_parallel: usize,

    /// Report format when `--format` is not given.
    pub default_format: OutputFormat,

    /// Warnings block the upgrade.
    pub strict: bool,

    /// Fleet state file, relative to the project root.
    pub state_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_parallel: DEFAULT_MAX_PARALLEL,
            default_format: OutputFormat::Human,
            strict: false,
            state_file: PathBuf::from(".upgate").join("fleet.yml"),
        }
    }
}

/// Which checks run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CheckSettings {
    /// Check ids removed from the registry.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skip: Vec<String>,
}
