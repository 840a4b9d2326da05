//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::merger::merge_configs;
use crate::config::schema::UpgateConfig;
use crate::config::validator::validate;
use crate::error::{Result, UpgateError};

/// Name of the per-project and per-user configuration directory.
pub const CONFIG_DIR: &str = ".upgate";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.upgate/config.yml`)
/// 2. Project config (`.upgate/config.yml`)
/// 3. Local overrides (`.upgate/config.local.yml`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub user_global: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self::discover_with_home(project_root, dirs::home_dir().as_deref())
    }

    /// Discover config files with an explicit home directory.
    pub fn discover_with_home(project_root: &Path, home: Option<&Path>) -> Self {
        let existing = |path: PathBuf| path.exists().then_some(path);
        let project_dir = project_root.join(CONFIG_DIR);

        Self {
            user_global: home.and_then(|h| existing(h.join(CONFIG_DIR).join("config.yml"))),
            project: existing(project_dir.join("config.yml")),
            project_local: existing(project_dir.join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Find the project root by walking up from `start`.
///
/// A `.upgate` directory marks the root; `.git` is the fallback.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() || current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load and validate a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist and
/// `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<UpgateConfig> {
    let value = load_config_value(path)?;
    let config = from_value(value, path)?;
    validate(&config)?;
    Ok(config)
}

/// Load a config file as a raw YAML value for merging.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            UpgateError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            UpgateError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| UpgateError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn from_value(value: serde_yaml::Value, path: &Path) -> Result<UpgateConfig> {
    if value.is_null() {
        return Ok(UpgateConfig::default());
    }
    serde_yaml::from_value(value).map_err(|e| UpgateError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge every discovered layer.
///
/// With no config files at all the defaults apply.
pub fn load_merged_config(paths: &ConfigPaths, project_root: &Path) -> Result<UpgateConfig> {
    let mut layers = Vec::new();
    for path in paths.all_existing() {
        debug!("Loading config layer {}", path.display());
        layers.push(load_config_value(path)?);
    }

    let merged = merge_configs(&layers);
    let config = from_value(merged, &project_root.join(CONFIG_DIR).join("config.yml"))?;
    validate(&config)?;
    Ok(config)
}

/// Load config with an optional path override.
///
/// An override is loaded on its own without merging.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<UpgateConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(&ConfigPaths::discover(project_root), project_root),
    }
}
