//! Configuration loading, merging, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use upgate::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".upgate");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "settings:\n  max_parallel: 2").unwrap();
//!
//! let config = load_config(temp.path(), Some(&dir.join("config.yml"))).unwrap();
//! assert_eq!(config.settings.max_parallel, 2);
//! ```
//!
//! # Configuration File Locations
//!
//! Layers are merged in this order:
//! 1. User global config (`~/.upgate/config.yml`)
//! 2. Project config (`.upgate/config.yml`)
//! 3. Local overrides (`.upgate/config.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{CheckSettings, Settings, UpgateConfig};
pub use validator::{validate, validate_config, ValidationError};
