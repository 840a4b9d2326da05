//! List command implementation.
//!
//! The `upgate list` command lists the registered checks in run order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::checks::{CheckKind, CheckRegistry};
use crate::cli::args::ListArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::store::FleetSnapshot;
use crate::ui::UpgateTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

#[derive(Serialize)]
struct ListedCheck<'a> {
    id: &'a str,
    kind: CheckKind,
    description: &'a str,
    skipped: bool,
}

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_override.as_deref())?;

        // Listing never touches fleet data.
        let empty = Arc::new(FleetSnapshot::new());
        let registry = CheckRegistry::with_builtins(empty.clone(), empty);

        let ids: Vec<_> = registry.iter().map(|c| c.id()).collect();
        let listed: Vec<ListedCheck> = registry
            .iter()
            .zip(&ids)
            .map(|(check, id)| ListedCheck {
                id: id.as_str(),
                kind: check.kind(),
                description: check.description(),
                skipped: config.checks.skip.iter().any(|s| s == id.as_str()),
            })
            .collect();

        if self.args.json {
            let mut json = serde_json::to_string_pretty(&listed).map_err(anyhow::Error::from)?;
            json.push('\n');
            ui.emit(&json);
            return Ok(CommandResult::success());
        }

        let theme = UpgateTheme::for_color(ui.use_color());
        let mut out = String::new();
        for check in &listed {
            let marker = if check.skipped {
                format!(" {}", theme.dim.apply_to("(skipped)"))
            } else {
                String::new()
            };
            out.push_str(&format!(
                "  {} {}{}\n      {}\n",
                theme.highlight.apply_to(check.id),
                theme.dim.apply_to(format!("[{}]", check.kind)),
                marker,
                check.description
            ));
        }
        ui.show_header("Registered checks");
        ui.emit(&out);

        Ok(CommandResult::success())
    }
}
