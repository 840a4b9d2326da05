//! Check command implementation.
//!
//! `upgate check` loads the fleet state, resolves the target version, runs
//! every registered check and prints the report.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::checks::{
    CancelToken, CheckId, CheckRegistry, CheckReport, CheckRequest, CheckRunner, Verdict,
};
use crate::cli::args::CheckArgs;
use crate::config::{load_config, UpgateConfig};
use crate::error::Result;
use crate::model::RepositoryVersion;
use crate::output;
use crate::store::{FleetSnapshot, VersionStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_BLOCKED, EXIT_CANCELLED};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn state_path(&self, config: &UpgateConfig) -> PathBuf {
        match &self.args.state {
            Some(path) => path.clone(),
            None => self.project_root.join(&config.settings.state_file),
        }
    }

    /// Resolve the target from the store, or leave it unresolved so the
    /// checks report it as unknown.
    fn resolve_target(&self, store: &dyn VersionStore) -> Result<RepositoryVersion> {
        let found = store.find_repository_version(&self.args.stack, &self.args.target_version)?;
        Ok(found.unwrap_or_else(|| {
            debug!(
                "{} {} is not registered in the fleet state",
                self.args.stack, self.args.target_version
            );
            RepositoryVersion::new(self.args.stack.clone(), self.args.target_version.clone())
        }))
    }

    fn registry(
        &self,
        snapshot: &Arc<FleetSnapshot>,
        config: &UpgateConfig,
        ui: &mut dyn UserInterface,
    ) -> CheckRegistry {
        let mut registry = CheckRegistry::with_builtins(snapshot.clone(), snapshot.clone());
        let skip: Vec<CheckId> = config
            .checks
            .skip
            .iter()
            .chain(&self.args.skip)
            .map(CheckId::new)
            .collect();
        for unknown in registry.remove_all(&skip) {
            ui.warning(&format!("Ignoring unknown check '{}' in skip list", unknown));
        }
        registry
    }

    fn exit_result(report: &CheckReport, strict: bool) -> CommandResult {
        if report.verdict() == Verdict::Cancelled {
            CommandResult::failure(EXIT_CANCELLED)
        } else if report.blocks_upgrade(strict) {
            CommandResult::failure(EXIT_BLOCKED)
        } else {
            CommandResult::success()
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_override.as_deref())?;
        let state_path = self.state_path(&config);
        let snapshot = Arc::new(FleetSnapshot::load(&state_path)?);

        let target = self.resolve_target(snapshot.as_ref())?;
        if ui.output_mode().shows_details() {
            ui.message(&format!("Fleet state: {}", state_path.display()));
            ui.message(&format!("Target: {} ({})", target, target.repository_type));
        }
        let request = CheckRequest::new(self.args.cluster.clone(), target)
            .with_upgrade_type(self.args.upgrade_type);
        let registry = self.registry(&snapshot, &config, ui);

        let cancel = match self.args.deadline {
            Some(secs) => CancelToken::with_timeout(Duration::from_secs(secs)),
            None => CancelToken::new(),
        };
        let runner = CheckRunner::new(snapshot.clone()).with_max_parallel(
            self.args
                .max_parallel
                .unwrap_or(config.settings.max_parallel),
        );
        let report = runner.run(&registry, &request, &cancel)?;

        let format = self.args.format.unwrap_or(config.settings.default_format);
        let rendered = output::render(&report, format, ui.use_color())?;
        ui.emit(&rendered);

        let strict = self.args.strict || config.settings.strict;
        let result = Self::exit_result(&report, strict);
        if report.verdict() == Verdict::Warning && !strict {
            ui.show_hint("Warnings do not block the upgrade; pass --strict to make them blocking.");
        }
        Ok(result)
    }
}
