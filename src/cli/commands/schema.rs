//! Schema command implementation.
//!
//! `upgate schema` prints the JSON Schema of the fleet state file, or of
//! the configuration file with `upgate schema config`.

use crate::cli::args::{SchemaArgs, SchemaTarget};
use crate::config::UpgateConfig;
use crate::error::Result;
use crate::store::FleetSnapshot;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand {
    args: SchemaArgs,
}

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new(args: SchemaArgs) -> Self {
        Self { args }
    }

    /// Render the selected schema as pretty JSON.
    pub fn render(&self) -> Result<String> {
        let schema = match self.args.target {
            SchemaTarget::State => schemars::schema_for!(FleetSnapshot),
            SchemaTarget::Config => schemars::schema_for!(UpgateConfig),
        };
        let mut json = serde_json::to_string_pretty(&schema).map_err(anyhow::Error::from)?;
        json.push('\n');
        Ok(json)
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let json = self.render()?;
        ui.emit(&json);
        Ok(CommandResult::success())
    }
}
