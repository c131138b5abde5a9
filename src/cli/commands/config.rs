//! Config command implementation.
//!
//! The `fluide config` command prints the resolved build configuration.

use std::io::Write;

use crate::build;
use crate::cli::args::ConfigArgs;
use crate::error::{FluideError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// The config command implementation.
pub struct ConfigCommand {
    context: ProjectContext,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(context: ProjectContext, args: ConfigArgs) -> Self {
        Self { context, args }
    }

    /// Pretty-printed configuration, or `None` if the options could not be read.
    pub fn render(&self, ui: &mut dyn UserInterface) -> Result<Option<String>> {
        let Some(options) = self.context.load_options_reported(ui)? else {
            return Ok(None);
        };

        let value = if self.args.generated {
            build::generate(&options, &options.server()).to_value()?
        } else {
            build::resolve(&options)?
        };

        let json = serde_json::to_string_pretty(&value).map_err(|e| FluideError::Other(e.into()))?;
        Ok(Some(json))
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.render(ui)? {
            Some(json) => {
                writeln!(std::io::stdout().lock(), "{}", json)?;
                Ok(CommandResult::success())
            }
            None => Ok(CommandResult::failure(2)),
        }
    }
}
