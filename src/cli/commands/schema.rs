//! Schema command implementation.
//!
//! The `fluide schema` command prints the JSON Schema for `fluide.config.yml`,
//! for editors that validate YAML against a schema.

use std::io::Write;

use crate::build;
use crate::error::{FluideError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

impl SchemaCommand {
    pub fn render(&self) -> Result<String> {
        serde_json::to_string_pretty(&build::json_schema()).map_err(|e| FluideError::Other(e.into()))
    }
}

impl Command for SchemaCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        writeln!(std::io::stdout().lock(), "{}", self.render()?)?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn schema_is_json_object() {
        let rendered = SchemaCommand.render().unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert!(value["properties"]["entrypoints_dir"].is_object());
        assert_eq!(value["title"], "ProjectOptions");
    }
}
