//! Shell completions generation.
//!
//! The `fluide completions` command generates shell completion scripts.

use crate::cli::args::{CompletionsArgs, FluideCli};
use crate::ui::UserInterface;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let mut cmd = FluideCli::command();
        clap_complete::generate(self.args.shell, &mut cmd, "fluide", &mut std::io::stdout());
        Ok(CommandResult::success())
    }
}
