//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing `fluide` subcommands

use std::path::{Path, PathBuf};

use crate::build::ProjectOptions;
use crate::cli::args::{Commands, FluideCli};
use crate::error::{FluideError, Result};
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where a command finds the project and its options file.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub project_root: PathBuf,
    /// Explicit options file; `None` means `<project_root>/fluide.config.yml`.
    pub config: Option<PathBuf>,
}

impl ProjectContext {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: None,
        }
    }

    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.config = config;
        self
    }

    /// Load project options.
    ///
    /// A missing default options file yields defaults; a missing explicit one
    /// is an error.
    pub fn load_options(&self) -> Result<ProjectOptions> {
        match &self.config {
            Some(path) => ProjectOptions::load_file(&self.project_root.join(path)),
            None => ProjectOptions::load(&self.project_root),
        }
    }

    /// Load project options, reporting unreadable options through `ui`.
    ///
    /// `Ok(None)` means the error was already reported.
    pub(crate) fn load_options_reported(
        &self,
        ui: &mut dyn UserInterface,
    ) -> Result<Option<ProjectOptions>> {
        match self.load_options() {
            Ok(options) => Ok(Some(options)),
            Err(e @ (FluideError::ConfigNotFound { .. } | FluideError::ConfigParse { .. })) => {
                ui.error(&e.to_string());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Dispatches `fluide` subcommands to their implementations.
pub struct CommandDispatcher {
    context: ProjectContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, config: Option<PathBuf>) -> Self {
        Self {
            context: ProjectContext::new(&project_root).with_config(config),
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &FluideCli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Build(args) => {
                let cmd = super::build::BuildCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Config(args) => {
                let cmd = super::config::ConfigCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Schema => super::schema::SchemaCommand.execute(ui),
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
