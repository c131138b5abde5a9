//! Version control initialization.

use std::path::Path;

use crate::error::{FluideError, Result};
use crate::shell::{self, CommandOptions};

/// Result of [`VersionControl::ensure_repo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsOutcome {
    Initialized,
    AlreadyExists,
}

/// Creates a repository in a project directory.
pub trait VersionControl {
    fn ensure_repo(&self, cwd: &Path) -> Result<VcsOutcome>;
}

/// Initializes git repositories.
#[derive(Debug, Clone)]
pub struct GitInitializer {
    program: String,
}

impl GitInitializer {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a different executable in place of `git`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitInitializer {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitInitializer {
    fn ensure_repo(&self, cwd: &Path) -> Result<VcsOutcome> {
        if cwd.join(".git").exists() {
            tracing::debug!("{} already has a .git directory", cwd.display());
            return Ok(VcsOutcome::AlreadyExists);
        }

        let result = shell::execute(&self.program, &["init"], &CommandOptions::in_dir(cwd))?;
        if !result.success {
            return Err(FluideError::Process {
                program: self.program.clone(),
                message: result.failure_summary(),
            });
        }
        Ok(VcsOutcome::Initialized)
    }
}
