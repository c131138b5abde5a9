//! Dependency installation.
//!
//! [`spawn`] starts `<manager> install` and returns a handle. Progress lines
//! are read from the handle while the install runs; [`InstallHandle::wait`]
//! alone decides success.

use std::path::Path;

use super::package_manager::PackageManager;
use crate::error::{FluideError, Result};
use crate::shell::{self, CommandOptions, OutputLine, StreamingCommand};

/// Installs project dependencies.
pub trait DependencyInstaller {
    /// Install dependencies in `cwd`, reporting stdout lines to `on_progress`.
    fn install(
        &self,
        manager: &PackageManager,
        cwd: &Path,
        on_progress: &mut dyn FnMut(&str),
    ) -> Result<()>;
}

/// Runs the package manager's `install` subcommand.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessInstaller;

impl DependencyInstaller for ProcessInstaller {
    fn install(
        &self,
        manager: &PackageManager,
        cwd: &Path,
        on_progress: &mut dyn FnMut(&str),
    ) -> Result<()> {
        install(manager, cwd, on_progress)
    }
}

/// A running install.
pub struct InstallHandle {
    manager: String,
    command: StreamingCommand,
}

impl InstallHandle {
    /// Next line written to stdout, or `None` once output has ended.
    ///
    /// Receiving `None` does not mean the install finished successfully.
    pub fn next_progress(&self) -> Option<String> {
        loop {
            match self.command.next_line()? {
                OutputLine::Stdout(line) => return Some(line),
                OutputLine::Stderr(line) => tracing::debug!("[{}] {}", self.manager, line),
            }
        }
    }

    /// Wait for the install to exit.
    pub fn wait(self) -> Result<()> {
        let result = self.command.wait()?;
        if result.success {
            tracing::info!("{} install finished in {:?}", self.manager, result.duration);
            Ok(())
        } else {
            Err(FluideError::Process {
                program: self.manager,
                message: result.failure_summary(),
            })
        }
    }
}

/// Start `<manager> install` in `cwd`.
pub fn spawn(manager: &PackageManager, cwd: &Path) -> Result<InstallHandle> {
    let program = shell::node_program(manager.name());
    let command = shell::spawn_streaming(&program, &["install"], &CommandOptions::in_dir(cwd))
        .map_err(|e| match e {
            FluideError::Process { message, .. } => FluideError::Process {
                program: manager.name().to_string(),
                message,
            },
            other => other,
        })?;

    Ok(InstallHandle {
        manager: manager.name().to_string(),
        command,
    })
}

/// Install dependencies, forwarding stdout lines to `on_progress`.
pub fn install(
    manager: &PackageManager,
    cwd: &Path,
    on_progress: &mut dyn FnMut(&str),
) -> Result<()> {
    let handle = spawn(manager, cwd)?;
    while let Some(line) = handle.next_progress() {
        on_progress(&line);
    }
    handle.wait()
}
