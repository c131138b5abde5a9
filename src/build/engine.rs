//! Build engine invocation.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::log::LogSink;
use crate::error::{FluideError, Result};
use crate::shell::{self, CommandOptions, OutputLine};

/// Directory holding the generated engine configuration.
pub const WORK_DIR: &str = ".fluide";

/// Generated engine configuration file, inside [`WORK_DIR`].
pub const CONFIG_MODULE: &str = "vite.config.mjs";

/// Logged once a build succeeds.
pub const BUILD_COMPLETE: &str = "build fluide complete";

/// Bundles a project from a resolved configuration.
pub trait BuildEngine {
    fn build(&self, config: &Value, sink: &mut dyn LogSink) -> Result<()>;
}

/// Runs `vite build` through `npx`.
#[derive(Debug, Clone)]
pub struct ViteBuildEngine {
    project_root: PathBuf,
    program: String,
    verbose: bool,
}

impl ViteBuildEngine {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            program: shell::node_program("npx"),
            verbose: false,
        }
    }

    /// Let vite print its own progress instead of running silent.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn log_level(&self) -> &'static str {
        if self.verbose {
            "info"
        } else {
            "silent"
        }
    }

    /// Use a different launcher in place of `npx`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Path the configuration module is written to.
    pub fn config_path(&self) -> PathBuf {
        self.project_root.join(WORK_DIR).join(CONFIG_MODULE)
    }

    /// Write `config` as an ES module default export.
    pub fn write_config(&self, config: &Value) -> Result<PathBuf> {
        let path = self.config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, render_module(config)?)?;
        tracing::debug!("Wrote build configuration to {}", path.display());
        Ok(path)
    }
}

impl BuildEngine for ViteBuildEngine {
    fn build(&self, config: &Value, sink: &mut dyn LogSink) -> Result<()> {
        let config_path = self.write_config(config)?;
        let config_arg = config_path.to_string_lossy();
        let args = [
            "vite",
            "build",
            "--config",
            config_arg.as_ref(),
            "--logLevel",
            self.log_level(),
        ];

        let result = shell::execute_streaming(
            &self.program,
            &args,
            &CommandOptions::in_dir(&self.project_root),
            |line| match line {
                OutputLine::Stdout(line) => sink.info(&line),
                OutputLine::Stderr(line) => sink.warn(&line),
            },
        )?;

        if result.success {
            Ok(())
        } else {
            Err(FluideError::Process {
                program: "vite".to_string(),
                message: result.failure_summary(),
            })
        }
    }
}

/// `export default <json>;`
pub fn render_module(config: &Value) -> Result<String> {
    let json = serde_json::to_string_pretty(config).map_err(anyhow::Error::from)?;
    Ok(format!("export default {};\n", json))
}

/// Run a build, reporting failure or completion to `sink`.
pub fn run_build(engine: &dyn BuildEngine, config: &Value, sink: &mut dyn LogSink) -> Result<()> {
    match engine.build(config, sink) {
        Ok(()) => {
            sink.info(BUILD_COMPLETE);
            Ok(())
        }
        Err(e) => {
            sink.error(&e.to_string());
            Err(e)
        }
    }
}
