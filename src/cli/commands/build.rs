//! Build command implementation.
//!
//! The `fluide build` command resolves the build configuration and hands it
//! to the build engine.

use crate::build::{self, BuildEngine, LogSink, PrefixedLogSink, ViteBuildEngine};
use crate::cli::args::BuildArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// The build command implementation.
pub struct BuildCommand {
    context: ProjectContext,
    args: BuildArgs,
}

impl BuildCommand {
    /// Create a new build command.
    pub fn new(context: ProjectContext, args: BuildArgs) -> Self {
        Self { context, args }
    }

    /// Build with a specific engine and sink.
    pub fn run_with(
        &self,
        engine: &dyn BuildEngine,
        sink: &mut dyn LogSink,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let Some(options) = self.context.load_options_reported(ui)? else {
            return Ok(CommandResult::failure(2));
        };
        let config = build::resolve(&options)?;

        match build::run_build(engine, &config, sink) {
            Ok(()) => Ok(CommandResult::success()),
            Err(e) => {
                tracing::debug!("Build failed: {}", e);
                Ok(CommandResult::failure(1))
            }
        }
    }
}

impl Command for BuildCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let engine = ViteBuildEngine::new(&self.context.project_root)
            .verbose(ui.output_mode().shows_command_output());

        if self.args.dry_run {
            let Some(options) = self.context.load_options_reported(ui)? else {
                return Ok(CommandResult::failure(2));
            };
            let path = engine.write_config(&build::resolve(&options)?)?;
            ui.success(&format!("Wrote {}", path.display()));
            return Ok(CommandResult::success());
        }

        let mut sink = PrefixedLogSink::new();
        self.run_with(&engine, &mut sink, ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{LogLevel, RecordingLogSink, BUILD_COMPLETE};
    use crate::error::FluideError;
    use crate::ui::MockUI;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct CapturingEngine {
        seen: RefCell<Option<Value>>,
        fail: bool,
    }

    impl BuildEngine for CapturingEngine {
        fn build(&self, config: &Value, sink: &mut dyn LogSink) -> Result<()> {
            *self.seen.borrow_mut() = Some(config.clone());
            if self.fail {
                return Err(FluideError::Process {
                    program: "vite".to_string(),
                    message: "exited with status 1".to_string(),
                });
            }
            sink.info("bundled 2 entries");
            Ok(())
        }
    }

    #[test]
    fn build_passes_resolved_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("fluide.config.yml"),
            "overrides:\n  base: /cdn/\n",
        )
        .unwrap();
        let cmd = BuildCommand::new(ProjectContext::new(temp.path()), BuildArgs::default());
        let engine = CapturingEngine::default();
        let mut sink = RecordingLogSink::new();
        let mut ui = MockUI::new();

        let result = cmd.run_with(&engine, &mut sink, &mut ui).unwrap();

        assert!(result.success);
        let seen = engine.seen.borrow().clone().unwrap();
        assert_eq!(seen["base"], "/cdn/");
        assert_eq!(
            sink.messages(LogLevel::Info),
            vec!["bundled 2 entries", BUILD_COMPLETE]
        );
    }

    #[test]
    fn failed_build_exits_one() {
        let temp = TempDir::new().unwrap();
        let cmd = BuildCommand::new(ProjectContext::new(temp.path()), BuildArgs::default());
        let engine = CapturingEngine {
            fail: true,
            ..Default::default()
        };
        let mut sink = RecordingLogSink::new();
        let mut ui = MockUI::new();

        let result = cmd.run_with(&engine, &mut sink, &mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(sink.messages(LogLevel::Error).len(), 1);
    }

    #[test]
    fn malformed_options_exit_two() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("fluide.config.yml"), "root: [").unwrap();
        let cmd = BuildCommand::new(ProjectContext::new(temp.path()), BuildArgs::default());
        let engine = CapturingEngine::default();
        let mut sink = RecordingLogSink::new();
        let mut ui = MockUI::new();

        let result = cmd.run_with(&engine, &mut sink, &mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(engine.seen.borrow().is_none());
        assert!(ui.has_error("Failed to parse config"));
    }

    #[test]
    fn dry_run_writes_config_only() {
        let temp = TempDir::new().unwrap();
        let cmd = BuildCommand::new(
            ProjectContext::new(temp.path()),
            BuildArgs { dry_run: true },
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        let module = fs::read_to_string(temp.path().join(".fluide/vite.config.mjs")).unwrap();
        assert!(module.starts_with("export default"));
        assert!(ui.has_success("vite.config.mjs"));
    }
}
