//! Create command implementation.
//!
//! `create-fluide` runs a single command: the project initialization
//! workflow, wired to the real template provider, package manager and git.

use std::path::{Path, PathBuf};

use crate::cli::args::CreateArgs;
use crate::error::Result;
use crate::install::{GitInitializer, PackageManager, ProcessInstaller};
use crate::template::GitHubProvider;
use crate::ui::UserInterface;
use crate::workflow::{Collaborators, Workflow, WorkflowReport};

use super::dispatcher::{Command, CommandResult};

/// The create command implementation.
pub struct CreateCommand {
    working_dir: PathBuf,
    args: CreateArgs,
}

impl CreateCommand {
    /// Create a new create command resolving paths against `working_dir`.
    pub fn new(working_dir: &Path, args: CreateArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            args,
        }
    }

    /// Run the workflow and return its report.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<WorkflowReport> {
        let request = self.args.to_request();
        let provider = GitHubProvider::new()?;
        let installer = ProcessInstaller;
        let vcs = GitInitializer::new();
        let package_manager = PackageManager::detect();
        tracing::debug!("Detected package manager {}", package_manager);

        let collaborators = Collaborators {
            provider: &provider,
            installer: &installer,
            vcs: &vcs,
            package_manager,
            working_dir: self.working_dir.clone(),
        };

        Workflow::new(&request, collaborators).run(ui)
    }
}

impl Command for CreateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = self.run(ui)?;
        if report.exit_code() == 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(report.exit_code()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateReference;
    use crate::ui::MockUI;
    use crate::workflow::{Step, StepOutcome, WorkflowState};
    use tempfile::TempDir;

    #[test]
    fn dry_run_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let args = CreateArgs {
            directory: Some(PathBuf::from("my-theme")),
            template: Some("basics".to_string()),
            dry_run: true,
            yes: true,
            skip_intro: true,
            ..Default::default()
        };
        let cmd = CreateCommand::new(temp.path(), args);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(!temp.path().join("my-theme").exists());
    }

    #[test]
    fn report_carries_resolved_template() {
        let temp = TempDir::new().unwrap();
        let args = CreateArgs {
            directory: Some(PathBuf::from("shop")),
            template: Some("acct/repo#dev".to_string()),
            dry_run: true,
            yes: true,
            skip_intro: true,
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let report = CreateCommand::new(temp.path(), args).run(&mut ui).unwrap();

        assert_eq!(report.state, WorkflowState::Done);
        let template: &TemplateReference = report.project.template.as_ref().unwrap();
        assert!(template.is_third_party);
        assert_eq!(
            report.outcome(Step::Install),
            Some(&StepOutcome::SkippedDryRun)
        );
    }
}
