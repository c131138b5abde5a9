//! Project initialization workflow.
//!
//! The workflow is a loop over [`WorkflowState`]. Each state handler asks
//! its question (or reads the answer from the request), performs its side
//! effect unless this is a dry run, and returns the next state.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FluideError, Result};
use crate::install::{DependencyInstaller, PackageManager, VcsOutcome, VersionControl};
use crate::project::{self, generate_project_name};
use crate::template::{self, FetchOptions, FetchOutcome, TemplateProvider};
use crate::toolchain::{self, ReconcileOutcome, TypescriptPreset};
use crate::ui::{Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

use super::messages;
use super::request::{ProjectRequest, ResolvedProject};

/// Upper bound on directory prompts, so a scripted UI that keeps answering
/// with an occupied directory cannot loop forever.
const MAX_DIRECTORY_ATTEMPTS: u32 = 10;

/// Position in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    ResolveDirectory,
    ResolveTemplate,
    FetchTemplate,
    CleanFiles,
    ResolveInstall,
    InstallDeps,
    ResolveVcs,
    InitVcs,
    ResolveToolchain,
    ReconcileConfig,
    Done,
    /// The user aborted a prompt.
    Cancelled,
    /// Required input was missing or the template could not be fetched.
    Aborted,
}

impl WorkflowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled | Self::Aborted)
    }
}

/// A workflow step, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Directory,
    Template,
    Fetch,
    Clean,
    Install,
    Vcs,
    Toolchain,
}

/// What happened at a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A value was decided (directory path, template locator).
    Resolved(String),
    Performed,
    /// Nothing to do, e.g. a repository already existed.
    AlreadyDone,
    SkippedDryRun,
    /// The user answered no.
    Declined,
    Failed(String),
}

/// A recorded decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDecision {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// Result of running the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    /// Terminal state reached.
    pub state: WorkflowState,
    /// Decisions in the order they were made.
    pub decisions: Vec<StepDecision>,
    pub project: ResolvedProject,
}

impl WorkflowReport {
    /// Process exit code: 0 when done, 1 when cancelled or aborted.
    pub fn exit_code(&self) -> i32 {
        if self.state == WorkflowState::Done {
            0
        } else {
            1
        }
    }

    /// Latest outcome recorded for a step.
    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.decisions
            .iter()
            .rev()
            .find(|d| d.step == step)
            .map(|d| &d.outcome)
    }
}

/// Services the workflow drives.
pub struct Collaborators<'a> {
    pub provider: &'a dyn TemplateProvider,
    pub installer: &'a dyn DependencyInstaller,
    pub vcs: &'a dyn VersionControl,
    pub package_manager: PackageManager,
    /// Directory that relative project paths are resolved against.
    pub working_dir: PathBuf,
}

/// Runs the project initialization workflow.
pub struct Workflow<'a> {
    request: &'a ProjectRequest,
    collaborators: Collaborators<'a>,
    project: ResolvedProject,
    decisions: Vec<StepDecision>,
    /// Spinner started by the fetch and finished after cleanup.
    spinner: Option<Box<dyn SpinnerHandle>>,
}

impl<'a> Workflow<'a> {
    pub fn new(request: &'a ProjectRequest, collaborators: Collaborators<'a>) -> Self {
        Self {
            request,
            collaborators,
            project: ResolvedProject::default(),
            decisions: Vec::new(),
            spinner: None,
        }
    }

    /// Run until a terminal state is reached.
    ///
    /// Step failures are reported through `ui` and the report; only prompt
    /// failures (such as a missing answer in non-interactive mode) are errors.
    pub fn run(mut self, ui: &mut dyn UserInterface) -> Result<WorkflowReport> {
        if !self.request.skip_intro {
            ui.show_header(&messages::welcome(env!("CARGO_PKG_VERSION")));
        }

        let mut state = WorkflowState::ResolveDirectory;
        while !state.is_terminal() {
            tracing::debug!("Workflow state: {:?}", state);
            state = match state {
                WorkflowState::ResolveDirectory => self.resolve_directory(ui)?,
                WorkflowState::ResolveTemplate => self.resolve_template(ui)?,
                WorkflowState::FetchTemplate => self.fetch_template(ui),
                WorkflowState::CleanFiles => self.clean_files(ui),
                WorkflowState::ResolveInstall => self.resolve_install(ui)?,
                WorkflowState::InstallDeps => self.install_deps(ui),
                WorkflowState::ResolveVcs => self.resolve_vcs(ui)?,
                WorkflowState::InitVcs => self.init_vcs(ui),
                WorkflowState::ResolveToolchain => self.resolve_toolchain(ui)?,
                WorkflowState::ReconcileConfig => self.reconcile_config(ui),
                terminal => terminal,
            };
        }

        tracing::info!("Workflow finished in state {:?}", state);
        if state == WorkflowState::Done {
            self.finish(ui);
        }

        Ok(WorkflowReport {
            state,
            decisions: self.decisions,
            project: self.project,
        })
    }

    fn record(&mut self, step: Step, outcome: StepOutcome) {
        tracing::debug!("{:?}: {:?}", step, outcome);
        self.decisions.push(StepDecision { step, outcome });
    }

    /// Show a prompt. `None` means the user cancelled.
    fn ask(ui: &mut dyn UserInterface, prompt: Prompt) -> Result<Option<PromptResult>> {
        match ui.prompt(&prompt)? {
            PromptResult::Cancelled => Ok(None),
            answer => Ok(Some(answer)),
        }
    }

    fn confirm(
        ui: &mut dyn UserInterface,
        key: &str,
        question: String,
    ) -> Result<Option<bool>> {
        let prompt = Prompt {
            key: key.to_string(),
            question,
            prompt_type: PromptType::Confirm,
            default: Some("true".to_string()),
        };
        Ok(Self::ask(ui, prompt)?.map(|answer| {
            answer
                .as_bool()
                .unwrap_or_else(|| crate::ui::parse_bool_answer(&answer.as_string()))
        }))
    }

    fn cancel(&mut self, ui: &mut dyn UserInterface, message: &str) -> WorkflowState {
        ui.message(message);
        WorkflowState::Cancelled
    }

    fn directory(&self) -> Result<&Path> {
        self.project.directory.as_deref().ok_or_else(|| {
            FluideError::Other(anyhow::anyhow!("project directory was not resolved"))
        })
    }

    fn resolve_directory(&mut self, ui: &mut dyn UserInterface) -> Result<WorkflowState> {
        let request = self.request;
        if let Some(directory) = &request.directory {
            let path = self.collaborators.working_dir.join(directory);
            let verdict = project::verdict_for(&path);
            if verdict.is_valid {
                ui.success(&messages::using_directory(&directory.display().to_string()));
                return Ok(self.accept_directory(path));
            }
            ui.error(&occupied(directory, verdict.conflicting_entries));
        }

        for _ in 0..MAX_DIRECTORY_ATTEMPTS {
            let prompt = Prompt {
                key: "directory".to_string(),
                question: messages::DIRECTORY_QUESTION.to_string(),
                prompt_type: PromptType::Input,
                default: Some(generate_project_name()),
            };
            let Some(answer) = Self::ask(ui, prompt)? else {
                return Ok(self.cancel(ui, messages::CANCELLED));
            };

            let answer = answer.as_string();
            let answer = answer.trim();
            if answer.is_empty() {
                ui.message(messages::NO_DIRECTORY);
                return Ok(WorkflowState::Aborted);
            }

            let path = self.collaborators.working_dir.join(answer);
            let verdict = project::verdict_for(&path);
            if verdict.is_valid {
                return Ok(self.accept_directory(path));
            }

            ui.error(&occupied(Path::new(answer), verdict.conflicting_entries));
            if !ui.is_interactive() {
                return Ok(WorkflowState::Aborted);
            }
        }

        ui.message(messages::NO_DIRECTORY);
        Ok(WorkflowState::Aborted)
    }

    fn accept_directory(&mut self, path: PathBuf) -> WorkflowState {
        tracing::info!("Using project directory {}", path.display());
        self.record(
            Step::Directory,
            StepOutcome::Resolved(path.display().to_string()),
        );
        self.project.directory = Some(path);
        WorkflowState::ResolveTemplate
    }

    fn resolve_template(&mut self, ui: &mut dyn UserInterface) -> Result<WorkflowState> {
        let request = self.request;
        let identifier = match &request.template {
            Some(template) => template.clone(),
            None => {
                let prompt = Prompt {
                    key: "template".to_string(),
                    question: messages::TEMPLATE_QUESTION.to_string(),
                    prompt_type: PromptType::Select {
                        options: template::template_options(),
                    },
                    default: Some(template::default_template().to_string()),
                };
                match Self::ask(ui, prompt)? {
                    Some(answer) => answer.as_string(),
                    None => return Ok(self.cancel(ui, messages::CANCELLED)),
                }
            }
        };

        let identifier = identifier.trim();
        if identifier.is_empty() {
            ui.message(messages::NO_TEMPLATE);
            return Ok(WorkflowState::Aborted);
        }

        let reference = template::resolve(identifier, request.commit.as_deref());
        tracing::info!("Template {} resolves to {}", identifier, reference);
        self.record(Step::Template, StepOutcome::Resolved(reference.locator()));
        self.project.template_id = Some(identifier.to_string());
        self.project.template = Some(reference);
        Ok(WorkflowState::FetchTemplate)
    }

    fn fetch_template(&mut self, ui: &mut dyn UserInterface) -> WorkflowState {
        if self.request.dry_run {
            ui.start_spinner(messages::COPYING)
                .finish_skipped(messages::DRY_RUN_FETCH);
            self.record(Step::Fetch, StepOutcome::SkippedDryRun);
            return WorkflowState::CleanFiles;
        }

        let (Some(directory), Some(reference)) =
            (self.project.directory.clone(), self.project.template.clone())
        else {
            return WorkflowState::Aborted;
        };

        let existed = directory.exists();
        self.spinner = Some(ui.start_spinner(messages::COPYING));

        let outcome = template::fetch(
            self.collaborators.provider,
            &reference.locator(),
            &directory,
            &FetchOptions { force: true },
        );

        let lines = match outcome {
            FetchOutcome::Success => {
                self.record(Step::Fetch, StepOutcome::Performed);
                return WorkflowState::CleanFiles;
            }
            FetchOutcome::NotFound => {
                let error = FluideError::TemplateNotFound {
                    template: self
                        .project
                        .template_id
                        .clone()
                        .unwrap_or_else(|| reference.locator()),
                    third_party: reference.is_third_party,
                };
                self.record(
                    Step::Fetch,
                    StepOutcome::Failed(format!("{} not found", reference.locator())),
                );
                messages::template_not_found(&error, reference.git_ref.is_some())
            }
            FetchOutcome::OtherFailure(message) => {
                self.record(Step::Fetch, StepOutcome::Failed(message.clone()));
                vec![FluideError::TemplateFetch { message }.to_string()]
            }
        };

        if let Some(mut spinner) = self.spinner.take() {
            spinner.finish_error(&lines[0]);
        }
        for line in &lines[1..] {
            ui.error(line);
        }

        roll_back(&directory, existed);
        WorkflowState::Aborted
    }

    fn clean_files(&mut self, ui: &mut dyn UserInterface) -> WorkflowState {
        if self.request.dry_run {
            self.record(Step::Clean, StepOutcome::SkippedDryRun);
            return WorkflowState::ResolveInstall;
        }

        let result = self.directory().and_then(template::clean);
        match result {
            Ok(removed) => {
                tracing::debug!("Removed {} template files", removed.len());
                self.record(Step::Clean, StepOutcome::Performed);
            }
            Err(e) => {
                ui.warning(&format!("Could not remove template files: {}", e));
                self.record(Step::Clean, StepOutcome::Failed(e.to_string()));
            }
        }

        if let Some(mut spinner) = self.spinner.take() {
            spinner.finish_success(messages::COPIED);
        }
        WorkflowState::ResolveInstall
    }

    fn resolve_install(&mut self, ui: &mut dyn UserInterface) -> Result<WorkflowState> {
        let install = if self.request.assume_yes {
            true
        } else {
            let question = messages::install_question(self.collaborators.package_manager.name());
            match Self::confirm(ui, "install", question)? {
                Some(answer) => answer,
                None => return Ok(self.cancel(ui, messages::CANCELLED_INSTALL)),
            }
        };
        self.project.install = Some(install);

        if self.request.dry_run {
            ui.start_spinner(messages::INSTALLING)
                .finish_skipped(messages::DRY_RUN_INSTALL);
            self.record(Step::Install, StepOutcome::SkippedDryRun);
            return Ok(WorkflowState::ResolveVcs);
        }
        if !install {
            ui.message(messages::INSTALL_DECLINED);
            self.record(Step::Install, StepOutcome::Declined);
            return Ok(WorkflowState::ResolveVcs);
        }
        Ok(WorkflowState::InstallDeps)
    }

    /// Install dependencies. Verbose mode echoes each output line instead of
    /// folding it into a spinner.
    fn install_deps(&mut self, ui: &mut dyn UserInterface) -> WorkflowState {
        let manager = self.collaborators.package_manager.clone();
        let mut spinner = if ui.output_mode().shows_command_output() {
            ui.message(messages::INSTALLING);
            None
        } else {
            Some(ui.start_spinner(messages::INSTALLING))
        };

        let result = self.directory().and_then(|directory| {
            self.collaborators.installer.install(&manager, directory, &mut |line: &str| {
                match spinner.as_mut() {
                    Some(spinner) => {
                        spinner.set_message(&messages::installing_line(manager.name(), line))
                    }
                    None => ui.message(&messages::command_line(manager.name(), line)),
                }
            })
        });

        let outcome = match &result {
            Ok(()) => StepOutcome::Performed,
            Err(e) => StepOutcome::Failed(e.to_string()),
        };
        match (result, spinner) {
            (Ok(()), Some(mut spinner)) => spinner.finish_success(messages::INSTALLED),
            (Ok(()), None) => ui.success(messages::INSTALLED),
            (Err(e), Some(mut spinner)) => spinner.finish_error(&e.to_string()),
            (Err(e), None) => ui.error(&e.to_string()),
        }
        self.record(Step::Install, outcome);
        WorkflowState::ResolveVcs
    }

    fn resolve_vcs(&mut self, ui: &mut dyn UserInterface) -> Result<WorkflowState> {
        let git = if self.request.assume_yes {
            true
        } else {
            match Self::confirm(ui, "git", messages::git_question())? {
                Some(answer) => answer,
                None => return Ok(self.cancel(ui, messages::CANCELLED_GIT)),
            }
        };
        self.project.git = Some(git);

        if self.request.dry_run {
            ui.message(messages::DRY_RUN);
            self.record(Step::Vcs, StepOutcome::SkippedDryRun);
            return Ok(WorkflowState::ResolveToolchain);
        }
        if !git {
            ui.message(messages::GIT_DECLINED);
            self.record(Step::Vcs, StepOutcome::Declined);
            return Ok(WorkflowState::ResolveToolchain);
        }
        Ok(WorkflowState::InitVcs)
    }

    fn init_vcs(&mut self, ui: &mut dyn UserInterface) -> WorkflowState {
        let result = self
            .directory()
            .and_then(|directory| self.collaborators.vcs.ensure_repo(directory));

        match result {
            Ok(VcsOutcome::Initialized) => {
                ui.success(messages::GIT_CREATED);
                self.record(Step::Vcs, StepOutcome::Performed);
            }
            Ok(VcsOutcome::AlreadyExists) => {
                ui.message(messages::GIT_EXISTS);
                self.record(Step::Vcs, StepOutcome::AlreadyDone);
            }
            Err(e) => {
                ui.error(&e.to_string());
                self.record(Step::Vcs, StepOutcome::Failed(e.to_string()));
            }
        }
        WorkflowState::ResolveToolchain
    }

    fn resolve_toolchain(&mut self, ui: &mut dyn UserInterface) -> Result<WorkflowState> {
        let preset = match self.request.typescript {
            Some(preset) => preset,
            None if self.request.assume_yes => {
                ui.warning(messages::TYPESCRIPT_DEFAULTED);
                TypescriptPreset::DEFAULT
            }
            None => {
                let prompt = Prompt {
                    key: "typescript".to_string(),
                    question: messages::TYPESCRIPT_QUESTION.to_string(),
                    prompt_type: PromptType::Select {
                        options: TypescriptPreset::prompt_options(),
                    },
                    default: Some(TypescriptPreset::DEFAULT.as_str().to_string()),
                };
                let Some(answer) = Self::ask(ui, prompt)? else {
                    return Ok(self.cancel(ui, messages::CANCELLED_TYPESCRIPT));
                };
                answer.as_string().parse::<TypescriptPreset>().unwrap_or_else(|e| {
                    ui.warning(&e);
                    TypescriptPreset::DEFAULT
                })
            }
        };

        if preset == TypescriptPreset::Unsure {
            for line in messages::TYPESCRIPT_BY_DEFAULT {
                ui.message(line);
            }
        }
        self.project.typescript = Some(preset.resolved());
        Ok(WorkflowState::ReconcileConfig)
    }

    fn reconcile_config(&mut self, ui: &mut dyn UserInterface) -> WorkflowState {
        if self.request.dry_run {
            ui.message(messages::DRY_RUN);
            self.record(Step::Toolchain, StepOutcome::SkippedDryRun);
            return WorkflowState::Done;
        }

        let preset = self.project.typescript.unwrap_or(TypescriptPreset::DEFAULT);
        let result = self
            .directory()
            .and_then(|directory| toolchain::reconcile(directory, preset));

        match result {
            Ok(ReconcileOutcome::Created | ReconcileOutcome::Updated) => {
                ui.success(messages::TYPESCRIPT_APPLIED);
                self.record(Step::Toolchain, StepOutcome::Performed);
            }
            Ok(ReconcileOutcome::Malformed(reason)) => {
                ui.warning(messages::TYPESCRIPT_MALFORMED);
                self.record(Step::Toolchain, StepOutcome::Failed(reason));
            }
            Err(e) => {
                ui.error(&e.to_string());
                self.record(Step::Toolchain, StepOutcome::Failed(e.to_string()));
            }
        }
        WorkflowState::Done
    }

    fn finish(&self, ui: &mut dyn UserInterface) {
        let cd_target = self.project.directory.as_deref().and_then(|directory| {
            match directory.strip_prefix(&self.collaborators.working_dir) {
                Ok(relative) if relative.as_os_str().is_empty() => None,
                Ok(relative) => Some(format!("./{}", relative.display())),
                Err(_) => Some(directory.display().to_string()),
            }
        });

        ui.show_header("Next steps");
        let dev_command = self.collaborators.package_manager.dev_command();
        for line in messages::next_steps(cd_target.as_deref(), &dev_command) {
            ui.message(&line);
        }

        if !self.request.skip_intro {
            ui.message(messages::OUTRO);
        }
    }
}

fn occupied(directory: &Path, conflicts: Vec<String>) -> String {
    FluideError::DirectoryOccupied {
        path: directory.to_path_buf(),
        conflicts,
    }
    .to_string()
}

/// Remove a directory created by a failed fetch.
///
/// A directory that existed before the fetch is kept. Failure to remove is
/// logged only.
fn roll_back(directory: &Path, existed_before: bool) {
    if existed_before {
        tracing::debug!("Keeping pre-existing {}", directory.display());
        return;
    }
    if !directory.exists() {
        return;
    }
    match fs::remove_dir_all(directory) {
        Ok(()) => tracing::info!("Removed {}", directory.display()),
        Err(e) => tracing::warn!("Failed to remove {}: {}", directory.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn terminal_states() {
        assert!(WorkflowState::Done.is_terminal());
        assert!(WorkflowState::Cancelled.is_terminal());
        assert!(WorkflowState::Aborted.is_terminal());
        assert!(!WorkflowState::FetchTemplate.is_terminal());
    }

    #[test]
    fn exit_code_is_zero_only_when_done() {
        let mut report = WorkflowReport {
            state: WorkflowState::Done,
            decisions: Vec::new(),
            project: ResolvedProject::default(),
        };
        assert_eq!(report.exit_code(), 0);
        report.state = WorkflowState::Cancelled;
        assert_eq!(report.exit_code(), 1);
        report.state = WorkflowState::Aborted;
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn outcome_returns_latest_decision() {
        let report = WorkflowReport {
            state: WorkflowState::Done,
            decisions: vec![
                StepDecision {
                    step: Step::Install,
                    outcome: StepOutcome::Declined,
                },
                StepDecision {
                    step: Step::Install,
                    outcome: StepOutcome::Performed,
                },
            ],
            project: ResolvedProject::default(),
        };
        assert_eq!(report.outcome(Step::Install), Some(&StepOutcome::Performed));
        assert_eq!(report.outcome(Step::Vcs), None);
    }

    #[test]
    fn roll_back_removes_created_directory() {
        let temp = TempDir::new().unwrap();
        let created = temp.path().join("theme");
        fs::create_dir_all(created.join("sections")).unwrap();

        roll_back(&created, false);
        assert!(!created.exists());
    }

    #[test]
    fn roll_back_keeps_existing_directory() {
        let temp = TempDir::new().unwrap();
        let existing = temp.path().join("theme");
        fs::create_dir_all(&existing).unwrap();
        fs::write(existing.join("README.md"), "notes").unwrap();

        roll_back(&existing, true);
        assert!(existing.join("README.md").exists());
    }

    #[test]
    fn roll_back_tolerates_missing_directory() {
        let temp = TempDir::new().unwrap();
        roll_back(&temp.path().join("never-created"), false);
    }

    #[test]
    fn occupied_message_lists_conflicts() {
        let msg = occupied(Path::new("theme"), vec!["package.json".to_string()]);
        assert!(msg.contains("\"theme\" is not empty!"));
        assert!(msg.contains("package.json"));
    }
}
