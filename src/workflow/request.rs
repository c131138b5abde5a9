//! Workflow inputs and resolved answers.

use std::path::PathBuf;

use crate::template::TemplateReference;
use crate::toolchain::TypescriptPreset;

/// What the user asked for on the command line.
///
/// Built once before the workflow starts and never modified. Answers
/// gathered by prompts are kept in [`ResolvedProject`] instead.
#[derive(Debug, Clone, Default)]
pub struct ProjectRequest {
    /// Target directory, relative to the working directory.
    pub directory: Option<PathBuf>,
    /// Template identifier (`minimal`, `acct/repo/sub#ref`).
    pub template: Option<String>,
    /// Ref to fetch, overriding any `#ref` in the template identifier.
    pub commit: Option<String>,
    /// Resolve every decision but skip side effects.
    pub dry_run: bool,
    /// Accept default answers for the install, git and TypeScript prompts.
    pub assume_yes: bool,
    /// Suppress the decorative intro and outro.
    pub skip_intro: bool,
    pub typescript: Option<TypescriptPreset>,
}

impl ProjectRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = Some(commit.into());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn skip_intro(mut self, skip_intro: bool) -> Self {
        self.skip_intro = skip_intro;
        self
    }

    pub fn typescript(mut self, preset: TypescriptPreset) -> Self {
        self.typescript = Some(preset);
        self
    }
}

/// Decisions made while the workflow runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedProject {
    /// Absolute project directory.
    pub directory: Option<PathBuf>,
    /// The raw template identifier that was chosen.
    pub template_id: Option<String>,
    pub template: Option<TemplateReference>,
    pub install: Option<bool>,
    pub git: Option<bool>,
    /// Preset written to the config. Never `Unsure`.
    pub typescript: Option<TypescriptPreset>,
}
