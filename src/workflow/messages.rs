//! User-facing workflow text.

use crate::error::FluideError;

pub const DIRECTORY_QUESTION: &str = "Where would you like to create your new theme project?";
pub const TEMPLATE_QUESTION: &str = "How would you like to setup your theme project?";
pub const TYPESCRIPT_QUESTION: &str = "How would you like to setup TypeScript?";

pub const CANCELLED: &str = "Operation cancelled. See you later!";
pub const CANCELLED_INSTALL: &str = "Operation cancelled. Your project folder has already been created, however no dependencies have been installed";
pub const CANCELLED_GIT: &str =
    "Operation cancelled. No worries, your project folder has already been created";
pub const CANCELLED_TYPESCRIPT: &str = "Operation cancelled. Your project folder has been created but no TypeScript configuration file was created.";

pub const NO_DIRECTORY: &str = "No directory provided. See you later!";
pub const NO_TEMPLATE: &str = "No template provided. See you later!";

pub const COPYING: &str = "Copying theme files and folders...";
pub const COPIED: &str = "Theme copied!";
pub const INSTALLING: &str = "Installing packages...";
pub const INSTALLED: &str = "Packages installed!";
pub const INSTALL_DECLINED: &str = "No problem! Remember to install dependencies after setup.";
pub const GIT_CREATED: &str = "Git repository created!";
pub const GIT_EXISTS: &str =
    "A .git directory already exists. Skipping creating a new Git repository.";
pub const GIT_DECLINED: &str = "Sounds good! You can come back and run git init later.";
pub const TYPESCRIPT_APPLIED: &str = "TypeScript settings applied!";
pub const TYPESCRIPT_MALFORMED: &str = "There was an error applying the requested TypeScript settings. This could be because the template's tsconfig.json is malformed";
pub const TYPESCRIPT_DEFAULTED: &str = "--typescript <choice> missing. Defaulting to \"strict\"";

pub const DRY_RUN_FETCH: &str = "--dry-run enabled, skipping copying the template.";
pub const DRY_RUN_INSTALL: &str = "--dry-run enabled, skipping installing dependencies.";
pub const DRY_RUN: &str = "--dry-run enabled, skipping.";

pub const OUTRO: &str = "Good luck out there!";

/// Shown before falling back to the relaxed preset.
pub const TYPESCRIPT_BY_DEFAULT: &[&str] = &[
    "No worries! TypeScript is supported in every project by default.",
    "The relaxed preset will be used. You can switch presets later in tsconfig.json.",
];

pub fn install_question(manager: &str) -> String {
    format!("Would you like to install {manager} dependencies? (recommended)")
}

pub fn git_question() -> String {
    "Would you like to initialize a new git repository? (optional)".to_string()
}

pub fn using_directory(directory: &str) -> String {
    format!("Using {directory} as project directory.")
}

pub fn installing_line(manager: &str, line: &str) -> String {
    format!("{INSTALLING}\n{}", command_line(manager, line))
}

pub fn command_line(program: &str, line: &str) -> String {
    format!("[{program}] {line}")
}

pub fn welcome(version: &str) -> String {
    format!("Welcome to fluide v{version}!")
}

/// Lines explaining a missing template: the error, then a hint for GitHub
/// templates.
///
/// `has_ref` is whether a branch, tag or commit was requested, inline or
/// through `--commit`.
pub fn template_not_found(error: &FluideError, has_ref: bool) -> Vec<String> {
    let mut lines = vec![error.to_string()];
    if let FluideError::TemplateNotFound {
        template,
        third_party: true,
    } = error
    {
        if has_ref {
            lines.push("Are you sure this GitHub repo and branch exist?".to_string());
        } else {
            lines.push(format!(
                "Are you sure this GitHub repo exists? This command uses the repo's default branch.\n\
                 To use another branch, specify its name:\n\
                 {template}#branch-name"
            ));
        }
    }
    lines
}

/// Steps printed once the project is ready.
///
/// `cd_target` is `None` when the project is the current directory.
pub fn next_steps(cd_target: Option<&str>, dev_command: &str) -> Vec<String> {
    let mut steps = Vec::new();
    if let Some(target) = cd_target {
        steps.push(format!("Enter your project directory using cd {target}"));
    }
    steps.push(format!("Run {dev_command} to start the dev server. CTRL+C to stop."));
    steps.push("Add frameworks like Tailwind using fluide config overrides.".to_string());

    steps
        .into_iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect()
}
