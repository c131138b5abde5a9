//! Interactive prompts.

use std::io;

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::error::{FluideError, Result};

use super::{Prompt, PromptOption, PromptResult, PromptType};

/// Convert dialoguer errors, turning an interrupted read into a cancellation.
fn map_dialoguer_err(e: dialoguer::Error) -> Result<PromptResult> {
    let err: io::Error = e.into();
    if err.kind() == io::ErrorKind::Interrupted {
        return Ok(PromptResult::Cancelled);
    }
    Err(FluideError::Io(err))
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for input.
///
/// Esc/`q` on a confirm or select, and an interrupted read on text input,
/// yield [`PromptResult::Cancelled`].
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Select { options } => prompt_select(prompt, options, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt
        .default
        .as_deref()
        .map(super::parse_bool_answer)
        .unwrap_or(true);

    match Confirm::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on_opt(term)
    {
        Ok(Some(answer)) => Ok(PromptResult::Bool(answer)),
        Ok(None) => Ok(PromptResult::Cancelled),
        Err(e) => map_dialoguer_err(e),
    }
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = prompt_theme();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(&prompt.question)
        .allow_empty(true);

    if let Some(default) = &prompt.default {
        input = input.default(default.clone());
    }

    match input.interact_text_on(term) {
        Ok(answer) => Ok(PromptResult::String(answer.trim().to_string())),
        Err(e) => map_dialoguer_err(e),
    }
}

fn prompt_select(prompt: &Prompt, options: &[PromptOption], term: &Term) -> Result<PromptResult> {
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();

    let default_idx = prompt
        .default
        .as_ref()
        .and_then(|d| options.iter().position(|o| o.value == *d))
        .unwrap_or(0);

    match Select::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(default_idx)
        .interact_on_opt(term)
    {
        Ok(Some(selection)) => Ok(PromptResult::String(options[selection].value.clone())),
        Ok(None) => Ok(PromptResult::Cancelled),
        Err(e) => map_dialoguer_err(e),
    }
}
