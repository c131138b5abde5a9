//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses and cancellations.
//!
//! # Example
//!
//! ```
//! use fluide::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("template", "starter");
//!
//! // Use ui in code under test...
//! ui.message("Copying theme files");
//! ui.success("Theme copied!");
//!
//! // Assert on captured interactions
//! assert!(ui.messages().contains(&"Copying theme files".to_string()));
//! assert!(ui.successes().contains(&"Theme copied!".to_string()));
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use crate::error::Result;

use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

type SpinnerLog = Rc<RefCell<Vec<(String, SpinnerStatus)>>>;

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured prompt responses.
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked multiple times.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    spinner_outcomes: SpinnerLog,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    cancelled_prompts: HashSet<String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new interactive MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            interactive: true,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            interactive: true,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or the prompt default.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Make the prompt with this key report a user cancellation.
    pub fn cancel_prompt(&mut self, key: &str) {
        self.cancelled_prompts.insert(key.to_string());
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get the final message and status of every finished spinner.
    pub fn spinner_outcomes(&self) -> Vec<(String, SpinnerStatus)> {
        self.spinner_outcomes.borrow().clone()
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown, directly or by a spinner.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
            || self
                .spinner_outcomes
                .borrow()
                .iter()
                .any(|(m, status)| *status == SpinnerStatus::Success && m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown, directly or by a spinner.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
            || self
                .spinner_outcomes
                .borrow()
                .iter()
                .any(|(m, status)| *status == SpinnerStatus::Error && m.contains(msg))
    }

    /// Check if a spinner finished as skipped with this message.
    pub fn has_skipped(&self, msg: &str) -> bool {
        self.spinner_outcomes
            .borrow()
            .iter()
            .any(|(m, status)| *status == SpinnerStatus::Skipped && m.contains(msg))
    }

    /// Clear all captured interactions.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.successes.clear();
        self.warnings.clear();
        self.errors.clear();
        self.headers.clear();
        self.spinners.clear();
        self.spinner_outcomes.borrow_mut().clear();
        self.prompts_shown.clear();
    }

    fn typed(prompt: &Prompt, response: &str) -> PromptResult {
        if matches!(prompt.prompt_type, PromptType::Confirm) {
            PromptResult::Bool(super::parse_bool_answer(response))
        } else {
            PromptResult::String(response.to_string())
        }
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        if self.cancelled_prompts.contains(&prompt.key) {
            return Ok(PromptResult::Cancelled);
        }

        if let Some(response) = self
            .prompt_queues
            .get_mut(&prompt.key)
            .and_then(|queue| queue.pop_front())
        {
            return Ok(Self::typed(prompt, &response));
        }

        if let Some(response) = self.prompt_responses.get(&prompt.key) {
            return Ok(Self::typed(prompt, response));
        }

        if let Some(default) = &prompt.default {
            return Ok(Self::typed(prompt, default));
        }

        // Type-appropriate empty answer as a last resort
        if matches!(prompt.prompt_type, PromptType::Confirm) {
            return Ok(PromptResult::Bool(false));
        }
        Ok(PromptResult::String(String::new()))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::recording(Rc::clone(&self.spinner_outcomes)))
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that captures messages and its final state.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
    log: Option<SpinnerLog>,
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
    /// Finished as skipped.
    Skipped,
}

impl MockSpinner {
    /// Create a new standalone mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    fn recording(log: SpinnerLog) -> Self {
        Self {
            log: Some(log),
            ..Default::default()
        }
    }

    /// Get all messages set during spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// Get the final status.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }

    fn finish(&mut self, msg: &str, status: SpinnerStatus) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(status);
        if let Some(log) = &self.log {
            log.borrow_mut().push((msg.to_string(), status));
        }
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish(msg, SpinnerStatus::Success);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(msg, SpinnerStatus::Error);
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.finish(msg, SpinnerStatus::Skipped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    fn input(key: &str, default: Option<&str>) -> Prompt {
        Prompt {
            key: key.to_string(),
            question: "Where?".to_string(),
            prompt_type: PromptType::Input,
            default: default.map(String::from),
        }
    }

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();

        ui.message("Hello");
        ui.success("Done");
        ui.warning("Be careful");
        ui.error("Oops");

        assert_eq!(ui.messages(), &["Hello"]);
        assert_eq!(ui.successes(), &["Done"]);
        assert_eq!(ui.warnings(), &["Be careful"]);
        assert_eq!(ui.errors(), &["Oops"]);
    }

    #[test]
    fn mock_ui_prompt_with_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("directory", "my-theme");

        let result = ui.prompt(&input("directory", None)).unwrap();
        assert_eq!(result.as_string(), "my-theme");
        assert_eq!(ui.prompts_shown(), &["directory"]);
    }

    #[test]
    fn mock_ui_prompt_falls_back_to_default() {
        let mut ui = MockUI::new();
        let result = ui.prompt(&input("directory", Some("fluffy-flare"))).unwrap();
        assert_eq!(result.as_string(), "fluffy-flare");
    }

    #[test]
    fn mock_ui_queue_then_fallback() {
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("directory", vec!["taken", "free"]);
        ui.set_prompt_response("directory", "fallback");

        let prompt = input("directory", None);
        assert_eq!(ui.prompt(&prompt).unwrap().as_string(), "taken");
        assert_eq!(ui.prompt(&prompt).unwrap().as_string(), "free");
        assert_eq!(ui.prompt(&prompt).unwrap().as_string(), "fallback");
    }

    #[test]
    fn mock_ui_cancelled_prompt() {
        let mut ui = MockUI::new();
        ui.cancel_prompt("template");

        let prompt = Prompt {
            key: "template".to_string(),
            question: "Template?".to_string(),
            prompt_type: PromptType::Select {
                options: vec![PromptOption::new("Starter", "starter")],
            },
            default: Some("starter".to_string()),
        };
        assert!(ui.prompt(&prompt).unwrap().is_cancelled());
        assert_eq!(ui.prompts_shown(), &["template"]);
    }

    #[test]
    fn mock_ui_confirm_parses_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("install", "no");

        let prompt = Prompt {
            key: "install".to_string(),
            question: "Install?".to_string(),
            prompt_type: PromptType::Confirm,
            default: Some("true".to_string()),
        };
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(false));
    }

    #[test]
    fn mock_ui_records_spinner_outcomes() {
        let mut ui = MockUI::new();

        let mut spinner = ui.start_spinner("Installing packages...");
        spinner.set_message("[npm] added 10 packages");
        spinner.finish_success("Packages installed!");

        assert_eq!(ui.spinners(), &["Installing packages..."]);
        assert!(ui.has_success("Packages installed!"));
        assert_eq!(
            ui.spinner_outcomes(),
            vec![("Packages installed!".to_string(), SpinnerStatus::Success)]
        );
    }

    #[test]
    fn mock_ui_clear_resets() {
        let mut ui = MockUI::new();

        ui.message("test");
        ui.success("done");
        ui.clear();

        assert!(ui.messages().is_empty());
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn standalone_spinner_tracks_status() {
        let mut spinner = MockSpinner::new();
        spinner.finish_skipped("skipped");
        assert_eq!(spinner.status(), Some(SpinnerStatus::Skipped));
        assert_eq!(spinner.finish_message(), Some("skipped"));
    }
}
