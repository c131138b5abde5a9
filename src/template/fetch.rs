//! Template download and failure classification.

use std::path::Path;

use anyhow::Result;

/// Options passed to a [`TemplateProvider`].
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Overwrite files that already exist in the target directory.
    pub force: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { force: true }
    }
}

/// Result of fetching a template into a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success,
    /// The template, repository or ref does not exist.
    NotFound,
    OtherFailure(String),
}

/// A remote source that can copy a template into a local directory.
///
/// Implementations report failures through their error message only; a
/// missing resource must mention `404` or `not found`.
pub trait TemplateProvider {
    fn download(&self, locator: &str, target: &Path, options: &FetchOptions) -> Result<()>;
}

/// Fetch `locator` into `target` and classify any failure.
pub fn fetch(
    provider: &dyn TemplateProvider,
    locator: &str,
    target: &Path,
    options: &FetchOptions,
) -> FetchOutcome {
    match provider.download(locator, target, options) {
        Ok(()) => {
            tracing::info!("Fetched {} into {}", locator, target.display());
            FetchOutcome::Success
        }
        Err(e) => {
            let message = format!("{e:#}");
            tracing::debug!("Fetching {} failed: {}", locator, message);
            classify(&message)
        }
    }
}

/// Map a provider error message to an outcome.
pub fn classify(message: &str) -> FetchOutcome {
    let lower = message.to_lowercase();
    if lower.contains("404") || lower.contains("not found") {
        FetchOutcome::NotFound
    } else {
        FetchOutcome::OtherFailure(message.to_string())
    }
}
