//! Template resolution, download and cleanup.
//!
//! - [`reference`] turns a template identifier into a [`TemplateReference`]
//! - [`fetch`] classifies downloads performed by a [`TemplateProvider`]
//! - [`github`] is the provider used by the CLI
//! - [`cleaner`] removes editor-only files after a download

pub mod catalog;
pub mod cleaner;
pub mod fetch;
pub mod github;
pub mod reference;

pub use catalog::{default_template, template_options, TEMPLATES};
pub use cleaner::{clean, FILES_TO_REMOVE};
pub use fetch::{classify, fetch, FetchOptions, FetchOutcome, TemplateProvider};
pub use github::GitHubProvider;
pub use reference::{resolve, TemplateReference};
