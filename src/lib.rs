//! Fluide - Shopify theme project scaffolding and build configuration.
//!
//! `create-fluide` walks through creating a theme project from a template:
//! picking a directory, downloading and cleaning the template, installing
//! dependencies, initializing git and applying a TypeScript preset.
//! `fluide` generates the build engine configuration for such a project.
//!
//! # Modules
//!
//! - [`build`] - Build configuration generation and the build engine
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`install`] - Package manager detection, dependency install, git init
//! - [`project`] - Directory validation and project names
//! - [`shell`] - Process execution
//! - [`template`] - Template resolution, download and cleanup
//! - [`toolchain`] - `tsconfig.json` presets and format-preserving edits
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//! - [`workflow`] - The project initialization state machine
//!
//! # Example
//!
//! ```
//! use fluide::template::resolve;
//!
//! let template = resolve("acct/repo#dev", None);
//! assert!(template.is_third_party);
//! assert_eq!(template.locator(), "acct/repo#dev");
//! ```

pub mod build;
pub mod cli;
pub mod error;
pub mod install;
pub mod project;
pub mod shell;
pub mod template;
pub mod toolchain;
pub mod ui;
pub mod workflow;

pub use error::{FluideError, Result};
