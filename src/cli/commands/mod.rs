//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! `fluide` subcommands are routed by [`CommandDispatcher`]. `create-fluide`
//! has no subcommands and runs [`create::CreateCommand`] directly.

pub mod build;
pub mod completions;
pub mod config;
pub mod create;
pub mod dispatcher;
pub mod schema;

pub use create::CreateCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult, ProjectContext};
