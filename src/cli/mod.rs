//! Command-line interfaces for `create-fluide` and `fluide`.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{BuildArgs, Commands, CompletionsArgs, ConfigArgs, CreateArgs, FluideCli};
pub use commands::{Command, CommandDispatcher, CommandResult, CreateCommand, ProjectContext};
