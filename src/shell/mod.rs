//! External program execution and environment checks.

pub mod command;

pub use command::{
    execute, execute_streaming, node_program, spawn_streaming, CommandOptions, CommandResult,
    OutputLine, StreamingCommand,
};

/// Check if running in CI.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running on Windows.
pub fn is_windows() -> bool {
    cfg!(target_os = "windows")
}
