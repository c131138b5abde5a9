//! Error types for Fluide operations.
//!
//! This module defines [`FluideError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `FluideError` for failures the workflow reacts to differently
//! - Use `anyhow::Error` (via `FluideError::Other`) for unexpected errors
//! - A cancelled prompt is not an error; see [`crate::ui::PromptResult::Cancelled`]

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Fluide operations.
#[derive(Debug, Error)]
pub enum FluideError {
    /// Target directory contains entries outside the allow-list.
    #[error("\"{}\" is not empty! Conflicting entries: {}", path.display(), conflicts.join(", "))]
    DirectoryOccupied {
        path: PathBuf,
        conflicts: Vec<String>,
    },

    /// Template or ref does not exist on the remote.
    #[error("Could not find template {template}!")]
    TemplateNotFound { template: String, third_party: bool },

    /// Template download failed for a reason other than a missing resource.
    #[error("Failed to fetch template: {message}")]
    TemplateFetch { message: String },

    /// An external program could not be run or exited unsuccessfully.
    #[error("[{program}] {message}")]
    Process { program: String, message: String },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Fluide operations.
pub type Result<T> = std::result::Result<T, FluideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_occupied_lists_conflicts() {
        let err = FluideError::DirectoryOccupied {
            path: PathBuf::from("my-theme"),
            conflicts: vec!["package.json".into(), "src".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"my-theme\" is not empty!"));
        assert!(msg.contains("package.json, src"));
    }

    #[test]
    fn template_not_found_displays_template() {
        let err = FluideError::TemplateNotFound {
            template: "acct/missing".into(),
            third_party: true,
        };
        assert_eq!(err.to_string(), "Could not find template acct/missing!");
    }

    #[test]
    fn process_error_displays_program_and_message() {
        let err = FluideError::Process {
            program: "pnpm".into(),
            message: "exited with status 1".into(),
        };
        assert_eq!(err.to_string(), "[pnpm] exited with status 1");
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = FluideError::ConfigParse {
            path: PathBuf::from("/theme/tsconfig.json"),
            message: "unexpected token".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/theme/tsconfig.json"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: FluideError = io_err.into();
        assert!(matches!(err, FluideError::Io(_)));
    }

    #[test]
    fn anyhow_error_is_transparent() {
        let err: FluideError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
