//! Dependency installation and version control setup.

pub mod installer;
pub mod package_manager;
pub mod vcs;

pub use installer::{install, spawn, DependencyInstaller, InstallHandle, ProcessInstaller};
pub use package_manager::PackageManager;
pub use vcs::{GitInitializer, VcsOutcome, VersionControl};
