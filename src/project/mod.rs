//! Project directory checks and naming.

pub mod directory;
pub mod name;

pub use directory::{is_allowed_entry, validate, verdict_for, DirectoryVerdict};
pub use name::generate_project_name;
