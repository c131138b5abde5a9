//! Build configuration for theme projects.
//!
//! Project layout comes from [`ProjectOptions`]. [`generate`] turns it into the
//! build engine's defaults, [`resolve`] merges the user's overrides over them,
//! and a [`BuildEngine`] bundles the project with the result.

pub mod engine;
pub mod generator;
pub mod log;
pub mod merger;
pub mod options;

pub use engine::{run_build, BuildEngine, ViteBuildEngine, BUILD_COMPLETE};
pub use generator::{discover_entry_points, generate, resolve, BuildConfiguration};
pub use log::{LogLevel, LogSink, PrefixedLogSink, RecordingLogSink};
pub use merger::merge_config;
pub use options::{json_schema, ProjectOptions, ServerSettings, CONFIG_FILE};
