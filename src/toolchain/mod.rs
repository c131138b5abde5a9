//! TypeScript configuration reconciliation.

pub mod document;
pub mod preset;
pub mod reconcile;

pub use document::{ConfigDocument, DocumentError};
pub use preset::{TypescriptPreset, TOOLCHAIN_ROOT};
pub use reconcile::{reconcile, ReconcileOutcome, CONFIG_FILE};
