//! Applies a preset to the project's `tsconfig.json`.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use super::document::ConfigDocument;
use super::preset::TypescriptPreset;
use crate::error::Result;

/// Configuration file reconciled inside the project directory.
pub const CONFIG_FILE: &str = "tsconfig.json";

/// What [`reconcile`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No config existed; a new one was written.
    Created,
    /// The existing config's `extends` was set.
    Updated,
    /// The existing config could not be parsed and was left untouched.
    Malformed(String),
}

/// Set `extends` in `<cwd>/tsconfig.json` to the preset's path.
///
/// Only a read or write failure is an error; an unparsable file is reported
/// through [`ReconcileOutcome::Malformed`].
pub fn reconcile(cwd: &Path, preset: TypescriptPreset) -> Result<ReconcileOutcome> {
    let path = cwd.join(CONFIG_FILE);
    let extends = Value::String(preset.extends_path());

    let (mut document, outcome) = match fs::read_to_string(&path) {
        Ok(source) => match ConfigDocument::parse(&source) {
            Ok(document) => (document, ReconcileOutcome::Updated),
            Err(e) => {
                tracing::warn!("Leaving {} untouched: {}", path.display(), e);
                return Ok(ReconcileOutcome::Malformed(e.to_string()));
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            (ConfigDocument::empty(), ReconcileOutcome::Created)
        }
        Err(e) => return Err(e.into()),
    };

    if let Err(e) = document.set("extends", &extends) {
        return Ok(ReconcileOutcome::Malformed(e.to_string()));
    }
    fs::write(&path, document.as_str())?;

    tracing::info!("Set extends to {} in {}", extends, path.display());
    Ok(outcome)
}
