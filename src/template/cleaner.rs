//! Post-fetch cleanup.
//!
//! Some template files only matter to the online editor. They are removed
//! concurrently after a fetch; a file that is not there is not an error.

use std::fs;
use std::io;
use std::path::Path;
use std::thread;

use crate::error::{FluideError, Result};

/// Files removed from every freshly fetched template.
pub const FILES_TO_REMOVE: &[&str] = &[".theme-check.yml", "CHANGELOG.md"];

/// Remove [`FILES_TO_REMOVE`] from `target`.
pub fn clean(target: &Path) -> Result<Vec<String>> {
    remove_files(target, FILES_TO_REMOVE)
}

/// Remove `files` from `target` concurrently.
///
/// Every removal is attempted. Returns the names actually removed, or the
/// first failure (in `files` order) once all attempts have finished.
pub fn remove_files(target: &Path, files: &[&str]) -> Result<Vec<String>> {
    let results: Vec<(&str, io::Result<bool>)> = thread::scope(|scope| {
        let handles: Vec<_> = files
            .iter()
            .map(|name| {
                let path = target.join(name);
                (*name, scope.spawn(move || remove_if_present(&path)))
            })
            .collect();

        handles
            .into_iter()
            .map(|(name, handle)| {
                let result = handle.join().unwrap_or_else(|_| {
                    Err(io::Error::other(format!("removal of {name} panicked")))
                });
                (name, result)
            })
            .collect()
    });

    let mut removed = Vec::new();
    let mut first_error = None;
    for (name, result) in results {
        match result {
            Ok(true) => {
                tracing::debug!("Removed {}", name);
                removed.push(name.to_string());
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("Failed to remove {}: {}", name, e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(FluideError::Io(e)),
        None => Ok(removed),
    }
}

fn remove_if_present(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
