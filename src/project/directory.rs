//! Target directory validation.
//!
//! A project directory is usable when it does not exist yet, or when every
//! entry in it is on the allow-list: editor and VCS metadata, common log
//! files, and license/readme/docs.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;

/// Entry names that never conflict with a new project.
pub const ALLOWED_ENTRIES: &[&str] = &[
    ".DS_Store",
    ".git",
    ".gitattributes",
    ".gitignore",
    ".gitlab-ci.yml",
    ".hg",
    ".hgcheck",
    ".hgignore",
    ".idea",
    ".npmignore",
    ".travis.yml",
    ".yarn",
    ".yarnrc.yml",
    "docs",
    "LICENSE",
    "mkdocs.yml",
    "Thumbs.db",
];

/// Entry name patterns that never conflict with a new project.
pub const ALLOWED_PATTERNS: &[&str] = &[
    r"\.iml$",
    r"^npm-debug\.log",
    r"^yarn-debug\.log",
    r"^yarn-error\.log",
    r"^README",
    r"^LICENSE",
];

fn allowed_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ALLOWED_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    })
}

/// Whether a single directory entry name is on the allow-list.
pub fn is_allowed_entry(name: &str) -> bool {
    ALLOWED_ENTRIES.contains(&name) || allowed_patterns().iter().any(|re| re.is_match(name))
}

/// Outcome of validating a target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryVerdict {
    pub is_valid: bool,
    /// Entries outside the allow-list, sorted by name.
    pub conflicting_entries: Vec<String>,
}

impl DirectoryVerdict {
    fn from_conflicts(conflicting_entries: Vec<String>) -> Self {
        Self {
            is_valid: conflicting_entries.is_empty(),
            conflicting_entries,
        }
    }
}

/// Validate a target directory.
///
/// A missing path is valid. Listing failures (permissions, path is a file)
/// are returned as errors.
pub fn validate(path: &Path) -> Result<DirectoryVerdict> {
    if !path.exists() {
        return Ok(DirectoryVerdict::from_conflicts(Vec::new()));
    }

    let mut conflicts = Vec::new();
    for entry in fs::read_dir(path)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if !is_allowed_entry(&name) {
            conflicts.push(name);
        }
    }
    conflicts.sort();

    tracing::debug!(
        path = %path.display(),
        conflicts = conflicts.len(),
        "Validated project directory"
    );

    Ok(DirectoryVerdict::from_conflicts(conflicts))
}

/// Like [`validate`], treating an unreadable path as occupied by itself.
pub fn verdict_for(path: &Path) -> DirectoryVerdict {
    validate(path).unwrap_or_else(|e| {
        tracing::debug!("Cannot list {}: {}", path.display(), e);
        DirectoryVerdict::from_conflicts(vec![path.display().to_string()])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_directory_is_valid() {
        let temp = TempDir::new().unwrap();
        let verdict = validate(&temp.path().join("new-theme")).unwrap();
        assert!(verdict.is_valid);
        assert!(verdict.conflicting_entries.is_empty());
    }

    #[test]
    fn empty_directory_is_valid() {
        let temp = TempDir::new().unwrap();
        assert!(validate(temp.path()).unwrap().is_valid);
    }

    #[test]
    fn vcs_metadata_and_readme_are_allowed() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join("README"), "hi").unwrap();
        fs::write(temp.path().join("README.md"), "hi").unwrap();
        fs::write(temp.path().join("LICENSE.txt"), "MIT").unwrap();

        assert!(validate(temp.path()).unwrap().is_valid);
    }

    #[test]
    fn log_files_and_editor_files_are_allowed() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("npm-debug.log.1234"), "").unwrap();
        fs::write(temp.path().join("yarn-error.log"), "").unwrap();
        fs::write(temp.path().join("theme.iml"), "").unwrap();
        fs::create_dir(temp.path().join(".idea")).unwrap();

        assert!(validate(temp.path()).unwrap().is_valid);
    }

    #[test]
    fn source_directory_conflicts() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();

        let verdict = validate(temp.path()).unwrap();
        assert!(!verdict.is_valid);
        assert_eq!(verdict.conflicting_entries, vec!["src".to_string()]);
    }

    #[test]
    fn conflicts_are_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();
        fs::write(temp.path().join("index.html"), "").unwrap();

        let verdict = validate(temp.path()).unwrap();
        assert_eq!(
            verdict.conflicting_entries,
            vec!["index.html".to_string(), "package.json".to_string()]
        );
    }

    #[test]
    fn validation_is_repeatable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();

        assert_eq!(validate(temp.path()).unwrap(), validate(temp.path()).unwrap());
        assert!(temp.path().join("package.json").exists());
    }

    #[test]
    fn patterns_do_not_match_unrelated_names() {
        assert!(!is_allowed_entry("my-npm-debug.log"));
        assert!(!is_allowed_entry("gitignore"));
        assert!(is_allowed_entry(".gitignore"));
    }

    #[test]
    fn unreadable_path_is_a_conflict() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("theme");
        fs::write(&file, "not a directory").unwrap();

        let verdict = verdict_for(&file);
        assert!(!verdict.is_valid);
    }
}
