//! Template identifier resolution.
//!
//! A template identifier is either first-party (`minimal`), resolved inside
//! the fixed example repository, or third-party (`acct/repo/sub/dir`), used
//! as given. Either form may carry a `#ref` suffix; an explicit commit
//! passed separately takes precedence over it.

use std::fmt;

/// Owner of the repository holding first-party templates.
pub const FIRST_PARTY_OWNER: &str = "withastro";
/// Repository holding first-party templates.
pub const FIRST_PARTY_REPOSITORY: &str = "astro";
/// Directory of first-party templates inside the repository.
pub const FIRST_PARTY_SUBPATH: &str = "examples";
/// Ref used for first-party templates when none is requested.
pub const FIRST_PARTY_REF: &str = "latest";

const NAMESPACE_SEPARATOR: char = '/';
const REF_SEPARATOR: char = '#';

/// A resolved remote template location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateReference {
    pub owner: String,
    pub repository: String,
    /// Path inside the repository, empty for the repository root.
    pub subpath: String,
    pub git_ref: Option<String>,
    /// Set when the identifier named its own namespace. Only changes error wording.
    pub is_third_party: bool,
}

impl TemplateReference {
    /// Locator in the form `<owner>/<repo>/<subpath>#<ref>`.
    pub fn locator(&self) -> String {
        let mut locator = format!("{}/{}", self.owner, self.repository);
        if !self.subpath.is_empty() {
            locator.push(NAMESPACE_SEPARATOR);
            locator.push_str(&self.subpath);
        }
        if let Some(git_ref) = &self.git_ref {
            locator.push(REF_SEPARATOR);
            locator.push_str(git_ref);
        }
        locator
    }
}

impl fmt::Display for TemplateReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.locator())
    }
}

/// Resolve a template identifier and optional commit into a reference.
pub fn resolve(identifier: &str, commit: Option<&str>) -> TemplateReference {
    let identifier = identifier.trim();
    let (path, inline_ref) = match identifier.split_once(REF_SEPARATOR) {
        Some((path, r)) if !r.is_empty() => (path, Some(r)),
        Some((path, _)) => (path, None),
        None => (identifier, None),
    };
    let requested_ref = commit
        .filter(|c| !c.is_empty())
        .or(inline_ref)
        .map(String::from);

    // A slash inside the ref (`starter#feature/x`) does not name a namespace.
    if !path.contains(NAMESPACE_SEPARATOR) {
        return TemplateReference {
            owner: FIRST_PARTY_OWNER.to_string(),
            repository: FIRST_PARTY_REPOSITORY.to_string(),
            subpath: format!("{}/{}", FIRST_PARTY_SUBPATH, path),
            git_ref: requested_ref.or_else(|| Some(FIRST_PARTY_REF.to_string())),
            is_third_party: false,
        };
    }

    let mut segments = path.trim_matches(NAMESPACE_SEPARATOR).splitn(3, NAMESPACE_SEPARATOR);
    let owner = segments.next().unwrap_or_default().to_string();
    let repository = segments.next().unwrap_or_default().to_string();
    let subpath = segments
        .next()
        .unwrap_or_default()
        .trim_matches(NAMESPACE_SEPARATOR)
        .to_string();

    TemplateReference {
        owner,
        repository,
        subpath,
        git_ref: requested_ref,
        is_third_party: true,
    }
}
