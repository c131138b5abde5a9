//! GitHub template provider.
//!
//! Checks that the repository (and ref) exist over HTTP, then shallow-fetches
//! the requested ref into a scratch directory with git and copies the template
//! subdirectory into the target.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

use super::fetch::{FetchOptions, TemplateProvider};
use super::reference::{self, TemplateReference};

const GITHUB: &str = "https://github.com";

/// Downloads templates hosted on GitHub.
pub struct GitHubProvider {
    /// Base URL probed for existence (`<web_base>/<owner>/<repo>`).
    web_base: String,
    /// Base URL cloned from (`<git_base>/<owner>/<repo>`).
    git_base: String,
    client: Client,
    git: String,
}

impl GitHubProvider {
    /// Create a provider talking to github.com.
    pub fn new() -> Result<Self> {
        Self::with_base_urls(GITHUB, GITHUB)
    }

    /// Create a provider with custom probe and clone base URLs.
    pub fn with_base_urls(web_base: &str, git_base: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("fluide/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            web_base: web_base.trim_end_matches('/').to_string(),
            git_base: git_base.trim_end_matches('/').to_string(),
            client,
            git: "git".to_string(),
        })
    }

    /// Use a different git executable.
    pub fn with_git(mut self, git: impl Into<String>) -> Self {
        self.git = git.into();
        self
    }

    /// URL checked before cloning.
    pub fn probe_url(&self, template: &TemplateReference) -> String {
        let mut url = format!(
            "{}/{}/{}",
            self.web_base, template.owner, template.repository
        );
        if let Some(git_ref) = &template.git_ref {
            url.push_str("/tree/");
            url.push_str(git_ref);
        }
        url
    }

    /// Fail with a `404` message when the repository or ref is missing.
    ///
    /// Statuses other than 404 are left for git to report.
    pub fn probe(&self, template: &TemplateReference) -> Result<()> {
        let url = self.probe_url(template);
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Failed to reach {}", url))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            bail!("HTTP 404 fetching {}", url);
        }
        tracing::debug!("Probe {} returned {}", url, response.status());
        Ok(())
    }

    fn checkout(&self, template: &TemplateReference, scratch: &Path) -> Result<()> {
        let url = format!(
            "{}/{}/{}",
            self.git_base, template.owner, template.repository
        );
        let refspec = template.git_ref.as_deref().unwrap_or("HEAD");

        fs::create_dir_all(scratch)?;
        self.run_git(scratch, &["init", "--quiet"])?;
        self.run_git(scratch, &["fetch", "--quiet", "--depth", "1", &url, refspec])
            .map_err(|e| {
                let message = e.to_string();
                if message.contains("couldn't find remote ref")
                    || message.contains("Repository not found")
                {
                    anyhow::anyhow!("404 Not Found: {}#{}", url, refspec)
                } else {
                    e
                }
            })?;
        self.run_git(scratch, &["checkout", "--quiet", "FETCH_HEAD"])
    }

    fn run_git(&self, cwd: &Path, args: &[&str]) -> Result<()> {
        tracing::debug!("{} {}", self.git, args.join(" "));
        let output = Command::new(&self.git)
            .args(args)
            .current_dir(cwd)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .with_context(|| format!("Failed to run {}", self.git))?;

        if !output.status.success() {
            bail!(
                "git {} failed: {}",
                args.first().copied().unwrap_or_default(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }

    /// Scratch location for one download.
    ///
    /// Uses a hash of the locator and process to get a unique, deterministic path.
    fn scratch_dir(locator: &str) -> PathBuf {
        let seed = format!(
            "{}:{}:{}",
            locator,
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        );
        let hash = Sha256::digest(seed.as_bytes());
        std::env::temp_dir().join(format!("fluide-{}", hex::encode(&hash[..8])))
    }
}

impl TemplateProvider for GitHubProvider {
    fn download(&self, locator: &str, target: &Path, options: &FetchOptions) -> Result<()> {
        let template = reference::resolve(locator, None);
        if template.owner.is_empty() || template.repository.is_empty() {
            bail!("Invalid template locator: {}", locator);
        }

        self.probe(&template)?;

        let scratch = ScratchDir(Self::scratch_dir(locator));
        self.checkout(&template, &scratch.0)?;

        let source = scratch.0.join(&template.subpath);
        if !source.is_dir() {
            bail!(
                "404 Not Found: {} does not exist in {}/{}",
                template.subpath,
                template.owner,
                template.repository
            );
        }

        copy_tree(&source, target, options.force)
    }
}

/// Removes the scratch checkout when dropped.
struct ScratchDir(PathBuf);

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.0.exists() {
            if let Err(e) = fs::remove_dir_all(&self.0) {
                tracing::warn!("Failed to remove {}: {}", self.0.display(), e);
            }
        }
    }
}

/// Copy `source` into `target`, skipping git metadata.
pub fn copy_tree(source: &Path, target: &Path, force: bool) -> Result<()> {
    fs::create_dir_all(target)
        .with_context(|| format!("Failed to create {}", target.display()))?;

    let walker = WalkDir::new(source)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git");

    for entry in walker {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source)?;
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)?;
        } else {
            if destination.exists() && !force {
                bail!("{} already exists", destination.display());
            }
            fs::copy(entry.path(), &destination).with_context(|| {
                format!("Failed to copy {}", relative.display())
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{fetch, FetchOutcome};
    use httpmock::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn probe_url_includes_ref() {
        let provider = GitHubProvider::new().unwrap();
        let template = reference::resolve("acct/repo#dev", None);
        assert_eq!(
            provider.probe_url(&template),
            "https://github.com/acct/repo/tree/dev"
        );
    }

    #[test]
    fn probe_url_without_ref() {
        let provider = GitHubProvider::with_base_urls("http://localhost:1/", GITHUB).unwrap();
        let template = reference::resolve("acct/repo/sub", None);
        assert_eq!(provider.probe_url(&template), "http://localhost:1/acct/repo");
    }

    #[test]
    fn missing_repository_is_not_found() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/acct/missing");
            then.status(404);
        });

        let provider = GitHubProvider::with_base_urls(&server.base_url(), GITHUB).unwrap();
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("theme");

        let outcome = fetch(&provider, "acct/missing", &target, &FetchOptions::default());

        mock.assert();
        assert_eq!(outcome, FetchOutcome::NotFound);
        assert!(!target.exists());
    }

    #[test]
    fn missing_ref_is_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/acct/repo/tree/nope");
            then.status(404);
        });

        let provider = GitHubProvider::with_base_urls(&server.base_url(), GITHUB).unwrap();
        let temp = TempDir::new().unwrap();

        let outcome = fetch(&provider, "acct/repo#nope", temp.path(), &FetchOptions::default());
        assert_eq!(outcome, FetchOutcome::NotFound);
    }

    #[test]
    fn missing_git_is_other_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/acct/repo");
            then.status(200);
        });

        let provider = GitHubProvider::with_base_urls(&server.base_url(), &server.base_url())
            .unwrap()
            .with_git("fluide-no-such-git-binary");
        let temp = TempDir::new().unwrap();

        let outcome = fetch(&provider, "acct/repo", temp.path(), &FetchOptions::default());
        assert!(matches!(outcome, FetchOutcome::OtherFailure(_)));
    }

    #[test]
    fn invalid_locator_is_rejected() {
        let provider = GitHubProvider::new().unwrap();
        let temp = TempDir::new().unwrap();
        let err = provider
            .download("acct/", temp.path(), &FetchOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("Invalid template locator"));
    }

    #[test]
    fn copy_tree_skips_git_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        fs::create_dir_all(source.join(".git")).unwrap();
        fs::create_dir_all(source.join("sections")).unwrap();
        fs::write(source.join(".git/HEAD"), "ref").unwrap();
        fs::write(source.join("sections/header.liquid"), "new").unwrap();

        let target = temp.path().join("target");
        fs::create_dir_all(target.join("sections")).unwrap();
        fs::write(target.join("sections/header.liquid"), "old").unwrap();

        copy_tree(&source, &target, true).unwrap();

        assert!(!target.join(".git").exists());
        assert_eq!(
            fs::read_to_string(target.join("sections/header.liquid")).unwrap(),
            "new"
        );
    }

    #[test]
    fn copy_tree_without_force_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("README.md"), "new").unwrap();

        let target = temp.path().join("target");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("README.md"), "old").unwrap();

        assert!(copy_tree(&source, &target, false).is_err());
        assert_eq!(fs::read_to_string(target.join("README.md")).unwrap(), "old");
    }
}
