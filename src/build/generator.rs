//! Build configuration generation.
//!
//! [`generate`] derives the build engine's defaults from the project layout and
//! the dev server settings. [`resolve`] layers the user's overrides on top.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use walkdir::WalkDir;

use super::merger::merge_config;
use super::options::{ProjectOptions, ServerSettings};
use crate::error::Result;

/// Manifest file written into the output directory.
pub const MANIFEST_FILE: &str = "fluide.manifest.json";

/// Environment variable prefixes exposed to client code.
pub const ENV_PREFIXES: &[&str] = &["VITE_", "PUBLIC_", "FLUIDE_"];

/// Generated build engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfiguration {
    pub base: String,
    pub env_prefix: Vec<String>,
    pub public_dir: bool,
    pub build: BuildSection,
    pub resolve: ResolveSection,
    pub server: ServerSection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSection {
    pub out_dir: String,
    pub assets_dir: String,
    pub manifest: String,
    pub module_preload: ModulePreload,
    pub rollup_options: RollupOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModulePreload {
    pub polyfill: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollupOptions {
    /// Entry points, relative to the project with `/` separators.
    pub input: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveSection {
    pub alias: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSection {
    pub host: String,
    pub https: bool,
    pub port: u16,
    pub origin: String,
    pub strict_port: bool,
    pub hmr: HmrSection,
    pub watch: WatchSection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HmrSection {
    pub host: String,
    pub port: u16,
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchSection {
    pub ignored: Vec<String>,
}

impl BuildConfiguration {
    /// `<protocol>//<host>:<port>` of the dev server.
    pub fn origin(&self) -> &str {
        &self.server.origin
    }

    pub fn entry_points(&self) -> &[String] {
        &self.build.rollup_options.input
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self).map_err(anyhow::Error::from)?)
    }
}

/// Generate the default build configuration.
///
/// Reads the entry points directory but never writes.
pub fn generate(options: &ProjectOptions, server: &ServerSettings) -> BuildConfiguration {
    let root = absolute(&options.resolve_path(&options.root));
    let source_dir = display_path(&absolute(&options.resolve_path(&options.source_dir)));

    let alias = ["~", "@"]
        .iter()
        .map(|symbol| (symbol.to_string(), source_dir.clone()))
        .collect();

    BuildConfiguration {
        base: "./".to_string(),
        env_prefix: ENV_PREFIXES.iter().map(|p| p.to_string()).collect(),
        public_dir: false,
        build: BuildSection {
            out_dir: display_path(&root.join("assets")),
            assets_dir: String::new(),
            manifest: MANIFEST_FILE.to_string(),
            module_preload: ModulePreload { polyfill: true },
            rollup_options: RollupOptions {
                input: discover_entry_points(options),
            },
        },
        resolve: ResolveSection { alias },
        server: ServerSection {
            host: server.host.clone(),
            https: server.https,
            port: server.port,
            origin: server.origin(),
            strict_port: true,
            hmr: HmrSection {
                host: server.host.clone(),
                port: server.port,
                protocol: server.socket_protocol().to_string(),
            },
            watch: WatchSection {
                ignored: vec![
                    "assets/*".to_string(),
                    format!("snippets/{}.liquid", options.snippet_name),
                ],
            },
        },
    }
}

/// Generate the defaults and merge the user's overrides over them.
pub fn resolve(options: &ProjectOptions) -> Result<Value> {
    let generated = generate(options, &options.server()).to_value()?;
    let merged = merge_config(&generated, &options.overrides);
    tracing::debug!("Resolved build configuration: {}", merged);
    Ok(merged)
}

/// Files under the entry points directory, sorted.
///
/// A missing directory yields no entries.
pub fn discover_entry_points(options: &ProjectOptions) -> Vec<String> {
    let dir = options.resolve_path(&options.entrypoints_dir);
    let mut entries: Vec<String> = WalkDir::new(&dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping entry point candidate: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(&dir)
                .ok()
                .map(|relative| options.entrypoints_dir.join(relative))
        })
        .map(|path| to_slash(&path))
        .collect();

    entries.sort();
    entries
}

fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    normalize(&joined)
}

/// Lexically remove `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

fn to_slash(path: &Path) -> String {
    let normalized = normalize(path);
    normalized
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
