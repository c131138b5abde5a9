//! Project build options loaded from `fluide.config.yml`.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FluideError, Result};

/// Options file at the project root.
pub const CONFIG_FILE: &str = "fluide.config.yml";

/// Static project layout plus user overrides for the build engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProjectOptions {
    /// Theme root; built assets go to `<root>/assets`.
    pub root: PathBuf,

    /// Source directory aliased as `~` and `@`.
    pub source_dir: PathBuf,

    /// Directory scanned recursively for bundle entry points.
    pub entrypoints_dir: PathBuf,

    /// Name of the snippet that loads the bundle. Ignored by the dev server watcher.
    pub snippet_name: String,

    /// Build engine configuration merged over the generated defaults.
    pub overrides: Value,

    /// Directory the paths above are relative to.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            source_dir: PathBuf::from("frontend"),
            entrypoints_dir: PathBuf::from("frontend/entrypoints"),
            snippet_name: "fluide-tag".to_string(),
            overrides: Value::Object(Map::new()),
            base_dir: PathBuf::from("."),
        }
    }
}

impl ProjectOptions {
    /// Defaults rooted at `base_dir`.
    pub fn in_dir(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            ..Default::default()
        }
    }

    /// Load `fluide.config.yml` from `project_root`, or defaults if it is absent.
    pub fn load(project_root: &Path) -> Result<Self> {
        match Self::load_file(&project_root.join(CONFIG_FILE)) {
            Err(FluideError::ConfigNotFound { .. }) => {
                tracing::debug!("No {} in {}, using defaults", CONFIG_FILE, project_root.display());
                Ok(Self::in_dir(project_root))
            }
            other => other,
        }
    }

    /// Load an options file. Paths inside it are relative to its directory.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FluideError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                FluideError::Io(e)
            }
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&content, path, base_dir)
    }

    /// Parse YAML options; `source_path` is used for error reporting.
    pub fn parse(content: &str, source_path: &Path, base_dir: &Path) -> Result<Self> {
        // An empty file deserializes as null
        if content.trim().is_empty() {
            return Ok(Self::in_dir(base_dir));
        }

        let mut options: Self =
            serde_yaml::from_str(content).map_err(|e| FluideError::ConfigParse {
                path: source_path.to_path_buf(),
                message: e.to_string(),
            })?;

        if options.overrides.is_null() {
            options.overrides = Value::Object(Map::new());
        }
        if !options.overrides.is_object() {
            return Err(FluideError::ConfigParse {
                path: source_path.to_path_buf(),
                message: "overrides must be a mapping".to_string(),
            });
        }

        options.base_dir = base_dir.to_path_buf();
        Ok(options)
    }

    /// Resolve a configured path against the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Dev server settings taken from `overrides.server`.
    pub fn server(&self) -> ServerSettings {
        ServerSettings::from_overrides(&self.overrides)
    }
}

/// Dev server settings the generated configuration depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub https: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5173,
            https: false,
        }
    }
}

impl ServerSettings {
    /// Read `server.host`, `server.port` and `server.https`, falling back to defaults.
    ///
    /// TLS counts as enabled only for a literal `true`.
    pub fn from_overrides(overrides: &Value) -> Self {
        let defaults = Self::default();
        let server = overrides.get("server");
        let field = |name: &str| server.and_then(|s| s.get(name));

        Self {
            host: field("host")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or(defaults.host),
            port: field("port")
                .and_then(Value::as_u64)
                .and_then(|p| u16::try_from(p).ok())
                .unwrap_or(defaults.port),
            https: field("https").and_then(Value::as_bool).unwrap_or(false),
        }
    }

    pub fn protocol(&self) -> &'static str {
        if self.https {
            "https:"
        } else {
            "http:"
        }
    }

    pub fn socket_protocol(&self) -> &'static str {
        if self.https {
            "wss"
        } else {
            "ws"
        }
    }

    /// `<protocol>//<host>:<port>`
    pub fn origin(&self) -> String {
        format!("{}//{}:{}", self.protocol(), self.host, self.port)
    }
}

/// JSON Schema for `fluide.config.yml`.
pub fn json_schema() -> Value {
    let schema = schemars::schema_for!(ProjectOptions);
    serde_json::to_value(&schema).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let options = ProjectOptions::load(temp.path()).unwrap();
        assert_eq!(options.source_dir, PathBuf::from("frontend"));
        assert_eq!(options.entrypoints_dir, PathBuf::from("frontend/entrypoints"));
        assert_eq!(options.snippet_name, "fluide-tag");
        assert_eq!(options.base_dir, temp.path());
    }

    #[test]
    fn loads_yaml_with_partial_fields() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "source_dir: src\nsnippet_name: vite-tag\noverrides:\n  server:\n    port: 3000\n",
        )
        .unwrap();

        let options = ProjectOptions::load(temp.path()).unwrap();
        assert_eq!(options.source_dir, PathBuf::from("src"));
        assert_eq!(options.snippet_name, "vite-tag");
        assert_eq!(options.root, PathBuf::from("."));
        assert_eq!(options.server().port, 3000);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "\n").unwrap();
        let options = ProjectOptions::load(temp.path()).unwrap();
        assert_eq!(options.overrides, json!({}));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "root: [unclosed").unwrap();
        assert!(matches!(
            ProjectOptions::load(temp.path()),
            Err(FluideError::ConfigParse { .. })
        ));
    }

    #[test]
    fn non_mapping_overrides_are_rejected() {
        let err = ProjectOptions::parse("overrides: [1, 2]", Path::new(CONFIG_FILE), Path::new("."))
            .unwrap_err();
        assert!(err.to_string().contains("overrides must be a mapping"));
    }

    #[test]
    fn load_file_reports_missing_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("other.yml");
        assert!(matches!(
            ProjectOptions::load_file(&path),
            Err(FluideError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn server_defaults() {
        let server = ServerSettings::from_overrides(&json!({}));
        assert_eq!(server, ServerSettings::default());
        assert_eq!(server.origin(), "http://localhost:5173");
        assert_eq!(server.socket_protocol(), "ws");
    }

    #[test]
    fn server_with_tls() {
        let server = ServerSettings::from_overrides(&json!({
            "server": { "host": "127.0.0.1", "port": 8443, "https": true }
        }));
        assert_eq!(server.origin(), "https://127.0.0.1:8443");
        assert_eq!(server.socket_protocol(), "wss");
    }

    #[test]
    fn tls_object_is_not_enabled() {
        let server = ServerSettings::from_overrides(&json!({
            "server": { "https": { "cert": "dev.pem" } }
        }));
        assert!(!server.https);
        assert_eq!(server.protocol(), "http:");
    }

    #[test]
    fn schema_describes_fields() {
        let schema = json_schema();
        let properties = &schema["properties"];
        assert!(properties.get("source_dir").is_some());
        assert!(properties.get("overrides").is_some());
        assert!(properties.get("base_dir").is_none());
    }
}
