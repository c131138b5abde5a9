//! Package manager detection.

use std::fmt;

/// Environment variable set by npm, pnpm, yarn and bun when running a package binary.
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

const DEFAULT_MANAGER: &str = "npm";

/// The package manager used to install dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    name: String,
}

impl PackageManager {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Detect the package manager that launched this process.
    pub fn detect() -> Self {
        Self::from_user_agent(std::env::var(USER_AGENT_ENV).ok().as_deref())
    }

    /// Parse a user agent like `pnpm/9.1.0 npm/? node/v20.11.0 linux x64`.
    ///
    /// Falls back to npm when the agent is absent or unparsable.
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let name = user_agent
            .and_then(|ua| ua.split_whitespace().next())
            .and_then(|spec| spec.split('/').next())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_MANAGER);
        Self::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Command that starts the development server.
    pub fn dev_command(&self) -> String {
        if self.name == "npm" {
            "npm run dev".to_string()
        } else {
            format!("{} dev", self.name)
        }
    }
}

impl Default for PackageManager {
    fn default() -> Self {
        Self::new(DEFAULT_MANAGER)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
