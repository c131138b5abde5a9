//! TypeScript presets.

use std::fmt;
use std::str::FromStr;

use crate::ui::PromptOption;

/// Package providing the preset configurations.
pub const TOOLCHAIN_ROOT: &str = "astro/tsconfigs";

/// Preset chosen for the project's TypeScript configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TypescriptPreset {
    Strict,
    Strictest,
    /// The relaxed preset.
    Base,
    /// Ask for guidance. Resolves to [`TypescriptPreset::Base`].
    Unsure,
}

impl TypescriptPreset {
    /// Preset used when the user accepts defaults.
    pub const DEFAULT: Self = Self::Strict;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Strictest => "strictest",
            Self::Base => "base",
            Self::Unsure => "unsure",
        }
    }

    /// The preset that is actually written. `Unsure` becomes `Base`.
    pub fn resolved(self) -> Self {
        match self {
            Self::Unsure => Self::Base,
            other => other,
        }
    }

    /// Value for the `extends` key, e.g. `astro/tsconfigs/strict`.
    pub fn extends_path(&self) -> String {
        format!("{}/{}", TOOLCHAIN_ROOT, self.resolved().as_str())
    }

    /// Options for the interactive preset prompt.
    pub fn prompt_options() -> Vec<PromptOption> {
        vec![
            PromptOption::new("Strict (recommended)", "strict"),
            PromptOption::new("Strictest", "strictest"),
            PromptOption::new("Relaxed", "base"),
            PromptOption::new("Help me choose", "unsure"),
        ]
    }
}

impl fmt::Display for TypescriptPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypescriptPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "strictest" => Ok(Self::Strictest),
            "base" | "relaxed" => Ok(Self::Base),
            "unsure" => Ok(Self::Unsure),
            other => Err(format!(
                "Unknown TypeScript preset '{}' (expected strict, strictest, base or unsure)",
                other
            )),
        }
    }
}
