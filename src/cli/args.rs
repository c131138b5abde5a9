//! CLI argument definitions.
//!
//! [`CreateArgs`] is the `create-fluide` command line and [`FluideCli`] is
//! the `fluide` command line, both defined with clap's derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::toolchain::TypescriptPreset;
use crate::ui::OutputMode;
use crate::workflow::ProjectRequest;

/// Create a new Shopify theme project powered by fluide.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "create-fluide")]
#[command(author, version, about, long_about = None)]
pub struct CreateArgs {
    /// Directory to create the project in
    pub directory: Option<PathBuf>,

    /// Template name or GitHub repository (`owner/repo/path#ref`)
    #[arg(long)]
    pub template: Option<String>,

    /// Branch, tag or commit to fetch the template at
    #[arg(long)]
    pub commit: Option<String>,

    /// Walk through every step without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Accept the default answer to every question
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// TypeScript preset to apply
    #[arg(long, value_enum, value_name = "PRESET")]
    pub typescript: Option<TypescriptPreset>,

    /// Skip the welcome and farewell messages
    #[arg(long)]
    pub skip_intro: bool,

    /// Always show the welcome and farewell messages
    #[arg(long, conflicts_with = "skip_intro")]
    pub fancy: bool,

    /// Show package manager output while installing
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show results, warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl CreateArgs {
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.verbose, self.quiet)
    }

    /// Build the immutable workflow request.
    pub fn to_request(&self) -> ProjectRequest {
        let mut request = ProjectRequest::new()
            .dry_run(self.dry_run)
            .assume_yes(self.yes)
            .skip_intro(self.intro_suppressed(crate::shell::is_windows()));

        request.directory = self.directory.clone();
        request.template = self.template.clone();
        request.commit = self.commit.clone();
        request.typescript = self.typescript;
        request
    }

    /// Windows always suppresses the intro; elsewhere `--fancy` forces it.
    fn intro_suppressed(&self, windows: bool) -> bool {
        if windows {
            return true;
        }
        !self.fancy && self.skip_intro
    }
}

/// Build tooling for fluide theme projects.
#[derive(Debug, Parser)]
#[command(name = "fluide")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct FluideCli {
    /// Path to options file (overrides <project>/fluide.config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show build engine output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show results, warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl FluideCli {
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.verbose, self.quiet)
    }
}

/// Available `fluide` subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bundle the theme's frontend assets
    Build(BuildArgs),

    /// Show the resolved build configuration
    Config(ConfigArgs),

    /// Print the JSON Schema for fluide.config.yml
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `build` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct BuildArgs {
    /// Write the engine configuration without running the build
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Show only the generated defaults, without overrides
    #[arg(long)]
    pub generated: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
