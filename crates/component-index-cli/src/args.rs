use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "component-index")]
#[command(about = "Inventory of a repository's component directories by category")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Scan root (default: current directory, or $COMPONENT_INDEX_ROOT)
    #[arg(short = 'C', long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file (default: ./component-index.toml, then user config)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Scan options, accepted before or after the `scan` subcommand
    #[command(flatten)]
    pub scan: ScanArgs,
}

#[derive(clap::Args, Clone, Default)]
pub struct ScanArgs {
    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Skip categories that hit filesystem errors instead of aborting
    #[arg(short, long, global = true)]
    pub keep_going: bool,

    /// Only report these categories (repeatable)
    #[arg(long, global = true, value_name = "NAME")]
    pub only: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the root and print the component index (default)
    Scan,

    /// List the effective category table
    Categories,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the config file path in effect
    Path,

    /// Create a config file with the default template
    Init {
        /// Write ./component-index.toml in the scan root instead of the user config
        #[arg(long)]
        local: bool,
    },
}
