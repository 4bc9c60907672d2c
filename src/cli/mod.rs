//! CLI command definitions and parsing
use crate::model::CableId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cablelabels",
    version,
    about = "Automatic cable labels derived from configurable templates",
    long_about = "Cablelabels keeps a small inventory of cables and derives a human-readable label \
                  for each one from a configurable Jinja-style template whenever a cable is saved \
                  without an explicit label. Existing labels are never overwritten."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/cablelabels/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate labels for all cables with a missing label
    Generate {
        /// Show the labels that would be written without persisting them
        #[arg(long)]
        dry_run: bool,
    },

    /// Import cables from a JSON file (an array of cable objects)
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// List cables in the store
    List {
        /// Show results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show a single cable as JSON
    Show {
        /// Cable identifier
        id: CableId,
    },

    /// Render a cable's label without persisting it
    Render {
        /// Cable identifier
        id: CableId,

        /// Template override (defaults to the configured template)
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print the active label template
    GetTemplate,

    /// Set the label template (syntax-checked before saving)
    SetTemplate {
        /// Template expression, e.g. "#{{cable.pk}}"
        template: String,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
