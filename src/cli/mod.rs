//! CLI module for WellNest
//!
//! Command-line parsing for the wellnest-server binary. Uses clap for
//! argument parsing and owo-colors for colored terminal output.

pub mod output;

use crate::utils::toml_config::ChatMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file, used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "wellnest.toml";

/// WellNest - mental-health support chat server
#[derive(Parser, Debug)]
#[command(
    name = "wellnest-server",
    version,
    about = "WellNest - mental-health support chat server",
    long_about = "Serves POST /chat either as a PHQ-9 keyword responder (rules mode)\n\
                  or as a retrieval-augmented LLM pipeline over a knowledge file (rag mode).\n\n\
                  Run without arguments to start the server.",
    after_help = "EXAMPLES:\n    \
                  wellnest-server                       # Start the server (wellnest.toml if present)\n    \
                  wellnest-server serve --mode rules    # Keyword responder only, no model needed\n    \
                  wellnest-server index                 # Build the vector index ahead of time\n    \
                  wellnest-server config --validate     # Check the configuration"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Which /chat implementation to expose (rag or rules)
        #[arg(long)]
        mode: Option<ChatMode>,

        /// Host address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(long)]
        port: Option<u16>,
    },

    /// Open or build the vector index, then exit
    Index,

    /// Show configuration information
    Config {
        /// Validate the configuration, including required environment variables
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The config path and whether it was given explicitly.
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        }
    }
}
