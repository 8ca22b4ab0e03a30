//! CLI argument definitions using clap
//!
//! Commands:
//! - library-catalog init --config <path>
//! - library-catalog serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Library catalog service
#[derive(Parser, Debug)]
#[command(name = "library-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config (if absent) and create the seeded database
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./library.json")]
        config: PathBuf,
    },

    /// Serve the catalog HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./library.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
