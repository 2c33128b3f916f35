//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vasari - Publish posts, reels and stories to Instagram
#[derive(Parser, Debug)]
#[command(name = "vasari")]
#[command(about = "Publish posts, reels and stories to Instagram", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ~/.config/vasari/vasari.toml and ./vasari.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Post ledger file
    #[arg(long, global = true, default_value = ".vasari_ledger.json")]
    pub ledger: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publish a new post
    Publish {
        /// Publish request as JSON, or @path to read it from a file
        #[arg(long)]
        request: String,
    },

    /// Publish an existing post again with edited content
    Repost {
        /// ID of the post
        post_id: String,

        /// Publish request as JSON, or @path to read it from a file
        #[arg(long)]
        request: String,
    },

    /// Show a post from the ledger
    Show {
        /// ID of the post
        post_id: String,
    },

    /// List posts, most recently updated first
    List,

    /// Report which credentials are configured
    CheckConfig,
}
