use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wplimits", version)]
#[command(about = "Inspect and safely edit WordPress memory limits in wp-config.php", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// WordPress install directory to search for wp-config.php
    /// (defaults to the current directory; the parent is also checked)
    #[arg(short, long, global = true)]
    pub base: Option<PathBuf>,

    /// Exact path to wp-config.php, bypassing the locator
    #[arg(short, long, global = true, conflicts_with = "base")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show current limits, writability, and conflict diagnostics
    #[command(alias = "st")]
    Status {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set WP_MEMORY_LIMIT and WP_MAX_MEMORY_LIMIT (e.g. 256M 512M)
    Set {
        /// Value for WP_MEMORY_LIMIT (e.g. 256M, 1G)
        memory_limit: String,

        /// Value for WP_MAX_MEMORY_LIMIT; must be >= the base limit
        max_memory_limit: String,
    },

    /// Print the located wp-config.php path
    Path,

    /// List backups of wp-config.php
    Backups {
        /// Delete all but the 5 most recent backups
        #[arg(long)]
        prune: bool,
    },
}
