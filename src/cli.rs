//! CLI definitions for railbook.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// railbook CLI.
#[derive(Parser)]
#[command(name = "railbook")]
#[command(about = "Scripted train-ticket booking over a real browser session")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "railbook.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run one booking (default)
    Run {
        /// Run the browser without a window
        #[arg(long)]
        headless: bool,

        /// Skip chat notifications even if enabled in the config
        #[arg(long)]
        no_notify: bool,
    },

    /// Load and validate the config, print the plan, and exit
    Check,
}
