use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "matchwatch")]
#[command(version)]
#[command(about = "Live match alerts for tracked League of Legends players")]
pub struct Cli {
    /// Config file (defaults to ~/.matchwatch/config.json)
    #[arg(long, global = true, env = "MATCHWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll every tracked player until interrupted
    Run,

    /// Run a single poll cycle and print its report
    Once,

    /// Classify and extract a saved live page offline
    Inspect {
        /// Saved page (HTML or a response log)
        file: PathBuf,

        /// Player whose champion card should be read
        #[arg(short, long)]
        player: String,

        /// Region segment of the match links
        #[arg(long, default_value = "jp")]
        region: String,
    },

    /// Validate the config and show the roster
    Config,

    /// View sent notifications
    History {
        /// Show per-category totals
        #[arg(long)]
        stats: bool,
    },

    /// Print version information
    Version,
}
