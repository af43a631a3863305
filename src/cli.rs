use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(version, long_version = crate::version::long_version(), about)]
pub struct Cli {
    /// File to open on startup
    pub file: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// History file to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub history_file: Option<PathBuf>,

    /// Keep the recent file history in memory only
    #[arg(long, conflicts_with = "history_file")]
    pub no_history: bool,

    /// Write logs to this file instead of the data directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
