use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
/// Configure a partition's boot code with the partition's start sector
pub struct CommandLine {
    /// Partition to configure (e.g. /dev/hdaX)
    pub partition: Option<PathBuf>,

    /// Show what would be written without touching the partition
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
