use anyhow::{Context, Result};
use bootsector::{reconcile_path, Action, Options};
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::info;

use crate::cmdline::CommandLine;

mod cmdline;

fn show_usage() {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| String::from("makebootable"));

    println!("Usage: {program} <partition>");
    println!("Example: {program} /dev/hdaX");
}

fn main() -> Result<ExitCode> {
    let args = CommandLine::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(io::stderr)
        .init();

    let Some(partition) = args.partition.as_deref() else {
        show_usage();
        return Ok(ExitCode::FAILURE);
    };

    let options = Options {
        dry_run: args.dry_run,
    };

    let outcome = reconcile_path(partition, &mut io::stdout().lock(), options)
        .with_context(|| format!("Failed to configure bootcode on {}", partition.display()))?;

    match outcome.action {
        Action::Configured => info!(
            start = outcome.start,
            previous = outcome.previous,
            "stored offset updated"
        ),
        Action::AlreadyConfigured | Action::WouldConfigure => info!(
            start = outcome.start,
            "stored offset left unchanged"
        ),
    }

    Ok(ExitCode::SUCCESS)
}
