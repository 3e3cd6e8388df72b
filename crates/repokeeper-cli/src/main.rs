mod completion;
mod config;
mod dispatch;
mod edits;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

use crate::edits::EditArgs;

#[derive(Parser, Debug)]
#[command(name = "repokeeper")]
#[command(
    about = "Carry package repositories and services across a system upgrade",
    long_about = None
)]
pub(crate) struct Cli {
    /// Package-manager state directory (defaults to $REPOKEEPER_ROOT, then ~/.repokeeper)
    #[arg(long, global = true)]
    state_root: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// List the repositories and services currently configured
    Status,
    /// Show what activation would do, without changing anything
    Plan {
        #[command(flatten)]
        edits: EditArgs,
        #[arg(long)]
        json: bool,
    },
    /// Apply the repository and service changes
    Activate {
        #[command(flatten)]
        edits: EditArgs,
        #[arg(long)]
        json: bool,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    dispatch::run_cli(cli)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "repokeeper={level},repokeeper_tracker={level},repokeeper_store={level}"
        ))
    });
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests;
