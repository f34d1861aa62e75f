//! Interactive deployment CLI for the dietbot backend

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "deployctl")]
#[command(about = "Dietbot deployment orchestrator - provision and supervise the backend")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "deploy.yaml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();

    smol::block_on(async { commands::deploy::run(&cli.config).await })
}
