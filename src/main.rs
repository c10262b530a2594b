// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use photobooth::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "photobooth")]
#[command(about = "Vintage photobooth for the terminal")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Run with a synthetic test pattern instead of a camera
    #[arg(long)]
    pattern: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    List,

    /// List the frame catalog
    Frames,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=photobooth=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => cli::list_cameras(),
        Some(Commands::Frames) => {
            cli::list_frames();
            Ok(())
        }
        None => photobooth::booth::run(Config::load(), cli.pattern),
    }
}
