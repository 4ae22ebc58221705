//
//  topsort-sdk
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use topsort::cli::{Cli, Commands};
use topsort::{exit_codes, TopsortError};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", error_report(&e));
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Formats an error for the terminal.
///
/// A [`TopsortError`] message already names its cause, so only other errors
/// get their context chain appended.
fn error_report(e: &anyhow::Error) -> String {
    match e.downcast_ref::<TopsortError>() {
        Some(err) => err.to_string(),
        None => format!("{e:#}"),
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("TOPSORT_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auction(cmd) => cmd.run(&cli.global).await,
        Commands::Event(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("topsort version {}", topsort::VERSION);
            Ok(())
        }
    }
}
