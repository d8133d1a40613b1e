//
//  smartling-files
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use smartling_files::cli::{Cli, Commands};
use smartling_files::exit_codes;

#[tokio::main]
async fn main() {
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
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::for_error(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("SL_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Upload(cmd) => cmd.run(&cli.global).await,
        Commands::Import(cmd) => cmd.run(&cli.global).await,
        Commands::Get(cmd) => cmd.run(&cli.global).await,
        Commands::GetMultiple(cmd) => cmd.run(&cli.global).await,
        Commands::GetAll(cmd) => cmd.run(&cli.global).await,
        Commands::GetOriginal(cmd) => cmd.run(&cli.global).await,
        Commands::List(cmd) => cmd.run(&cli.global).await,
        Commands::FileTypes(cmd) => cmd.run(&cli.global).await,
        Commands::LastModified(cmd) => cmd.run(&cli.global).await,
        Commands::Delete(cmd) => cmd.run(&cli.global).await,
        Commands::Status(cmd) => cmd.run(&cli.global).await,
        Commands::Rename(cmd) => cmd.run(&cli.global).await,
        Commands::Locales(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
    }
}
