// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! xform: upgrade a Java project through the remote transformation service

mod color;
mod commands;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{history, projects, run};
use exit_error::ExitError;
use output::OutputFormat;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
const LOG_ENV: &str = "XFORM_LOG";

#[derive(Parser)]
#[command(
    name = "xform",
    version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH")),
    about = "Upgrade Java projects with the remote code transformation service",
    styles = color::styles(),
)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a project and wait for the job to finish
    Run(run::RunArgs),
    /// Show the most recent transformation run
    History,
    /// List directories eligible for transformation
    Projects(projects::ProjectsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli).await {
        match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("error: {}", exit.message);
                }
                std::process::exit(exit.code);
            }
            None => {
                eprintln!("error: {e:#}");
                std::process::exit(exit_error::EXIT_FAILURE);
            }
        }
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => run::handle(args, cli.format).await,
        Commands::History => history::handle(cli.format),
        Commands::Projects(args) => projects::handle(args, cli.format),
    }
}
