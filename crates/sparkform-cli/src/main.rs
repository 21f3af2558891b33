#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod runner;
mod telemetry;

use std::process;

use anyhow::Context;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "sparkform_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "sparkform_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "sparkform_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "sparkform_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %format!("{error:#}"),
            "command terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();

    let Cli { sparkpost, command } = cli;
    let output = runner::run(command, sparkpost).await?;

    let json = serde_json::to_string_pretty(&output).context("failed to format output")?;
    println!("{json}");

    Ok(())
}
