//! Binary crate for the `lotemp` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Choosing where coordinates come from
//! - Printing the reading and mapping failures to exit codes

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<lotemp_core::Error>()
        .map_or(1, |e| e.kind().exit_code())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if cli::is_version_query(std::env::args_os()) {
        println!("{}", cli::VERSION);
        return ExitCode::SUCCESS;
    }

    let cmd = cli::Cli::parse();
    setup_logging();

    match cmd.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
