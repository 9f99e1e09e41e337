//! treemerge CLI
//!
//! Concatenates the files of a directory tree into one output file.

use clap::Parser;
use std::process::ExitCode;
use treemerge::cli::{self, Cli};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Cli::parse();

    // Initialize logging; RUST_LOG wins over the verbosity flag
    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    cli::run(&args)
}
