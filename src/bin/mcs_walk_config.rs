// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints every section and key of a configuration domain as a tree.

use clap::Parser;
use mcs::domain::Result;
use mcs::service::BackendRegistry;
use std::process::ExitCode;

/// Walk a configuration domain.
#[derive(Parser, Debug)]
#[command(name = "mcs-walk-config", version)]
struct Args {
    /// Configuration domain, e.g. the application name
    domain: String,
}

fn run(args: &Args) -> Result<String> {
    let registry = BackendRegistry::with_defaults()?;
    let handle = registry.open(&args.domain)?;
    mcs::cli::render_tree(&*handle)
}

fn main() -> ExitCode {
    let args = Args::parse();
    mcs::cli::init_tracing();

    match run(&args) {
        Ok(tree) => {
            print!("{}", tree);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("mcs-walk-config: {}", e);
            ExitCode::FAILURE
        }
    }
}
