// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints one value from a configuration domain.
//!
//! Exits with status 1 and prints nothing if the value is not set.

use clap::Parser;
use mcs::domain::Result;
use mcs::service::BackendRegistry;
use std::process::ExitCode;

/// Print a configuration value.
#[derive(Parser, Debug)]
#[command(name = "mcs-getconfval", version)]
struct Args {
    /// Configuration domain, e.g. the application name
    domain: String,
    /// Section holding the key
    section: String,
    /// Key to look up
    key: String,
}

fn run(args: &Args) -> Result<String> {
    let registry = BackendRegistry::with_defaults()?;
    let handle = registry.open(&args.domain)?;
    handle.get_string(&args.section, &args.key)
}

fn main() -> ExitCode {
    let args = Args::parse();
    mcs::cli::init_tracing();

    match run(&args) {
        Ok(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(e) if e.is_not_found() => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("mcs-getconfval: {}", e);
            ExitCode::from(2)
        }
    }
}

