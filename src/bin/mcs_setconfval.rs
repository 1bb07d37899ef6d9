// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stores one string value in a configuration domain.

use clap::Parser;
use mcs::domain::Result;
use mcs::service::BackendRegistry;
use std::process::ExitCode;

/// Set a configuration value.
#[derive(Parser, Debug)]
#[command(name = "mcs-setconfval", version)]
struct Args {
    /// Configuration domain, e.g. the application name
    domain: String,
    /// Section holding the key
    section: String,
    /// Key to set
    key: String,
    /// Value to store
    value: String,
}

fn run(args: &Args) -> Result<()> {
    let registry = BackendRegistry::with_defaults()?;
    let mut handle = registry.open(&args.domain)?;
    handle.set_string(&args.section, &args.key, &args.value)?;
    println!("{}/{} => {}", args.section, args.key, args.value);
    handle.close()
}

fn main() -> ExitCode {
    let args = Args::parse();
    mcs::cli::init_tracing();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mcs-setconfval: {}", e);
            ExitCode::FAILURE
        }
    }
}
