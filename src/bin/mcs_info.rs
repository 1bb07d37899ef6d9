// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints the mcs version, the selected backend and the available backends.

use clap::Parser;
use mcs::service::BackendRegistry;
use std::process::ExitCode;

/// Show which configuration backends mcs knows about.
#[derive(Parser, Debug)]
#[command(name = "mcs-info", version)]
struct Args {}

fn main() -> ExitCode {
    let _args = Args::parse();
    mcs::cli::init_tracing();

    match BackendRegistry::with_defaults() {
        Ok(registry) => {
            print!("{}", mcs::cli::render_info(&registry));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("mcs-info: {}", e);
            ExitCode::FAILURE
        }
    }
}
