// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the mcs crate.
//!
//! This example demonstrates:
//! - Building a registry whose keyfiles live in a scratch directory
//! - Typed getters and setters
//! - Missing values and the permissive number parsing
//! - Walking a domain's sections and keys
//!
//! To run this example:
//! ```bash
//! RUST_LOG=debug cargo run --example basic_usage
//! ```

use mcs::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== mcs: Basic Usage ===\n");

    let home = tempfile::tempdir()?;
    let registry = BackendRegistry::builder()
        .with_keyfile_backend()
        .with_config_home(home.path())
        .with_selector(BackendSelector::new())
        .build()?;

    println!("Registered backends: {:?}", registry.names());
    println!("Selected backend: {}\n", registry.selected());

    // Example 1: Typed setters
    println!("--- Example 1: Writing Values ---");
    let mut handle = registry.open("demo")?;
    handle.set_int("general", "volume", 80)?;
    handle.set_bool("general", "shuffle", true)?;
    handle.set_float("equalizer", "preamp", -2.5)?;
    handle.set_string("equalizer", "preset", "Rock")?;
    handle.close()?;

    let path = home.path().join("demo").join("config");
    println!("{}:\n{}", path.display(), std::fs::read_to_string(&path)?);

    // Example 2: Typed getters, names compared without case
    println!("--- Example 2: Reading Values ---");
    let mut handle = registry.open("demo")?;
    println!("volume  = {}", handle.get_int("General", "Volume")?);
    println!("shuffle = {}", handle.get_bool("general", "shuffle")?);
    println!("preamp  = {}", handle.get_float("EQUALIZER", "preamp")?);
    println!();

    // Example 3: Missing values and loose numbers
    println!("--- Example 3: Missing and Malformed Values ---");
    match handle.get_string("general", "skin") {
        Ok(skin) => println!("skin = {}", skin),
        Err(e) if e.is_not_found() => println!("skin is not set"),
        Err(e) => return Err(e),
    }
    handle.set_string("general", "balance", "12 percent")?;
    println!(
        "'12 percent' read as an integer: {}",
        handle.get_int("general", "balance")?
    );
    println!();

    // Example 4: Walking the domain
    println!("--- Example 4: Sections and Keys ---");
    for section in handle.sections()? {
        println!("[{}]", section);
        for key in handle.keys(&section)? {
            println!("  {} = {}", key, handle.get_string(&section, &key)?);
        }
    }

    // Pending changes are written when the handle goes away
    drop(handle);

    Ok(())
}
