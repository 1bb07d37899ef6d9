// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests of the `mcs-*` tools.

#![cfg(feature = "cli")]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(bin: &str, home: &Path, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("MCS_BACKEND")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_setconfval_then_getconfval() {
    let home = TempDir::new().unwrap();

    let set = run(
        env!("CARGO_BIN_EXE_mcs-setconfval"),
        home.path(),
        &["player", "general", "volume", "100"],
    );
    assert!(set.status.success());
    assert_eq!(stdout(&set), "general/volume => 100\n");
    assert_eq!(
        fs::read_to_string(home.path().join(".config/player/config")).unwrap(),
        "[general]\nvolume=100\n"
    );

    let get = run(
        env!("CARGO_BIN_EXE_mcs-getconfval"),
        home.path(),
        &["player", "General", "Volume"],
    );
    assert!(get.status.success());
    assert_eq!(stdout(&get), "100\n");
}

#[test]
fn test_getconfval_missing_value() {
    let home = TempDir::new().unwrap();
    let get = run(
        env!("CARGO_BIN_EXE_mcs-getconfval"),
        home.path(),
        &["player", "general", "volume"],
    );
    assert_eq!(get.status.code(), Some(1));
    assert!(get.stdout.is_empty());
}

#[test]
fn test_walk_config() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config/player");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config"),
        "[general]\nvolume=100\nshuffle=TRUE\n\n[equalizer]\npreamp=0\n",
    )
    .unwrap();

    let walk = run(env!("CARGO_BIN_EXE_mcs-walk-config"), home.path(), &["player"]);
    assert!(walk.status.success());
    assert_eq!(
        stdout(&walk),
        "general\n  |-- volume\n  `-- shuffle\nequalizer\n  `-- preamp\n"
    );
}

#[test]
fn test_info() {
    let home = TempDir::new().unwrap();
    let info = run(env!("CARGO_BIN_EXE_mcs-info"), home.path(), &[]);
    assert!(info.status.success());

    let text = stdout(&info);
    assert!(text.starts_with("mcs version: mcs-"));
    assert!(text.contains("Available backends for mcs configuration storage:\n   default\n"));
}

#[test]
fn test_missing_arguments_print_usage() {
    let home = TempDir::new().unwrap();
    let output = run(
        env!("CARGO_BIN_EXE_mcs-setconfval"),
        home.path(),
        &["player", "general"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}
