//! Integration tests for Settings config loading.
//!
//! Note: these tests only use temp directories for explicit config files.
//! Environment overrides live in `config_env_test.rs` so they run in their own process.

use std::fs;

use tempfile::TempDir;

use ordtree::application::ApplicationError;
use ordtree::config::{LookupStrategy, RenderStyle, Settings};

#[test]
fn given_explicit_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ordtree.toml");
    let config = r#"
render = "tree"

[bench]
lookups = 42
seed = 7
strategy = "iterative"
"#;
    fs::write(&path, config).unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.render, RenderStyle::Tree);
    assert_eq!(settings.bench.lookups, 42);
    assert_eq!(settings.bench.seed, Some(7));
    assert_eq!(settings.bench.strategy, LookupStrategy::Iterative);
}

#[test]
fn given_partial_config_when_load_then_keeps_remaining_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ordtree.toml");
    fs::write(&path, "[bench]\nlookups = 5\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.bench.lookups, 5);
    assert!(settings.bench.lowercase, "lowercase default should survive");
    assert_eq!(settings.bench.strategy, LookupStrategy::Recursive);
}

#[test]
fn given_missing_config_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");

    let result = Settings::load(Some(&path));

    match result {
        Err(ApplicationError::Config { message }) => {
            assert!(message.contains("nope.toml"), "{message}")
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn given_malformed_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ordtree.toml");
    fs::write(&path, "[bench]\nstrategy = \"sideways\"\n").unwrap();

    let result = Settings::load(Some(&path));

    assert!(
        matches!(result, Err(ApplicationError::Config { .. })),
        "got {result:?}"
    );
}

#[test]
fn given_effective_settings_when_rendered_then_reloadable_from_file() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("in.toml");
    fs::write(&source, "render = \"tree\"\n[bench]\nlowercase = false\n").unwrap();
    let settings = Settings::load(Some(&source)).expect("load settings");

    let dumped = dir.path().join("out.toml");
    fs::write(&dumped, settings.to_toml().unwrap()).unwrap();
    let reloaded = Settings::load(Some(&dumped)).expect("reload settings");

    assert_eq!(reloaded, settings);
}
