//! Conformance tests that run fixtures against casematch
//!
//! Run with: cargo test -p casematch-test --test conformance --features casematch-test/fixtures
//!
//! Note: This test file requires the `fixtures` feature to be enabled.

#![cfg(feature = "fixtures")]

use casematch_test::fixture::Fixture;
use std::path::{Path, PathBuf};

/// The fixtures directory next to this crate's manifest
fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and run every fixture in one file
fn run_fixture_file(name: &str) {
    let path = fixtures_dir().join(name);
    assert!(path.exists(), "Fixture file does not exist: {}", path.display());

    println!("Running fixture file: {}", path.display());
    let fixtures = Fixture::load(&path).unwrap_or_else(|e| {
        panic!("Failed to load {}: {}", path.display(), e);
    });
    assert!(!fixtures.is_empty(), "{} holds no fixtures", path.display());

    for fixture in fixtures {
        println!("  Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn test_literals() {
    run_fixture_file("01_literals.yaml");
}

#[test]
fn test_guards() {
    run_fixture_file("02_guards.yaml");
}

#[test]
fn test_semantics() {
    run_fixture_file("03_semantics.yaml");
}

#[test]
fn test_one_of() {
    run_fixture_file("04_one_of.yaml");
}

#[test]
fn test_json_fixtures() {
    run_fixture_file("05_json.json");
}

#[test]
fn test_every_fixture_file_is_covered() {
    let mut names: Vec<_> = std::fs::read_dir(fixtures_dir())
        .expect("read fixtures dir")
        .map(|entry| entry.expect("dir entry").file_name())
        .filter_map(|name| name.into_string().ok())
        .filter(|name| {
            Path::new(name)
                .extension()
                .is_some_and(|e| e == "yaml" || e == "yml" || e == "json")
        })
        .collect();
    names.sort();
    assert_eq!(
        names,
        [
            "01_literals.yaml",
            "02_guards.yaml",
            "03_semantics.yaml",
            "04_one_of.yaml",
            "05_json.json",
        ]
    );
}
