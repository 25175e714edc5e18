//! Golden file tests for catalogue matching.
//!
//! Each fixture is a JSON file under `fixtures/matching/<mode>/`, where mode
//! is `strict` or `loose`, and runs against the built-in catalogue.
//!
//! Test format:
//! ```json
//! { "query": "fresh prawn biryani", "expected_key": "prawn biryani" }
//! ```
//! A null `expected_key` means no match.

use glob::glob;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tadka_core::{get_loose_match, get_strict_match, Catalogue, Matcher};

/// A test case loaded from a JSON fixture file
#[derive(Debug, Deserialize)]
struct TestCase {
    query: String,
    expected_key: Option<String>,
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/matching")
}

fn load_test_cases(mode: &str) -> Vec<(String, TestCase)> {
    let pattern = fixtures_dir().join(mode).join("*.json");
    let pattern_str = pattern.to_string_lossy();

    let mut cases = Vec::new();
    for entry in glob(&pattern_str).expect("Failed to read glob pattern") {
        let path = entry.expect("Failed to read directory entry");
        let name = format!("{}/{}", mode, path.file_stem().unwrap().to_string_lossy());
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        let case: TestCase = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
        cases.push((name, case));
    }

    // Sort by name for deterministic ordering
    cases.sort_by(|a, b| a.0.cmp(&b.0));

    assert!(!cases.is_empty(), "No {} fixtures found", mode);
    cases
}

fn run_golden(mode: &str) {
    let matcher = Matcher::new(Catalogue::builtin());
    let cases = load_test_cases(mode);
    let mut failures = Vec::new();

    for (name, case) in &cases {
        let actual = match mode {
            "strict" => matcher.strict_lookup(&case.query).map(|m| m.entry.key.clone()),
            "loose" => matcher.loose_lookup(&case.query).map(|m| m.entry.key.clone()),
            other => panic!("Unknown matching mode {}", other),
        };

        if actual != case.expected_key {
            failures.push((name.clone(), case.query.clone(), case.expected_key.clone(), actual));
        }
    }

    if !failures.is_empty() {
        let mut msg = format!(
            "\n{} failures across {} {} tests:\n",
            failures.len(),
            cases.len(),
            mode
        );

        for (name, query, expected, actual) in &failures {
            msg.push_str(&format!("\n=== {} ===\n", name));
            msg.push_str(&format!("Query:    {:?}\n", query));
            msg.push_str(&format!("Expected: {:?}\n", expected));
            msg.push_str(&format!("Actual:   {:?}\n", actual));
        }

        panic!("{}", msg);
    }

    println!("All {} {} matching tests passed!", cases.len(), mode);
}

#[test]
fn test_strict_matching_golden_files() {
    run_golden("strict");
}

#[test]
fn test_loose_matching_golden_files() {
    run_golden("loose");
}

#[test]
fn test_free_functions_use_builtin_catalogue() {
    let catalogue = Catalogue::builtin();

    let biryani = get_strict_match("biryani").unwrap();
    assert_eq!(biryani, catalogue.get("biryani").unwrap().varieties.as_slice());

    let pizza = get_loose_match("pizzas").unwrap();
    assert_eq!(pizza, catalogue.get("pizza").unwrap().varieties.as_slice());

    assert!(get_strict_match("").is_none());
    assert!(get_loose_match("").is_none());
}

#[derive(Deserialize)]
struct RawCatalogue {
    entries: Vec<RawEntry>,
}

#[derive(Deserialize)]
struct RawEntry {
    key: String,
}

/// Checks the data file directly, independent of the loader's own validation.
#[test]
fn test_catalogue_file_keys_are_unique() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/dish_varieties.json");
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    let raw: RawCatalogue = serde_json::from_str(&content).expect("Failed to parse catalogue");

    let keys: HashSet<&str> = raw.entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys.len(), raw.entries.len());
    assert_eq!(keys.len(), Catalogue::builtin().len());
}
