use std::fs;
use std::path::{Path, PathBuf};

use combinate::grammar::{evaluate, expression};
use combinate::source;

fn collect(dir: &Path) -> Vec<PathBuf> {
    assert!(dir.exists(), "{:?} directory missing", dir);

    let entries = fs::read_dir(dir).expect("Failed to read directory");

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();

        if path
            .extension()
            .and_then(|s| s.to_str())
            == Some("txt")
        {
            files.push(path);
        }
    }

    assert!(!files.is_empty(), "No .txt files found in {:?}", dir);
    files
}

#[test]
fn ensure_samples_parse() {
    let files = collect(Path::new("tests/samples/"));

    let mut failures = Vec::new();

    for file in &files {
        let content = source::load(file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {}", file, e));

        let state = expression().run(content.trim_end());

        if state.is_error() || state.is_incomplete_match() {
            println!("File {:?} failed to parse: {:?}", file, state.messages());
            failures.push(file.clone());
            continue;
        }

        let value = state
            .result()
            .expect("Successful parse without a result");

        if let Err(e) = evaluate(value) {
            println!("File {:?} failed to evaluate: {}", file, e);
            failures.push(file.clone());
        }
    }

    if !failures.is_empty() {
        panic!(
            "Sample files should parse successfully, but {} files failed",
            failures.len()
        );
    }
}

#[test]
fn ensure_broken_fail() {
    let files = collect(Path::new("tests/broken/"));

    let mut unexpected_successes = Vec::new();

    for file in &files {
        let content = source::load(file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {}", file, e));

        let state = expression().run(content.trim_end());

        if !state.is_error() && !state.is_incomplete_match() {
            println!("File {:?} unexpectedly parsed successfully", file);
            unexpected_successes.push(file.clone());
        }
    }

    if !unexpected_successes.is_empty() {
        panic!(
            "Broken files should not parse successfully, but {} files passed",
            unexpected_successes.len()
        );
    }
}
