//! CLI-level runs: discovery, merge, summary rendering.

use crate::integration::test_utils::{seed_run_file, RunData};
use clap::Parser;
use genmerge::cli::{self, Cli};
use genmerge::error::MergeError;
use genmerge::record::Record;
use genmerge::store::{ContainerRead, FileContainer};
use genmerge::types::RecordPath;
use std::fs;
use tempfile::TempDir;

fn cli_for(workspace: &std::path::Path, extra: &[&str]) -> Cli {
    let ws = workspace.to_string_lossy().into_owned();
    let mut args = vec!["genmerge", "--workspace", ws.as_str(), "--quiet"];
    args.extend_from_slice(extra);
    Cli::try_parse_from(args).unwrap()
}

fn data(n_events: f64) -> RunData {
    RunData {
        n_events,
        mass_bin: 1.0,
        hits: vec![(1, 0.5)],
    }
}

#[test]
fn test_cli_run_merges_workspace() {
    let temp = TempDir::new().unwrap();
    seed_run_file(temp.path(), "run1", "run.gmc", &data(1000.0));
    seed_run_file(temp.path(), "run2", "run.gmc", &data(1500.0));

    let summary = cli::run(&cli_for(temp.path(), &[])).unwrap();
    assert!(summary.contains("Merging completed successfully."));

    let merged = FileContainer::open(temp.path().join("merged.gmc")).unwrap();
    match merged.get(&RecordPath::parse("nEvents")).unwrap().unwrap() {
        Record::Parameter(p) => assert_eq!(p.value, 2500.0),
        other => panic!("expected parameter, got {:?}", other),
    }
}

#[test]
fn test_cli_json_summary() {
    let temp = TempDir::new().unwrap();
    seed_run_file(temp.path(), "run1", "run.gmc", &data(10.0));

    let summary = cli::run(&cli_for(temp.path(), &["--format", "json"])).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(parsed["inputs"], serde_json::json!(["run1"]));
    assert_eq!(parsed["scalars"], serde_json::json!(1));
    assert_eq!(parsed["warnings"], serde_json::json!(0));
}

#[test]
fn test_cli_empty_workspace_is_fatal() {
    let temp = TempDir::new().unwrap();
    let err = cli::run(&cli_for(temp.path(), &[])).unwrap_err();
    assert!(matches!(err, MergeError::NoInputs));
}

#[test]
fn test_cli_honors_config_filenames() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("genmerge.toml"),
        "input_filename = \"pairs.gmc\"\noutput_filename = \"all-pairs.gmc\"\n",
    )
    .unwrap();
    seed_run_file(temp.path(), "run1", "pairs.gmc", &data(5.0));

    cli::run(&cli_for(temp.path(), &[])).unwrap();
    assert!(temp.path().join("all-pairs.gmc").is_file());
}

#[test]
fn test_cli_skips_corrupt_candidate() {
    let temp = TempDir::new().unwrap();
    seed_run_file(temp.path(), "run1", "run.gmc", &data(7.0));
    let bad = temp.path().join("run2");
    fs::create_dir(&bad).unwrap();
    fs::write(bad.join("run.gmc"), b"definitely not a container").unwrap();

    let summary = cli::run(&cli_for(temp.path(), &["--format", "json"])).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(parsed["inputs"], serde_json::json!(["run1"]));
    assert_eq!(parsed["skipped"], serde_json::json!(1));
}
