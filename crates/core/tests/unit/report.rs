//! # Report Tests
//!
//! Renderers over a finished run, and report persistence.

use std::fs;

use cachesim_core::config::ReplacementPolicy;
use cachesim_core::report::{
    ChartCsv, FinalState, History, Report, Summary, save_chart_csv, save_report,
};
use pretty_assertions::assert_eq;

use crate::common::harness::{DEMO, direct, run, set_assoc};

#[test]
fn test_report_full_text() {
    let result = run(&direct(2), &[1, 3, 1, 1]);
    let expected = "\
--- Cache Simulation Report ---
Address: 1 => MISS
Address: 3 => MISS
Address: 1 => MISS
Address: 1 => HIT

Total: 4
Hits: 1, Misses: 3
Hit Rate: 0.25
";
    assert_eq!(Report(&result).to_string(), expected);
}

#[test]
fn test_report_empty_run() {
    let result = run(&direct(4), &[]);
    let text = Report(&result).to_string();
    assert!(text.ends_with("Total: 0\nHits: 0, Misses: 0\nHit Rate: 0.00\n"));
}

#[test]
fn test_summary_fields() {
    let result = run(&set_assoc(4, 2, ReplacementPolicy::Lru), &DEMO);
    let text = Summary(&result).to_string();
    let field = |key: &str| {
        text.lines()
            .find(|line| line.starts_with(key))
            .and_then(|line| line.split_whitespace().last())
            .map(str::to_owned)
    };
    assert_eq!(field("cache.mapping").as_deref(), Some("Set-Associative"));
    assert_eq!(field("cache.sets").as_deref(), Some("2"));
    assert_eq!(field("sim.accesses").as_deref(), Some("12"));
    assert_eq!(field("sim.hits").as_deref(), Some("3"));
    assert_eq!(field("sim.misses").as_deref(), Some("9"));
    assert_eq!(field("sim.hit_rate").as_deref(), Some("0.25"));
}

#[test]
fn test_history_and_final_state() {
    let result = run(&set_assoc(4, 2, ReplacementPolicy::Lru), &DEMO);
    assert_eq!(History(&result).to_string(), "MMMHMHMMMHMM");
    assert_eq!(FinalState(&result).to_string(), "Set 0: [2, 8]\nSet 1: [1, 7]\n");
}

#[test]
fn test_save_report_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out").join("report.txt");
    let result = run(&direct(4), &DEMO);

    save_report(&result, &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), Report(&result).to_string());
}

#[test]
fn test_save_report_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    fs::write(&path, "stale contents that are much longer than the new report").unwrap();

    let result = run(&direct(1), &[5]);
    save_report(&result, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("--- Cache Simulation Report ---\nAddress: 5 => MISS\n"));
    assert!(!text.contains("stale"));
}

#[test]
fn test_save_chart_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("charts").join("hit_miss.csv");
    let result = run(&direct(4), &DEMO);

    save_chart_csv(&result, &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Hits,Misses\n2,10\n");
    assert_eq!(ChartCsv(&result).to_string(), "Hits,Misses\n2,10\n");
}

#[test]
fn test_save_report_into_file_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "").unwrap();

    let result = run(&direct(4), &[1]);
    let err = save_report(&result, blocker.join("report.txt")).unwrap_err();
    assert!(err.to_string().starts_with("failed to write report to"));
}
