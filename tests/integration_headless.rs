//! Integration tests for headless runs, export, and the binary.

mod common;

use std::process::Command;

use gridview::config::DashboardConfig;
use gridview::io::export::{HEADER, export_csv, write_json_lines};
use gridview::runner::{run_headless, run_headless_from};

#[test]
fn headless_run_is_reproducible_per_seed() {
    let a = run_headless(&common::seeded_baseline(5), 30);
    let b = run_headless(&common::seeded_baseline(5), 30);
    let c = run_headless(&common::seeded_baseline(6), 30);

    assert_eq!(a.snapshots, b.snapshots);
    assert_eq!(a.stations, b.stations);
    assert_ne!(a.snapshots, c.snapshots);
}

#[test]
fn summary_matches_snapshots() {
    let run = run_headless(&DashboardConfig::baseline(), 40);
    let s = &run.summary;
    assert_eq!(s.snapshots, 41);
    assert_eq!(
        s.healthy_readings + s.warning_readings + s.critical_readings,
        41
    );
    let alerts: usize = run.snapshots.iter().map(|x| x.alerts.len()).sum();
    assert_eq!(s.alert_count, alerts);
    assert!(s.peak_generation_kw >= s.mean_generation_kw);
    common::assert_station_invariants(&run.stations);
}

#[test]
fn timestamps_follow_interval() {
    let mut cfg = DashboardConfig::baseline();
    cfg.refresh.interval_ms = 45_000;
    let run = run_headless_from(&cfg, 4, common::START_EPOCH_MS);
    let stamps: Vec<u64> = run.snapshots.iter().map(|s| s.timestamp_ms).collect();
    let expected: Vec<u64> = (0..5)
        .map(|i| common::START_EPOCH_MS + i * 45_000)
        .collect();
    assert_eq!(stamps, expected);
}

#[test]
fn csv_export_round_trips_row_count() {
    let run = run_headless(&DashboardConfig::baseline(), 12);
    let path = common::temp_path("export.csv");
    export_csv(&run.snapshots, &path).expect("csv export should succeed");

    let mut rdr = csv::Reader::from_path(&path).expect("csv should open");
    let headers = rdr.headers().expect("csv should have a header").clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), HEADER.to_vec());
    assert_eq!(rdr.records().count(), 13);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn json_lines_parse_back() {
    let run = run_headless(&DashboardConfig::baseline(), 3);
    let mut buf = Vec::new();
    write_json_lines(&run.snapshots, &mut buf).expect("json export should succeed");
    let text = String::from_utf8(buf).expect("utf-8");
    for (line, snap) in text.lines().zip(&run.snapshots) {
        let v: serde_json::Value = serde_json::from_str(line).expect("valid json");
        assert_eq!(v["seq"].as_u64(), Some(snap.seq));
        assert_eq!(
            v["weather_stations"].as_array().map(Vec::len),
            Some(3)
        );
    }
}

#[test]
fn binary_headless_json_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_gridview"))
        .args(["--headless", "--ticks", "3", "--json", "--seed", "9"])
        .output()
        .expect("gridview process should run");

    assert!(
        output.status.success(),
        "headless run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    let seqs: Vec<u64> = stdout
        .lines()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .filter_map(|v| v["seq"].as_u64())
        .collect();
    assert_eq!(seqs, vec![0, 1, 2, 3]);
}

#[test]
fn binary_text_output_has_summaries() {
    let output = Command::new(env!("CARGO_BIN_EXE_gridview"))
        .args(["--headless", "--ticks", "2", "--config"])
        .arg(common::sample_config("storm.toml"))
        .output()
        .expect("gridview process should run");

    assert!(
        output.status.success(),
        "config run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--- Grid Summary ---"));
    assert!(stdout.contains("--- Charging Summary ---"));
}

#[test]
fn binary_rejects_invalid_interval() {
    let output = Command::new(env!("CARGO_BIN_EXE_gridview"))
        .args(["--headless", "--interval", "42"])
        .output()
        .expect("gridview process should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("refresh.interval_ms"), "stderr={stderr}");
}
