//! Headless driver: runs the dashboard without a terminal.

use tracing::info;

use crate::charging::{ChargingStation, FleetSummary};
use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::metrics::Snapshot;
use crate::metrics::summary::HistorySummary;

/// Upper bound on the snapshot buffer reserved up front.
const PREALLOC_SNAPSHOTS: u64 = 4_096;

/// Everything a headless run produced.
#[derive(Debug, Clone)]
pub struct HeadlessRun {
    /// Initial snapshot followed by one per refresh interval.
    pub snapshots: Vec<Snapshot>,
    /// Station state after the last interval.
    pub stations: Vec<ChargingStation>,
    pub summary: HistorySummary,
    pub fleet: FleetSummary,
}

/// Drives a fresh dashboard through `ticks` refresh intervals.
///
/// Simulated time only: nothing sleeps. The result is a pure function of
/// `config` and `ticks`. A config with real-time off is still refreshed
/// once per interval.
pub fn run_headless(config: &DashboardConfig, ticks: u64) -> HeadlessRun {
    run_headless_from(config, ticks, 0)
}

/// Like [`run_headless`], stamping snapshots from `start_epoch_ms`.
pub fn run_headless_from(config: &DashboardConfig, ticks: u64, start_epoch_ms: u64) -> HeadlessRun {
    let mut dashboard = Dashboard::new(config.clone(), start_epoch_ms);
    let mut snapshots = Vec::with_capacity(snapshot_capacity(ticks));
    snapshots.push(dashboard.current().clone());

    let interval_ms = dashboard.interval_ms();
    let mut sessions_completed = 0;
    for _ in 0..ticks {
        let step = dashboard.advance(interval_ms);
        if !step.refreshed {
            dashboard.refresh();
        }
        sessions_completed += step.sessions_completed;
        snapshots.push(dashboard.current().clone());
    }

    let summary = HistorySummary::from_snapshots(&snapshots);
    let fleet = dashboard.fleet_summary();
    info!(
        refreshes = ticks,
        sessions_completed,
        alerts = summary.alert_count,
        "headless run finished"
    );

    HeadlessRun {
        snapshots,
        stations: dashboard.fleet().stations().to_vec(),
        summary,
        fleet,
    }
}

fn snapshot_capacity(ticks: u64) -> usize {
    usize::try_from(ticks.saturating_add(1).min(PREALLOC_SNAPSHOTS)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::write_csv;

    #[test]
    fn same_config_is_deterministic() {
        let cfg = DashboardConfig::baseline();
        let a = run_headless(&cfg, 20);
        let b = run_headless(&cfg, 20);

        let mut out_a = Vec::new();
        let mut out_b = Vec::new();
        assert!(write_csv(&a.snapshots, &mut out_a).is_ok());
        assert!(write_csv(&b.snapshots, &mut out_b).is_ok());
        assert_eq!(out_a, out_b);
        assert_eq!(a.stations, b.stations);
    }

    #[test]
    fn one_snapshot_per_interval_plus_initial() {
        let run = run_headless(&DashboardConfig::baseline(), 5);
        assert_eq!(run.snapshots.len(), 6);
        let seqs: Vec<u64> = run.snapshots.iter().map(|s| s.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(run.summary.snapshots, 6);
    }

    #[test]
    fn paused_config_still_refreshes() {
        let mut cfg = DashboardConfig::baseline();
        cfg.refresh.real_time = false;
        let run = run_headless(&cfg, 3);
        assert_eq!(run.snapshots.len(), 4);
        assert_eq!(run.snapshots[3].timestamp_ms, 90_000);
    }

    #[test]
    fn zero_ticks_returns_initial_state() {
        let run = run_headless(&DashboardConfig::baseline(), 0);
        assert_eq!(run.snapshots.len(), 1);
        assert_eq!(run.stations.len(), 12);
        assert_eq!(run.fleet.station_count, 12);
    }

    #[test]
    fn capacity_hint_is_bounded() {
        assert_eq!(snapshot_capacity(0), 1);
        assert_eq!(snapshot_capacity(20), 21);
        assert_eq!(snapshot_capacity(u64::MAX), PREALLOC_SNAPSHOTS as usize);
    }
}
