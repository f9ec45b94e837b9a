//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use gridview::charging::{ChargingStation, StationStatus};
use gridview::config::DashboardConfig;

/// Fixed wall-clock start used by the integration tests (ms since epoch).
pub const START_EPOCH_MS: u64 = 1_700_000_000_000;

/// Baseline preset with a caller-chosen seed.
pub fn seeded_baseline(seed: u64) -> DashboardConfig {
    DashboardConfig {
        seed,
        ..DashboardConfig::baseline()
    }
}

/// Baseline preset that never raises alerts.
pub fn quiet_config() -> DashboardConfig {
    let mut cfg = DashboardConfig::baseline();
    cfg.alerts.probability = 0.0;
    cfg
}

/// Path of a sample config shipped in `configs/`.
pub fn sample_config(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("configs")
        .join(name)
}

/// Unique scratch file path under the system temp dir.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gridview-{}-{name}", std::process::id()))
}

/// Asserts the per-station invariants that hold after any number of ticks.
pub fn assert_station_invariants(stations: &[ChargingStation]) {
    for s in stations {
        assert!(
            (0.0..=100.0).contains(&s.charge_level_pct),
            "{}: charge {}",
            s.id,
            s.charge_level_pct
        );
        assert!(
            s.current_power_kw >= 0.0 && s.current_power_kw <= s.max_power_kw,
            "{}: power {}",
            s.id,
            s.current_power_kw
        );
        if s.status != StationStatus::Charging {
            assert_eq!(s.current_power_kw, 0.0, "{} idle but drawing", s.id);
        }
    }
}
