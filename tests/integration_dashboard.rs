//! Integration tests for the dashboard clock, refresh, and charging fleet.

mod common;

use gridview::charging::StationStatus;
use gridview::dashboard::{Dashboard, MAX_HISTORY};
use gridview::metrics::efficiency::GaugeBand;

#[test]
fn an_hour_of_live_updates() {
    let mut d = Dashboard::new(common::quiet_config(), common::START_EPOCH_MS);
    let mut refreshes = 0;
    let mut station_ticks = 0;

    // 250 ms frames for one hour
    for _ in 0..(3_600_000 / 250) {
        let step = d.advance(250);
        refreshes += u64::from(step.refreshed);
        station_ticks += step.station_ticks;
    }

    assert_eq!(refreshes, 120);
    assert_eq!(station_ticks, 1_800);
    assert_eq!(d.current().seq, 120);
    assert_eq!(
        d.current().timestamp_ms,
        common::START_EPOCH_MS + 3_600_000
    );
    assert!(d.history().len() <= MAX_HISTORY);
    common::assert_station_invariants(d.fleet().stations());
}

#[test]
fn snapshots_respect_flow_ordering() {
    let mut d = Dashboard::new(common::seeded_baseline(3), common::START_EPOCH_MS);
    for _ in 0..150 {
        d.refresh();
        let p = &d.current().power_flow;
        assert!(p.generation_kw >= p.transmission_kw);
        assert!(p.transmission_kw >= p.distribution_kw);
        assert!(p.distribution_kw >= p.consumption_kw);
        let q = d.quick_stats();
        assert_eq!(q.active_loads, (p.consumption_kw / 10.0).floor() as u32);
    }
}

#[test]
fn default_bands_keep_system_gauge_green_or_amber() {
    let mut d = Dashboard::new(common::seeded_baseline(11), common::START_EPOCH_MS);
    for _ in 0..100 {
        d.refresh();
        let band = d.current().efficiency.system_gauge().band();
        assert_ne!(band, GaugeBand::Critical);
    }
}

#[test]
fn certain_alerts_always_fire() {
    let mut cfg = common::quiet_config();
    cfg.alerts.probability = 1.0;
    let mut d = Dashboard::new(cfg, 0);
    for _ in 0..10 {
        d.refresh();
        assert!(d.current().has_alerts());
    }
}

#[test]
fn fleet_drains_to_available_over_time() {
    let mut cfg = common::quiet_config();
    cfg.charging.charging_probability = 1.0;
    cfg.charging.offline_probability = 0.0;
    let mut d = Dashboard::new(cfg, 0);
    assert_eq!(d.fleet_summary().active, 12);

    // 2 s ticks, at least 1 % mean gain per tick: well under 10 000 ticks
    let mut completed = 0;
    for _ in 0..10_000 {
        completed += d.advance(2_000).sessions_completed;
        common::assert_station_invariants(d.fleet().stations());
    }

    assert_eq!(completed, 12);
    assert!(
        d.fleet()
            .stations()
            .iter()
            .all(|s| s.status == StationStatus::Available)
    );
    assert_eq!(d.fleet_summary().total_power_kw, 0.0);
}

#[test]
fn paused_dashboard_keeps_charging_but_not_refreshing() {
    let mut d = Dashboard::new(common::quiet_config(), 0);
    d.toggle_real_time();
    let before = d.current().clone();
    for _ in 0..60 {
        d.advance(1_000);
    }
    assert_eq!(d.current(), &before);
    assert_eq!(d.fleet().ticks(), 30);

    d.toggle_real_time();
    assert_eq!(d.next_refresh_in_ms(), Some(30_000));
}
