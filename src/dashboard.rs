//! Dashboard state: current snapshot, history, fleet, and the two timers.

use std::collections::VecDeque;

use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::charging::{ChargingFleet, DemandProfile, FleetSummary};
use crate::config::DashboardConfig;
use crate::metrics::refresh::{RefreshTimer, StationTicker};
use crate::metrics::{QuickStats, Snapshot, SnapshotGenerator};

/// Maximum number of snapshots kept for the trend charts.
pub const MAX_HISTORY: usize = 200;

/// Seed offsets keep the fleet and profile streams independent of the
/// snapshot stream.
const FLEET_SEED_OFFSET: u64 = 1;
const PROFILE_SEED_OFFSET: u64 = 2;

/// What happened during one [`Dashboard::advance`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advance {
    pub refreshed: bool,
    pub station_ticks: u64,
    pub sessions_completed: usize,
}

/// Owns every piece of live dashboard data.
///
/// Time is the number of milliseconds since construction, advanced
/// explicitly by the caller. Snapshot timestamps add that to the wall-clock
/// start time.
pub struct Dashboard {
    config: DashboardConfig,
    generator: SnapshotGenerator,
    fleet: ChargingFleet,
    profile_rng: StdRng,
    profile: DemandProfile,
    current: Snapshot,
    history: VecDeque<Snapshot>,
    refresh: RefreshTimer,
    ticker: StationTicker,
    now_ms: u64,
    start_epoch_ms: u64,
}

impl Dashboard {
    /// Builds the dashboard and generates the first snapshot.
    ///
    /// `config` must have passed [`DashboardConfig::validate`].
    pub fn new(config: DashboardConfig, start_epoch_ms: u64) -> Self {
        let mut generator = SnapshotGenerator::new(&config);
        let fleet = ChargingFleet::generate(
            &config.charging,
            config.seed.wrapping_add(FLEET_SEED_OFFSET),
        );
        let mut profile_rng = StdRng::seed_from_u64(config.seed.wrapping_add(PROFILE_SEED_OFFSET));
        let profile = DemandProfile::sample(&mut profile_rng);
        let current = generator.next(start_epoch_ms);

        let mut history = VecDeque::with_capacity(MAX_HISTORY);
        history.push_back(current.clone());

        let refresh = RefreshTimer::new(config.refresh.interval_ms, config.refresh.real_time, 0);
        let ticker = StationTicker::new(config.refresh.station_tick_ms, 0);

        info!(
            seed = config.seed,
            interval_ms = refresh.interval_ms(),
            stations = fleet.stations().len(),
            "dashboard started"
        );

        Self {
            config,
            generator,
            fleet,
            profile_rng,
            profile,
            current,
            history,
            refresh,
            ticker,
            now_ms: 0,
            start_epoch_ms,
        }
    }

    /// Moves the clock forward by `delta_ms`.
    ///
    /// Station ticks that fell due run first, then one snapshot refresh if
    /// the refresh timer is due. A long delta produces at most one refresh.
    pub fn advance(&mut self, delta_ms: u64) -> Advance {
        self.now_ms += delta_ms;
        let mut out = Advance::default();

        let ticks = self.ticker.poll(self.now_ms);
        for _ in 0..ticks {
            out.sessions_completed += self.fleet.tick();
        }
        if ticks > 0 {
            self.profile = DemandProfile::sample(&mut self.profile_rng);
        }
        out.station_ticks = ticks;

        if self.refresh.due(self.now_ms) {
            self.refresh();
            out.refreshed = true;
        }
        out
    }

    /// Generates a new snapshot now. Allowed while paused.
    pub fn refresh(&mut self) {
        let snapshot = self.generator.next(self.epoch_ms());
        info!(
            seq = snapshot.seq,
            generation_kw = snapshot.power_flow.generation_kw,
            efficiency_pct = snapshot.efficiency.overall_pct,
            alerts = snapshot.alerts.len(),
            "refreshed"
        );
        if self.history.len() == MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(snapshot.clone());
        self.current = snapshot;
        self.refresh.fired(self.now_ms);
    }

    pub fn toggle_real_time(&mut self) {
        let on = !self.refresh.is_real_time();
        self.refresh.set_real_time(on, self.now_ms);
        info!(real_time = on, "real-time updates toggled");
    }

    pub fn faster(&mut self) {
        self.refresh.faster(self.now_ms);
        info!(interval_ms = self.refresh.interval_ms(), "refresh interval changed");
    }

    pub fn slower(&mut self) {
        self.refresh.slower(self.now_ms);
        info!(interval_ms = self.refresh.interval_ms(), "refresh interval changed");
    }

    pub fn quick_stats(&self) -> QuickStats {
        self.current.quick_stats()
    }

    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Snapshots oldest first, including the current one.
    pub fn history(&self) -> &VecDeque<Snapshot> {
        &self.history
    }

    pub fn fleet(&self) -> &ChargingFleet {
        &self.fleet
    }

    pub fn fleet_summary(&self) -> FleetSummary {
        self.fleet.summary()
    }

    pub fn profile(&self) -> &DemandProfile {
        &self.profile
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn is_real_time(&self) -> bool {
        self.refresh.is_real_time()
    }

    pub fn interval_ms(&self) -> u64 {
        self.refresh.interval_ms()
    }

    /// Milliseconds to the next automatic refresh, `None` while paused.
    pub fn next_refresh_in_ms(&self) -> Option<u64> {
        self.refresh.remaining_ms(self.now_ms)
    }

    /// Milliseconds since construction.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn epoch_ms(&self) -> u64 {
        self.start_epoch_ms + self.now_ms
    }
}
