//! The set of charging stations and its utilisation analytics.

use std::fmt;

use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use tracing::info;

use super::station::{ChargingStation, StationStatus};
use crate::config::ChargingConfig;

/// Nominal charging session length shown in the analytics view (hours).
pub const AVERAGE_SESSION_HOURS: f32 = 2.5;
/// Multiplier from current draw to the estimated daily peak.
const PEAK_FACTOR: f32 = 1.5;
/// Multiplier from current draw to the estimated off-peak demand.
const OFF_PEAK_FACTOR: f32 = 0.6;

/// A fleet of simulated charging stations sharing one seeded RNG.
#[derive(Debug, Clone)]
pub struct ChargingFleet {
    config: ChargingConfig,
    stations: Vec<ChargingStation>,
    ticks: u64,
    rng: StdRng,
}

impl ChargingFleet {
    /// Builds `config.station_count` stations numbered from 1.
    pub fn generate(config: &ChargingConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stations = (1..=config.station_count)
            .map(|n| ChargingStation::sample(n, &mut rng, config))
            .collect();
        Self {
            config: config.clone(),
            stations,
            ticks: 0,
            rng,
        }
    }

    pub fn stations(&self) -> &[ChargingStation] {
        &self.stations
    }

    /// Number of station ticks applied since generation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances every station by one tick. Returns the number of sessions
    /// that completed.
    pub fn tick(&mut self) -> usize {
        let mut completed = 0;
        for station in &mut self.stations {
            if station.tick(&mut self.rng, &self.config) {
                info!(station = %station.id, "charging session complete");
                completed += 1;
            }
        }
        self.ticks += 1;
        completed
    }

    pub fn summary(&self) -> FleetSummary {
        FleetSummary::from_stations(&self.stations)
    }
}

/// Utilisation analytics over a set of stations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetSummary {
    pub station_count: usize,
    /// Sum of present draw (kW).
    pub total_power_kw: f32,
    pub active: usize,
    pub available: usize,
    pub offline: usize,
    /// Share of stations charging (%).
    pub station_utilization_pct: f32,
    /// Present draw as a share of total rated power (%).
    pub power_utilization_pct: f32,
    /// Mean charge level across charging stations (%), 0 when none charge.
    pub average_charge_pct: f32,
    /// Present draw sustained for a day (MWh).
    pub projected_daily_mwh: f32,
    /// Estimated daily peak (kW).
    pub peak_demand_kw: f32,
    /// Estimated off-peak demand (kW).
    pub off_peak_demand_kw: f32,
    /// Nominal session length (h).
    pub average_session_hours: f32,
}

impl FleetSummary {
    pub fn from_stations(stations: &[ChargingStation]) -> Self {
        let count = stations.len();
        let total_power_kw: f32 = stations.iter().map(|s| s.current_power_kw).sum();
        let rated_kw: f32 = stations.iter().map(|s| s.max_power_kw).sum();
        let count_of =
            |status: StationStatus| stations.iter().filter(|s| s.status == status).count();
        let active = count_of(StationStatus::Charging);
        let available = count_of(StationStatus::Available);
        let offline = count_of(StationStatus::Offline);

        let charge_sum: f32 = stations
            .iter()
            .filter(|s| s.is_charging())
            .map(|s| s.charge_level_pct)
            .sum();

        Self {
            station_count: count,
            total_power_kw,
            active,
            available,
            offline,
            station_utilization_pct: percent(active as f32, count as f32),
            power_utilization_pct: percent(total_power_kw, rated_kw),
            average_charge_pct: if active > 0 {
                charge_sum / active as f32
            } else {
                0.0
            },
            projected_daily_mwh: total_power_kw * 24.0 / 1000.0,
            peak_demand_kw: total_power_kw * PEAK_FACTOR,
            off_peak_demand_kw: total_power_kw * OFF_PEAK_FACTOR,
            average_session_hours: AVERAGE_SESSION_HOURS,
        }
    }
}

fn percent(part: f32, whole: f32) -> f32 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

impl fmt::Display for FleetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Charging Summary ---")?;
        writeln!(
            f,
            "Stations:              {} ({} active, {} available, {} offline)",
            self.station_count, self.active, self.available, self.offline
        )?;
        writeln!(f, "Total power:           {:.1} kW", self.total_power_kw)?;
        writeln!(
            f,
            "Utilization:           {:.1}% stations, {:.1}% power",
            self.station_utilization_pct, self.power_utilization_pct
        )?;
        writeln!(f, "Average charge level:  {:.1}%", self.average_charge_pct)?;
        write!(
            f,
            "Projected daily:       {:.1} MWh (peak {:.1} kW, off-peak {:.1} kW)",
            self.projected_daily_mwh, self.peak_demand_kw, self.off_peak_demand_kw
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charging::station::Vehicle;

    fn station(status: StationStatus, power: f32, level: f32) -> ChargingStation {
        ChargingStation {
            id: "CS-000".into(),
            name: "Station 0".into(),
            status,
            current_power_kw: power,
            max_power_kw: 150.0,
            vehicle: Vehicle::BmwI3,
            charge_level_pct: level,
            time_remaining_min: 30,
        }
    }

    #[test]
    fn generates_configured_count() {
        let fleet = ChargingFleet::generate(&ChargingConfig::default(), 42);
        assert_eq!(fleet.stations().len(), 12);
        assert_eq!(fleet.stations()[0].id, "CS-001");
        assert_eq!(fleet.stations()[11].id, "CS-012");
    }

    #[test]
    fn deterministic_for_same_seed() {
        let cfg = ChargingConfig::default();
        let mut a = ChargingFleet::generate(&cfg, 7);
        let mut b = ChargingFleet::generate(&cfg, 7);
        for _ in 0..50 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.stations(), b.stations());
        assert_eq!(a.ticks(), 50);
    }

    #[test]
    fn status_counts_partition_fleet() {
        let fleet = ChargingFleet::generate(&ChargingConfig::default(), 99);
        let s = fleet.summary();
        assert_eq!(s.active + s.available + s.offline, s.station_count);
    }

    #[test]
    fn analytics_formulas() {
        let stations = vec![
            station(StationStatus::Charging, 100.0, 40.0),
            station(StationStatus::Charging, 50.0, 60.0),
            station(StationStatus::Available, 0.0, 0.0),
            station(StationStatus::Offline, 0.0, 0.0),
        ];
        let s = FleetSummary::from_stations(&stations);
        assert_eq!(s.total_power_kw, 150.0);
        assert_eq!(s.active, 2);
        assert_eq!(s.available, 1);
        assert_eq!(s.offline, 1);
        assert!((s.station_utilization_pct - 50.0).abs() < 1e-4);
        assert!((s.power_utilization_pct - 25.0).abs() < 1e-4);
        assert!((s.average_charge_pct - 50.0).abs() < 1e-4);
        assert!((s.projected_daily_mwh - 3.6).abs() < 1e-4);
        assert!((s.peak_demand_kw - 225.0).abs() < 1e-4);
        assert!((s.off_peak_demand_kw - 90.0).abs() < 1e-4);
        assert_eq!(s.average_session_hours, 2.5);
    }

    #[test]
    fn idle_fleet_has_zero_average() {
        let stations = vec![station(StationStatus::Available, 0.0, 0.0)];
        let s = FleetSummary::from_stations(&stations);
        assert_eq!(s.average_charge_pct, 0.0);
        assert_eq!(s.power_utilization_pct, 0.0);
    }

    #[test]
    fn empty_fleet_is_all_zero() {
        assert_eq!(FleetSummary::from_stations(&[]), FleetSummary {
            average_session_hours: AVERAGE_SESSION_HOURS,
            ..FleetSummary::default()
        });
    }

    #[test]
    fn charging_only_drains_towards_available() {
        let cfg = ChargingConfig {
            charging_probability: 1.0,
            offline_probability: 0.0,
            charge_step_max_pct: 50.0,
            ..ChargingConfig::default()
        };
        let mut fleet = ChargingFleet::generate(&cfg, 5);
        assert_eq!(fleet.summary().active, 12);
        let mut completed = 0;
        for _ in 0..200 {
            completed += fleet.tick();
        }
        let s = fleet.summary();
        assert_eq!(s.active, 0);
        assert_eq!(s.available, 12);
        assert_eq!(completed, 12);
        assert_eq!(s.total_power_kw, 0.0);
    }
}
