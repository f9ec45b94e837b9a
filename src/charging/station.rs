use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::config::ChargingConfig;

/// Operating state of a charging station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StationStatus {
    Charging,
    Available,
    Offline,
}

impl StationStatus {
    pub fn label(self) -> &'static str {
        match self {
            StationStatus::Charging => "charging",
            StationStatus::Available => "available",
            StationStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Vehicle model plugged into a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Vehicle {
    TeslaModel3,
    BmwI3,
    NissanLeaf,
    AudiETron,
}

impl Vehicle {
    pub const ALL: [Vehicle; 4] = [
        Vehicle::TeslaModel3,
        Vehicle::BmwI3,
        Vehicle::NissanLeaf,
        Vehicle::AudiETron,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Vehicle::TeslaModel3 => "Tesla Model 3",
            Vehicle::BmwI3 => "BMW i3",
            Vehicle::NissanLeaf => "Nissan Leaf",
            Vehicle::AudiETron => "Audi e-tron",
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A simulated EV charger.
///
/// Only stations in [`StationStatus::Charging`] evolve: each tick adds a
/// random amount of charge, counts the session clock down by one minute,
/// and tapers power once the vehicle is nearly full. A session that
/// reaches 100 % frees the station.
///
/// Power values are positive (load on the grid).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargingStation {
    /// Station identifier, e.g. `CS-001`.
    pub id: String,
    /// Display name, e.g. `Station 1`.
    pub name: String,
    pub status: StationStatus,
    /// Present draw in kW.
    pub current_power_kw: f32,
    /// Rated power in kW.
    pub max_power_kw: f32,
    /// Vehicle model (meaningful while charging).
    pub vehicle: Vehicle,
    /// Vehicle state of charge (0-100 %).
    pub charge_level_pct: f32,
    /// Minutes until the session completes.
    pub time_remaining_min: u32,
}

impl ChargingStation {
    /// Samples the initial state of station number `number` (1-based).
    ///
    /// Offline takes precedence over charging. Stations that are not
    /// charging draw no power and hold no session, including an offline
    /// station that also rolled a session: its draw is not counted in
    /// fleet totals.
    pub fn sample<R: Rng>(number: usize, rng: &mut R, cfg: &ChargingConfig) -> Self {
        let is_charging = rng.random::<f32>() < cfg.charging_probability;
        let is_offline = rng.random::<f32>() < cfg.offline_probability;
        let vehicle = Vehicle::ALL[rng.random_range(0..Vehicle::ALL.len())];

        let status = if is_offline {
            StationStatus::Offline
        } else if is_charging {
            StationStatus::Charging
        } else {
            StationStatus::Available
        };

        let (current_power_kw, charge_level_pct, time_remaining_min) =
            if status == StationStatus::Charging {
                (
                    cfg.power_draw_kw.sample(rng).min(cfg.max_power_kw),
                    cfg.initial_charge_pct.sample(rng).min(100.0),
                    rng.random_range(0..cfg.max_time_remaining_min.max(1)),
                )
            } else {
                (0.0, 0.0, 0)
            };

        Self {
            id: format!("CS-{number:03}"),
            name: format!("Station {number}"),
            status,
            current_power_kw,
            max_power_kw: cfg.max_power_kw,
            vehicle,
            charge_level_pct,
            time_remaining_min,
        }
    }

    pub fn is_charging(&self) -> bool {
        self.status == StationStatus::Charging
    }

    /// Advances the station by one tick. Returns `true` if a session finished.
    pub fn tick<R: Rng>(&mut self, rng: &mut R, cfg: &ChargingConfig) -> bool {
        if !self.is_charging() {
            return false;
        }

        let level = (self.charge_level_pct + rng.random::<f32>() * cfg.charge_step_max_pct)
            .min(100.0);
        self.charge_level_pct = level;
        self.time_remaining_min = self.time_remaining_min.saturating_sub(1);

        if level >= cfg.taper_threshold_pct {
            self.current_power_kw *= cfg.taper_factor;
        }

        if level >= 100.0 {
            self.status = StationStatus::Available;
            self.current_power_kw = 0.0;
            self.time_remaining_min = 0;
            return true;
        }
        false
    }

    /// Power draw as a fraction of rating, in `[0, 1]`.
    pub fn power_fraction(&self) -> f64 {
        if self.max_power_kw <= 0.0 {
            return 0.0;
        }
        f64::from((self.current_power_kw / self.max_power_kw).clamp(0.0, 1.0))
    }

    /// Remaining session time as `"Xh Ym"`.
    pub fn time_remaining_label(&self) -> String {
        format!(
            "{}h {}m",
            self.time_remaining_min / 60,
            self.time_remaining_min % 60
        )
    }
}
