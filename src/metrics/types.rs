//! Snapshot record and the overview's quick stats.

use std::fmt;

use serde::Serialize;

use super::alert::Alert;
use super::efficiency::Efficiency;
use super::flow::PowerFlow;
use super::weather::{Weather, WeatherStation};

/// Complete record of one dashboard refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Refresh sequence number, starting at 0.
    pub seq: u64,
    /// Wall-clock time of the refresh (ms since the Unix epoch).
    pub timestamp_ms: u64,
    pub power_flow: PowerFlow,
    pub efficiency: Efficiency,
    pub weather: Weather,
    /// Point readings for the weather overlay map.
    pub weather_stations: Vec<WeatherStation>,
    pub alerts: Vec<Alert>,
}

impl Snapshot {
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }

    pub fn quick_stats(&self) -> QuickStats {
        QuickStats::from(self)
    }

    /// `HH:MM:SS` (UTC) of the refresh, shown as "Last updated".
    pub fn time_label(&self) -> String {
        clock_label(self.timestamp_ms)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.power_flow;
        let w = &self.weather;
        write!(
            f,
            "#{:<4} {} | gen={:>6.1} tx={:>6.1} dist={:>6.1} cons={:>6.1} kW | \
             eff={:>5.1}% | {:.1}°C {:.1} m/s {:.0} W/m² {:.1}% | alerts={}",
            self.seq,
            self.time_label(),
            p.generation_kw,
            p.transmission_kw,
            p.distribution_kw,
            p.consumption_kw,
            self.efficiency.overall_pct,
            w.temperature_c,
            w.wind_speed_ms,
            w.solar_irradiance_wm2,
            w.humidity_pct,
            self.alerts.len(),
        )
    }
}

/// The four headline cards above the tabs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickStats {
    pub total_generation_kw: f32,
    pub system_efficiency_pct: f32,
    pub temperature_c: f32,
    pub active_loads: u32,
}

impl From<&Snapshot> for QuickStats {
    fn from(s: &Snapshot) -> Self {
        Self {
            total_generation_kw: s.power_flow.generation_kw,
            system_efficiency_pct: s.efficiency.overall_pct,
            temperature_c: s.weather.temperature_c,
            active_loads: s.power_flow.active_loads(),
        }
    }
}

/// Formats epoch milliseconds as a UTC wall-clock `HH:MM:SS`.
pub fn clock_label(timestamp_ms: u64) -> String {
    let secs_of_day = (timestamp_ms / 1000) % 86_400;
    format!(
        "{:02}:{:02}:{:02}",
        secs_of_day / 3600,
        (secs_of_day % 3600) / 60,
        secs_of_day % 60
    )
}
