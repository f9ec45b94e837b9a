//! TOML-based dashboard configuration and preset definitions.

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::metrics::refresh::{INTERVAL_MAX_MS, INTERVAL_MIN_MS, INTERVAL_STEP_MS};

/// A uniform sampling band: `base + U[0,1) * span`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Band {
    /// Lower bound of the band.
    pub base: f32,
    /// Width of the band (must be >= 0).
    pub span: f32,
}

impl Band {
    pub const fn new(base: f32, span: f32) -> Self {
        Self { base, span }
    }

    /// Draws one value from the band.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        self.base + rng.random::<f32>() * self.span
    }

    pub fn is_finite(&self) -> bool {
        self.base.is_finite() && self.span.is_finite()
    }

    /// Upper (exclusive) bound of the band.
    pub fn upper(&self) -> f32 {
        self.base + self.span
    }
}

/// Top-level dashboard configuration parsed from TOML.
///
/// All fields have defaults matching the baseline preset. Load from
/// TOML with [`DashboardConfig::from_toml_file`] or use
/// [`DashboardConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Master random seed.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Refresh timing.
    #[serde(default)]
    pub refresh: RefreshConfig,
    /// Power flow generation and stage losses.
    #[serde(default)]
    pub flow: FlowConfig,
    /// Weather sampling bands.
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Alert raising.
    #[serde(default)]
    pub alerts: AlertConfig,
    /// EV charging stations.
    #[serde(default)]
    pub charging: ChargingConfig,
}

fn default_seed() -> u64 {
    42
}

/// Refresh timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefreshConfig {
    /// Snapshot refresh interval in milliseconds (30 000..=60 000, 5 000 steps).
    pub interval_ms: u64,
    /// Whether the dashboard starts in real-time mode.
    pub real_time: bool,
    /// Charging station update period in milliseconds.
    pub station_tick_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: 30_000,
            real_time: true,
            station_tick_ms: 2_000,
        }
    }
}

/// Power flow generation and per-stage loss bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowConfig {
    /// Generated power (kW).
    pub generation_kw: Band,
    /// Generation to transmission loss fraction.
    pub transmission_loss: Band,
    /// Transmission to distribution loss fraction.
    pub distribution_loss: Band,
    /// Distribution to consumption loss fraction.
    pub consumption_loss: Band,
    /// Generation plant efficiency (%).
    pub generation_efficiency_pct: Band,
    /// Transmission efficiency (%).
    pub transmission_efficiency_pct: Band,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            generation_kw: Band::new(50.0, 100.0),
            transmission_loss: Band::new(0.02, 0.03),
            distribution_loss: Band::new(0.03, 0.04),
            consumption_loss: Band::new(0.01, 0.01),
            generation_efficiency_pct: Band::new(92.0, 6.0),
            transmission_efficiency_pct: Band::new(95.0, 3.0),
        }
    }
}

/// Weather sampling bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeatherConfig {
    /// Air temperature (°C).
    pub temperature_c: Band,
    /// Wind speed (m/s).
    pub wind_speed_ms: Band,
    /// Solar irradiance (W/m²).
    pub solar_irradiance_wm2: Band,
    /// Relative humidity (%).
    pub humidity_pct: Band,
    /// Half-width of the per-station temperature spread (°C).
    pub station_spread_c: f32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            temperature_c: Band::new(22.0, 10.0),
            wind_speed_ms: Band::new(5.0, 15.0),
            solar_irradiance_wm2: Band::new(600.0, 400.0),
            humidity_pct: Band::new(45.0, 30.0),
            station_spread_c: 2.0,
        }
    }
}

/// Alert raising.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlertConfig {
    /// Probability that a snapshot carries a high-load alert (0.0-1.0).
    pub probability: f32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { probability: 0.2 }
    }
}

/// EV charging station parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChargingConfig {
    /// Number of stations in the fleet.
    pub station_count: usize,
    /// Rated power of each station (kW).
    pub max_power_kw: f32,
    /// Probability a station starts with a vehicle charging.
    pub charging_probability: f32,
    /// Probability a station starts offline (takes precedence).
    pub offline_probability: f32,
    /// Initial draw of a charging station (kW).
    pub power_draw_kw: Band,
    /// Initial charge level of a charging vehicle (%).
    pub initial_charge_pct: Band,
    /// Upper bound on the initial time remaining (minutes, exclusive).
    pub max_time_remaining_min: u32,
    /// Largest charge gain per station tick (%).
    pub charge_step_max_pct: f32,
    /// Charge level at which power starts to taper (%).
    pub taper_threshold_pct: f32,
    /// Power multiplier applied each tick above the taper threshold.
    pub taper_factor: f32,
}

impl Default for ChargingConfig {
    fn default() -> Self {
        Self {
            station_count: 12,
            max_power_kw: 150.0,
            charging_probability: 0.7,
            offline_probability: 0.1,
            power_draw_kw: Band::new(20.0, 130.0),
            initial_charge_pct: Band::new(20.0, 60.0),
            max_time_remaining_min: 180,
            charge_step_max_pct: 2.0,
            taper_threshold_pct: 80.0,
            taper_factor: 0.8,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

impl DashboardConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "storm", "rush_hour"];

    /// Returns the baseline configuration.
    pub fn baseline() -> Self {
        Self {
            seed: default_seed(),
            refresh: RefreshConfig::default(),
            flow: FlowConfig::default(),
            weather: WeatherConfig::default(),
            alerts: AlertConfig::default(),
            charging: ChargingConfig::default(),
        }
    }

    /// Returns the storm preset: strong wind, weak sun, lossy lines, frequent alerts.
    pub fn storm() -> Self {
        Self {
            flow: FlowConfig {
                transmission_loss: Band::new(0.03, 0.04),
                distribution_loss: Band::new(0.04, 0.05),
                ..FlowConfig::default()
            },
            weather: WeatherConfig {
                temperature_c: Band::new(12.0, 8.0),
                wind_speed_ms: Band::new(12.0, 13.0),
                solar_irradiance_wm2: Band::new(150.0, 350.0),
                humidity_pct: Band::new(70.0, 25.0),
                station_spread_c: 3.0,
            },
            alerts: AlertConfig { probability: 0.5 },
            charging: ChargingConfig {
                offline_probability: 0.25,
                ..ChargingConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the rush-hour preset: heavy generation and a busy charging fleet.
    pub fn rush_hour() -> Self {
        Self {
            flow: FlowConfig {
                generation_kw: Band::new(80.0, 120.0),
                ..FlowConfig::default()
            },
            charging: ChargingConfig {
                station_count: 24,
                charging_probability: 0.9,
                offline_probability: 0.05,
                ..ChargingConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "storm" => Ok(Self::storm()),
            "rush_hour" => Ok(Self::rush_hour()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let r = &self.refresh;
        if !(INTERVAL_MIN_MS..=INTERVAL_MAX_MS).contains(&r.interval_ms) {
            errors.push(ConfigError::new(
                "refresh.interval_ms",
                format!("must be in [{INTERVAL_MIN_MS}, {INTERVAL_MAX_MS}]"),
            ));
        } else if r.interval_ms % INTERVAL_STEP_MS != 0 {
            errors.push(ConfigError::new(
                "refresh.interval_ms",
                format!("must be a multiple of {INTERVAL_STEP_MS}"),
            ));
        }
        if r.station_tick_ms == 0 {
            errors.push(ConfigError::new("refresh.station_tick_ms", "must be > 0"));
        }

        let f = &self.flow;
        check_band(&mut errors, "flow.generation_kw", f.generation_kw);
        for (field, band) in [
            ("flow.transmission_loss", f.transmission_loss),
            ("flow.distribution_loss", f.distribution_loss),
            ("flow.consumption_loss", f.consumption_loss),
        ] {
            check_band(&mut errors, field, band);
            if band.upper() >= 1.0 {
                errors.push(ConfigError::new(field, "base + span must be < 1.0"));
            }
        }
        for (field, band) in [
            ("flow.generation_efficiency_pct", f.generation_efficiency_pct),
            ("flow.transmission_efficiency_pct", f.transmission_efficiency_pct),
        ] {
            check_band(&mut errors, field, band);
            if band.upper() > 100.0 {
                errors.push(ConfigError::new(field, "base + span must be <= 100"));
            }
        }

        let w = &self.weather;
        check_band(&mut errors, "weather.wind_speed_ms", w.wind_speed_ms);
        check_band(
            &mut errors,
            "weather.solar_irradiance_wm2",
            w.solar_irradiance_wm2,
        );
        check_band(&mut errors, "weather.humidity_pct", w.humidity_pct);
        if w.humidity_pct.upper() > 100.0 {
            errors.push(ConfigError::new(
                "weather.humidity_pct",
                "base + span must be <= 100",
            ));
        }
        // temperature base may be negative
        if !w.temperature_c.is_finite() {
            errors.push(ConfigError::new(
                "weather.temperature_c",
                "base and span must be finite",
            ));
        } else if w.temperature_c.span < 0.0 {
            errors.push(ConfigError::new("weather.temperature_c", "span must be >= 0"));
        }
        if check_finite(&mut errors, "weather.station_spread_c", w.station_spread_c)
            && w.station_spread_c < 0.0
        {
            errors.push(ConfigError::new("weather.station_spread_c", "must be >= 0"));
        }

        if !(0.0..=1.0).contains(&self.alerts.probability) {
            errors.push(ConfigError::new(
                "alerts.probability",
                "must be in [0.0, 1.0]",
            ));
        }

        let c = &self.charging;
        if c.station_count == 0 {
            errors.push(ConfigError::new("charging.station_count", "must be > 0"));
        }
        if check_finite(&mut errors, "charging.max_power_kw", c.max_power_kw)
            && c.max_power_kw <= 0.0
        {
            errors.push(ConfigError::new("charging.max_power_kw", "must be > 0"));
        }
        for (field, p) in [
            ("charging.charging_probability", c.charging_probability),
            ("charging.offline_probability", c.offline_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                errors.push(ConfigError::new(field, "must be in [0.0, 1.0]"));
            }
        }
        check_band(&mut errors, "charging.power_draw_kw", c.power_draw_kw);
        if c.power_draw_kw.upper() > c.max_power_kw {
            errors.push(ConfigError::new(
                "charging.power_draw_kw",
                "base + span must be <= charging.max_power_kw",
            ));
        }
        check_band(&mut errors, "charging.initial_charge_pct", c.initial_charge_pct);
        if c.initial_charge_pct.upper() > 100.0 {
            errors.push(ConfigError::new(
                "charging.initial_charge_pct",
                "base + span must be <= 100",
            ));
        }
        if check_finite(&mut errors, "charging.charge_step_max_pct", c.charge_step_max_pct)
            && c.charge_step_max_pct < 0.0
        {
            errors.push(ConfigError::new("charging.charge_step_max_pct", "must be >= 0"));
        }
        if !(0.0..=100.0).contains(&c.taper_threshold_pct) {
            errors.push(ConfigError::new(
                "charging.taper_threshold_pct",
                "must be in [0.0, 100.0]",
            ));
        }
        if !(0.0..=1.0).contains(&c.taper_factor) {
            errors.push(ConfigError::new("charging.taper_factor", "must be in [0.0, 1.0]"));
        }

        errors
    }
}

/// Pushes an error for NaN or infinite values. Returns whether `value` is finite.
fn check_finite(errors: &mut Vec<ConfigError>, field: &str, value: f32) -> bool {
    let finite = value.is_finite();
    if !finite {
        errors.push(ConfigError::new(field, "must be finite"));
    }
    finite
}

fn check_band(errors: &mut Vec<ConfigError>, field: &str, band: Band) {
    if !band.is_finite() {
        errors.push(ConfigError::new(field, "base and span must be finite"));
        return;
    }
    if band.base < 0.0 {
        errors.push(ConfigError::new(field, "base must be >= 0"));
    }
    if band.span < 0.0 {
        errors.push(ConfigError::new(field, "span must be >= 0"));
    }
}
