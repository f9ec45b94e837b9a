//! Weather conditions, station readings, and their impact on the grid.

use rand::Rng;
use serde::Serialize;

use crate::config::WeatherConfig;

/// Irradiance above which solar output is optimal (W/m²).
const SOLAR_OPTIMAL_WM2: f32 = 700.0;
/// Wind speed above which wind output is high (m/s).
const WIND_HIGH_MS: f32 = 10.0;
/// Temperature above which cooling load increases (°C).
const COOLING_TEMP_C: f32 = 25.0;

/// Relative map positions of the three weather stations.
const STATION_SITES: [(&str, f32, f32); 3] = [
    ("West", 0.2, 0.3),
    ("Central", 0.5, 0.6),
    ("East", 0.8, 0.4),
];

/// Environmental conditions for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weather {
    pub temperature_c: f32,
    pub wind_speed_ms: f32,
    pub solar_irradiance_wm2: f32,
    pub humidity_pct: f32,
}

impl Weather {
    pub fn sample<R: Rng>(rng: &mut R, cfg: &WeatherConfig) -> Self {
        Self {
            temperature_c: cfg.temperature_c.sample(rng),
            wind_speed_ms: cfg.wind_speed_ms.sample(rng),
            solar_irradiance_wm2: cfg.solar_irradiance_wm2.sample(rng),
            humidity_pct: cfg.humidity_pct.sample(rng),
        }
    }
}

/// A point reading on the weather overlay map.
///
/// `x` and `y` are relative map coordinates in `[0, 1]`, origin top-left.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherStation {
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
    pub temperature_c: f32,
}

impl WeatherStation {
    /// Samples all stations around the regional temperature, ± `spread_c`.
    pub fn sample_all<R: Rng>(rng: &mut R, weather: &Weather, spread_c: f32) -> Vec<Self> {
        STATION_SITES
            .iter()
            .map(|&(name, x, y)| Self {
                name,
                x,
                y,
                temperature_c: weather.temperature_c + rng.random::<f32>() * 2.0 * spread_c
                    - spread_c,
            })
            .collect()
    }
}

/// Qualitative grid impact of the current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherImpact {
    /// Irradiance above 700 W/m².
    pub solar_optimal: bool,
    /// Wind above 10 m/s.
    pub wind_high: bool,
    /// Temperature above 25 °C.
    pub cooling_increased: bool,
}

impl WeatherImpact {
    pub fn assess(weather: &Weather) -> Self {
        Self {
            solar_optimal: weather.solar_irradiance_wm2 > SOLAR_OPTIMAL_WM2,
            wind_high: weather.wind_speed_ms > WIND_HIGH_MS,
            cooling_increased: weather.temperature_c > COOLING_TEMP_C,
        }
    }

    pub fn solar_label(&self) -> &'static str {
        if self.solar_optimal { "Optimal" } else { "Reduced" }
    }

    pub fn wind_label(&self) -> &'static str {
        if self.wind_high {
            "High Output"
        } else {
            "Moderate Output"
        }
    }

    pub fn cooling_label(&self) -> &'static str {
        if self.cooling_increased {
            "Increased"
        } else {
            "Normal"
        }
    }
}

/// Normalised overlay intensities used to tint the weather map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayIntensity {
    /// 15-35 °C mapped to 0-1.
    pub heat: f32,
    /// 0-20 m/s mapped to 0-1.
    pub wind: f32,
    /// 0-1000 W/m² mapped to 0-1.
    pub solar: f32,
}

impl OverlayIntensity {
    pub fn from_weather(weather: &Weather) -> Self {
        Self {
            heat: ((weather.temperature_c - 15.0) / 20.0).clamp(0.0, 1.0),
            wind: (weather.wind_speed_ms / 20.0).clamp(0.0, 1.0),
            solar: (weather.solar_irradiance_wm2 / 1000.0).clamp(0.0, 1.0),
        }
    }
}
