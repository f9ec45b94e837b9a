//! 24-hour EV charging demand profile.

use rand::Rng;

use crate::config::Band;

/// Hours in the profile.
pub const HOURS: usize = 24;
/// Upper bound of the profile chart's y axis (kW).
pub const CHART_MAX_KW: f64 = 2000.0;
/// Spacing of the hour grid on the chart.
pub const HOUR_GRID_STEP: usize = 4;

const PEAK: Band = Band::new(800.0, 400.0);
const NIGHT: Band = Band::new(1200.0, 600.0);
const DAYTIME: Band = Band::new(200.0, 300.0);

/// Tariff period of an hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Commute peaks, 07-09 and 17-20.
    Peak,
    /// Cheap overnight charging, 22-06.
    Night,
    /// Everything else.
    Daytime,
}

impl Period {
    pub fn of_hour(hour: usize) -> Self {
        if (7..=9).contains(&hour) || (17..=20).contains(&hour) {
            Period::Peak
        } else if hour >= 22 || hour <= 6 {
            Period::Night
        } else {
            Period::Daytime
        }
    }

    fn band(self) -> Band {
        match self {
            Period::Peak => PEAK,
            Period::Night => NIGHT,
            Period::Daytime => DAYTIME,
        }
    }
}

/// Hourly fleet charging demand over one day (kW).
#[derive(Debug, Clone, PartialEq)]
pub struct DemandProfile {
    hourly_kw: [f32; HOURS],
}

impl DemandProfile {
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        let mut hourly_kw = [0.0; HOURS];
        for (hour, kw) in hourly_kw.iter_mut().enumerate() {
            *kw = Period::of_hour(hour).band().sample(rng);
        }
        Self { hourly_kw }
    }

    pub fn hourly_kw(&self) -> &[f32; HOURS] {
        &self.hourly_kw
    }

    /// `(hour, kW)` points for charting.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.hourly_kw
            .iter()
            .enumerate()
            .map(|(h, &kw)| (h as f64, f64::from(kw)))
            .collect()
    }

    /// Hour with the highest demand.
    pub fn peak_hour(&self) -> usize {
        self.hourly_kw
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map_or(0, |(h, _)| h)
    }

    /// Energy over the day at one-hour resolution (kWh).
    pub fn daily_energy_kwh(&self) -> f32 {
        self.hourly_kw.iter().sum()
    }
}
