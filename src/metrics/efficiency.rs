//! Efficiency metrics and gauge colour bands.

use rand::Rng;
use serde::Serialize;

use super::flow::PowerFlow;
use crate::config::FlowConfig;

/// Gauge below this value reads red.
pub const WARNING_THRESHOLD_PCT: f32 = 75.0;
/// Gauge at or above this value reads green.
pub const HEALTHY_THRESHOLD_PCT: f32 = 90.0;

/// Efficiency percentages for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Efficiency {
    /// Generation plant efficiency (%).
    pub generation_pct: f32,
    /// Transmission efficiency (%).
    pub transmission_pct: f32,
    /// Actual end-to-end efficiency derived from the power flow (%).
    pub overall_pct: f32,
}

impl Efficiency {
    /// Samples plant and line efficiency; `overall_pct` comes from `flow`.
    pub fn sample<R: Rng>(rng: &mut R, cfg: &FlowConfig, flow: &PowerFlow) -> Self {
        Self {
            generation_pct: cfg.generation_efficiency_pct.sample(rng),
            transmission_pct: cfg.transmission_efficiency_pct.sample(rng),
            overall_pct: flow.end_to_end_efficiency_pct(),
        }
    }

    /// The three gauges shown on the detailed efficiency view.
    pub fn gauges(&self) -> [GaugeReading; 3] {
        [
            GaugeReading::new("Generation", self.generation_pct),
            GaugeReading::new("Transmission", self.transmission_pct),
            GaugeReading::new("Overall", self.overall_pct),
        ]
    }

    /// The single gauge shown on the overview.
    pub fn system_gauge(&self) -> GaugeReading {
        GaugeReading::new("System Efficiency", self.overall_pct)
    }
}

/// Colour band of a 0-100 gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeBand {
    /// Red, below 75 %.
    Critical,
    /// Amber, 75 % up to 90 %.
    Warning,
    /// Green, 90 % and above.
    Healthy,
}

impl GaugeBand {
    pub fn classify(value_pct: f32) -> Self {
        if value_pct >= HEALTHY_THRESHOLD_PCT {
            GaugeBand::Healthy
        } else if value_pct >= WARNING_THRESHOLD_PCT {
            GaugeBand::Warning
        } else {
            GaugeBand::Critical
        }
    }
}

/// A labelled percentage rendered as a gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeReading {
    pub label: &'static str,
    pub value_pct: f32,
}

impl GaugeReading {
    pub fn new(label: &'static str, value_pct: f32) -> Self {
        Self { label, value_pct }
    }

    /// Filled fraction of the gauge arc, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.value_pct.is_nan() {
            return 0.0;
        }
        f64::from(self.value_pct.clamp(0.0, 100.0)) / 100.0
    }

    pub fn band(&self) -> GaugeBand {
        GaugeBand::classify(self.value_pct)
    }
}
