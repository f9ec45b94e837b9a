//! Power flow pipeline: generation through consumption with per-stage losses.

use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::config::FlowConfig;

/// A node in the simulated energy pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Generation,
    Transmission,
    Distribution,
    Consumption,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 4] = [
        Stage::Generation,
        Stage::Transmission,
        Stage::Distribution,
        Stage::Consumption,
    ];

    /// The downstream stage, or `None` for consumption.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Generation => Some(Stage::Transmission),
            Stage::Transmission => Some(Stage::Distribution),
            Stage::Distribution => Some(Stage::Consumption),
            Stage::Consumption => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Generation => "Generation",
            Stage::Transmission => "Transmission",
            Stage::Distribution => "Distribution",
            Stage::Consumption => "Consumption",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Power at each pipeline stage for one snapshot (kW).
///
/// Each stage carries the previous stage's power reduced by a random loss
/// fraction, so values never increase downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerFlow {
    pub generation_kw: f32,
    pub transmission_kw: f32,
    pub distribution_kw: f32,
    pub consumption_kw: f32,
}

impl PowerFlow {
    /// Builds a flow from a generation value and three loss fractions.
    pub fn from_losses(
        generation_kw: f32,
        transmission_loss: f32,
        distribution_loss: f32,
        consumption_loss: f32,
    ) -> Self {
        let generation_kw = generation_kw.max(0.0);
        let transmission_kw = generation_kw * (1.0 - transmission_loss.clamp(0.0, 1.0));
        let distribution_kw = transmission_kw * (1.0 - distribution_loss.clamp(0.0, 1.0));
        let consumption_kw = distribution_kw * (1.0 - consumption_loss.clamp(0.0, 1.0));
        Self {
            generation_kw,
            transmission_kw,
            distribution_kw,
            consumption_kw,
        }
    }

    /// Samples generation and the three stage losses from `cfg`.
    pub fn sample<R: Rng>(rng: &mut R, cfg: &FlowConfig) -> Self {
        let generation_kw = cfg.generation_kw.sample(rng);
        let transmission_loss = cfg.transmission_loss.sample(rng);
        let distribution_loss = cfg.distribution_loss.sample(rng);
        let consumption_loss = cfg.consumption_loss.sample(rng);
        Self::from_losses(
            generation_kw,
            transmission_loss,
            distribution_loss,
            consumption_loss,
        )
    }

    /// Power at `stage` in kW.
    pub fn value(&self, stage: Stage) -> f32 {
        match stage {
            Stage::Generation => self.generation_kw,
            Stage::Transmission => self.transmission_kw,
            Stage::Distribution => self.distribution_kw,
            Stage::Consumption => self.consumption_kw,
        }
    }

    /// Power lost between `stage` and the next one (0 for consumption).
    pub fn loss_kw(&self, stage: Stage) -> f32 {
        stage
            .next()
            .map_or(0.0, |next| self.value(stage) - self.value(next))
    }

    /// Total loss from generation to consumption in kW.
    pub fn total_loss_kw(&self) -> f32 {
        self.generation_kw - self.consumption_kw
    }

    /// Actual end-to-end efficiency, `consumption / generation * 100`.
    pub fn end_to_end_efficiency_pct(&self) -> f32 {
        if self.generation_kw > 0.0 {
            self.consumption_kw / self.generation_kw * 100.0
        } else {
            0.0
        }
    }

    /// Number of active loads shown on the overview: one per 10 kW consumed.
    pub fn active_loads(&self) -> u32 {
        (self.consumption_kw / 10.0).floor().max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn stages_are_monotonically_non_increasing() {
        let cfg = FlowConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let f = PowerFlow::sample(&mut rng, &cfg);
            assert!(f.generation_kw >= f.transmission_kw);
            assert!(f.transmission_kw >= f.distribution_kw);
            assert!(f.distribution_kw >= f.consumption_kw);
            assert!(f.consumption_kw >= 0.0);
        }
    }

    #[test]
    fn default_losses_stay_in_documented_bands() {
        let cfg = FlowConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let f = PowerFlow::sample(&mut rng, &cfg);
            assert!((50.0..150.0).contains(&f.generation_kw));
            let tx = 1.0 - f.transmission_kw / f.generation_kw;
            let dx = 1.0 - f.distribution_kw / f.transmission_kw;
            let cx = 1.0 - f.consumption_kw / f.distribution_kw;
            assert!((0.02 - 1e-4..0.05 + 1e-4).contains(&tx), "tx loss {tx}");
            assert!((0.03 - 1e-4..0.07 + 1e-4).contains(&dx), "dist loss {dx}");
            assert!((0.01 - 1e-4..0.02 + 1e-4).contains(&cx), "cons loss {cx}");
        }
    }

    #[test]
    fn end_to_end_efficiency_matches_ratio() {
        let f = PowerFlow::from_losses(100.0, 0.05, 0.05, 0.0);
        assert!((f.end_to_end_efficiency_pct() - 90.25).abs() < 1e-3);
        assert!((f.total_loss_kw() - 9.75).abs() < 1e-3);
    }

    #[test]
    fn zero_generation_has_zero_efficiency() {
        let f = PowerFlow::from_losses(0.0, 0.02, 0.03, 0.01);
        assert_eq!(f.end_to_end_efficiency_pct(), 0.0);
        assert_eq!(f.active_loads(), 0);
    }

    #[test]
    fn loss_per_stage_sums_to_total() {
        let f = PowerFlow::from_losses(120.0, 0.04, 0.05, 0.015);
        let sum: f32 = Stage::ALL.iter().map(|&s| f.loss_kw(s)).sum();
        assert!((sum - f.total_loss_kw()).abs() < 1e-4);
        assert_eq!(f.loss_kw(Stage::Consumption), 0.0);
    }

    #[test]
    fn active_loads_floors_consumption() {
        let f = PowerFlow::from_losses(99.9, 0.0, 0.0, 0.0);
        assert_eq!(f.active_loads(), 9);
    }

    #[test]
    fn stage_order_is_pipeline_order() {
        let mut s = Stage::Generation;
        let mut seen = vec![s];
        while let Some(n) = s.next() {
            seen.push(n);
            s = n;
        }
        assert_eq!(seen, Stage::ALL.to_vec());
    }
}
