//! Post-hoc summary of a snapshot history.

use std::fmt;

use serde::Serialize;

use super::efficiency::GaugeBand;
use super::types::Snapshot;

/// Aggregate statistics derived from a run of snapshots.
///
/// Computed post-hoc from `&[Snapshot]` so the summary always agrees with
/// the exported history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistorySummary {
    /// Number of snapshots summarised.
    pub snapshots: usize,
    /// Mean generation (kW).
    pub mean_generation_kw: f32,
    /// Peak generation (kW).
    pub peak_generation_kw: f32,
    /// Mean consumption (kW).
    pub mean_consumption_kw: f32,
    /// Mean end-to-end efficiency (%).
    pub mean_overall_efficiency_pct: f32,
    /// Lowest end-to-end efficiency seen (%).
    pub min_overall_efficiency_pct: f32,
    /// Mean generation-to-consumption loss (kW).
    pub mean_loss_kw: f32,
    /// Total alerts raised.
    pub alert_count: usize,
    /// Overall-efficiency gauge readings in the red band.
    pub critical_readings: usize,
    /// Overall-efficiency gauge readings in the amber band.
    pub warning_readings: usize,
    /// Overall-efficiency gauge readings in the green band.
    pub healthy_readings: usize,
}

impl HistorySummary {
    /// Computes the summary; an empty history yields all zeros.
    pub fn from_snapshots(snapshots: &[Snapshot]) -> Self {
        if snapshots.is_empty() {
            return Self::default();
        }

        let n = snapshots.len() as f32;
        let mut gen_sum = 0.0_f32;
        let mut peak_gen = 0.0_f32;
        let mut cons_sum = 0.0_f32;
        let mut eff_sum = 0.0_f32;
        let mut eff_min = f32::INFINITY;
        let mut loss_sum = 0.0_f32;
        let mut alerts = 0_usize;
        let (mut critical, mut warning, mut healthy) = (0_usize, 0_usize, 0_usize);

        for s in snapshots {
            let p = &s.power_flow;
            gen_sum += p.generation_kw;
            peak_gen = peak_gen.max(p.generation_kw);
            cons_sum += p.consumption_kw;
            loss_sum += p.total_loss_kw();

            let eff = s.efficiency.overall_pct;
            eff_sum += eff;
            eff_min = eff_min.min(eff);

            alerts += s.alerts.len();

            match GaugeBand::classify(eff) {
                GaugeBand::Critical => critical += 1,
                GaugeBand::Warning => warning += 1,
                GaugeBand::Healthy => healthy += 1,
            }
        }

        Self {
            snapshots: snapshots.len(),
            mean_generation_kw: gen_sum / n,
            peak_generation_kw: peak_gen,
            mean_consumption_kw: cons_sum / n,
            mean_overall_efficiency_pct: eff_sum / n,
            min_overall_efficiency_pct: eff_min,
            mean_loss_kw: loss_sum / n,
            alert_count: alerts,
            critical_readings: critical,
            warning_readings: warning,
            healthy_readings: healthy,
        }
    }
}

impl fmt::Display for HistorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Grid Summary ---")?;
        writeln!(f, "Snapshots:             {}", self.snapshots)?;
        writeln!(
            f,
            "Generation:            {:.1} kW mean, {:.1} kW peak",
            self.mean_generation_kw, self.peak_generation_kw
        )?;
        writeln!(f, "Consumption:           {:.1} kW mean", self.mean_consumption_kw)?;
        writeln!(f, "Losses:                {:.2} kW mean", self.mean_loss_kw)?;
        writeln!(
            f,
            "System efficiency:     {:.1}% mean, {:.1}% min",
            self.mean_overall_efficiency_pct, self.min_overall_efficiency_pct
        )?;
        writeln!(
            f,
            "Gauge bands:           {} green / {} amber / {} red",
            self.healthy_readings, self.warning_readings, self.critical_readings
        )?;
        write!(f, "Alerts:                {}", self.alert_count)
    }
}
