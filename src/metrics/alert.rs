//! Operator alerts raised alongside snapshots.

use std::fmt;

use rand::Rng;
use serde::Serialize;

/// An operator-facing alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    HighTransmissionLoad,
}

impl Alert {
    pub fn message(self) -> &'static str {
        match self {
            Alert::HighTransmissionLoad => "High transmission load detected",
        }
    }

    /// Raises the synthetic alerts for one snapshot.
    ///
    /// The high-load alert fires with `probability`.
    pub fn sample<R: Rng>(rng: &mut R, probability: f32) -> Vec<Alert> {
        if rng.random::<f32>() < probability {
            vec![Alert::HighTransmissionLoad]
        } else {
            Vec::new()
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Header badge text, e.g. `"1 Alert"` or `"3 Alerts"`. `None` when quiet.
pub fn badge(alerts: &[Alert]) -> Option<String> {
    match alerts.len() {
        0 => None,
        1 => Some("1 Alert".to_string()),
        n => Some(format!("{n} Alerts")),
    }
}
