//! Color constants and mapping helpers for the TUI.

use ratatui::style::Color;

use crate::charging::StationStatus;
use crate::metrics::efficiency::GaugeBand;

/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Alert badge color.
pub const ALERT: Color = Color::Red;
/// Flow links and the demand profile line.
pub const FLOW_LINE: Color = Color::Cyan;
/// Axis and grid lines.
pub const GRID: Color = Color::DarkGray;
/// Real-time indicator when live.
pub const LIVE: Color = Color::Green;
/// Real-time indicator when paused.
pub const PAUSED: Color = Color::Yellow;

/// Gauge band colors.
pub const HEALTHY: Color = Color::Green;
pub const WARNING: Color = Color::Yellow;
pub const CRITICAL: Color = Color::Red;

pub fn band_color(band: GaugeBand) -> Color {
    match band {
        GaugeBand::Healthy => HEALTHY,
        GaugeBand::Warning => WARNING,
        GaugeBand::Critical => CRITICAL,
    }
}

pub fn status_color(status: StationStatus) -> Color {
    match status {
        StationStatus::Charging => Color::Green,
        StationStatus::Available => Color::Blue,
        StationStatus::Offline => Color::Red,
    }
}

/// Blue-to-green ramp for node intensity in `[0, 1]`.
pub fn intensity_color(intensity: f32) -> Color {
    let t = intensity.clamp(0.0, 1.0);
    let r = lerp(40.0, 60.0, t);
    let g = lerp(90.0, 220.0, t);
    let b = lerp(200.0, 90.0, t);
    Color::Rgb(r, g, b)
}

/// Single-hue ramp from dark to `base` for a weather overlay in `[0, 1]`.
pub fn overlay_color(base: (u8, u8, u8), intensity: f32) -> Color {
    let t = intensity.clamp(0.0, 1.0);
    Color::Rgb(
        lerp(20.0, f32::from(base.0), t),
        lerp(20.0, f32::from(base.1), t),
        lerp(20.0, f32::from(base.2), t),
    )
}

/// Computes Y-axis bounds from chart data points with 10% padding.
pub fn auto_bounds_y(points: &[(f64, f64)]) -> [f64; 2] {
    let ys = points.iter().map(|&(_, y)| y);
    let min = ys.clone().fold(f64::INFINITY, f64::min);
    let max = ys.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 100.0];
    }
    let range = (max - min).max(1.0);
    let pad = range * 0.1;
    [min - pad, max + pad]
}

fn lerp(a: f32, b: f32, t: f32) -> u8 {
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}
