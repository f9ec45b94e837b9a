//! TUI application state.

use std::time::{Duration, Instant};

use crate::config::DashboardConfig;
use crate::dashboard::{Advance, Dashboard};
use crate::view::Camera;

/// Drag distance applied per rotation key press.
const ROTATE_STEP: f64 = 10.0;

/// Top-level dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    PowerFlow,
    Efficiency,
    Weather,
    Charging,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::PowerFlow,
        Tab::Efficiency,
        Tab::Weather,
        Tab::Charging,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::PowerFlow => "Power Flow",
            Tab::Efficiency => "Efficiency",
            Tab::Weather => "Weather",
            Tab::Charging => "Charging",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Overview => 0,
            Tab::PowerFlow => 1,
            Tab::Efficiency => 2,
            Tab::Weather => 3,
            Tab::Charging => 4,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Sub-views of the charging tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargingView {
    DemandProfile,
    Stations,
    Analytics,
}

impl ChargingView {
    pub const ALL: [ChargingView; 3] = [
        ChargingView::DemandProfile,
        ChargingView::Stations,
        ChargingView::Analytics,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChargingView::DemandProfile => "Demand Profile",
            ChargingView::Stations => "Stations",
            ChargingView::Analytics => "Analytics",
        }
    }

    fn next(self) -> Self {
        match self {
            ChargingView::DemandProfile => ChargingView::Stations,
            ChargingView::Stations => ChargingView::Analytics,
            ChargingView::Analytics => ChargingView::DemandProfile,
        }
    }
}

/// TUI application state.
pub struct App {
    pub dashboard: Dashboard,
    pub tab: Tab,
    pub charging_view: ChargingView,
    /// View of the 3D system panel.
    pub camera: Camera,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the dashboard clock was last advanced.
    pub last_tick: Instant,
    /// Wall time matching dashboard time zero.
    started: Instant,
}

impl App {
    pub fn new(config: DashboardConfig, start_epoch_ms: u64) -> Self {
        let now = Instant::now();
        Self {
            dashboard: Dashboard::new(config, start_epoch_ms),
            tab: Tab::Overview,
            charging_view: ChargingView::DemandProfile,
            camera: Camera::default(),
            quit: false,
            last_tick: now,
            started: now,
        }
    }

    /// Brings the dashboard clock up to the wall time since start.
    pub fn tick(&mut self) -> Advance {
        let now = Instant::now();
        self.last_tick = now;
        self.advance_to(now.duration_since(self.started))
    }

    /// Advances the dashboard to `elapsed` since start. Sub-millisecond
    /// remainders carry into the next call instead of being dropped.
    fn advance_to(&mut self, elapsed: Duration) -> Advance {
        let target_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let delta = target_ms.saturating_sub(self.dashboard.now_ms());
        self.dashboard.advance(delta)
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.tab = self.tab.prev();
    }

    /// Jumps to the tab at `index`; out-of-range indices are ignored.
    pub fn select_tab(&mut self, index: usize) {
        if let Some(&tab) = Tab::ALL.get(index) {
            self.tab = tab;
        }
    }

    pub fn cycle_charging_view(&mut self) {
        self.charging_view = self.charging_view.next();
    }

    /// Rotates the 3D view by whole key steps along each axis.
    pub fn rotate(&mut self, steps_x: i8, steps_y: i8) {
        self.camera
            .drag(f64::from(steps_x) * ROTATE_STEP, f64::from(steps_y) * ROTATE_STEP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(DashboardConfig::baseline(), 0)
    }

    #[test]
    fn tabs_wrap_both_ways() {
        let mut app = app();
        app.prev_tab();
        assert_eq!(app.tab, Tab::Charging);
        app.next_tab();
        assert_eq!(app.tab, Tab::Overview);
        for _ in 0..Tab::ALL.len() {
            app.next_tab();
        }
        assert_eq!(app.tab, Tab::Overview);
    }

    #[test]
    fn select_tab_ignores_out_of_range() {
        let mut app = app();
        app.select_tab(3);
        assert_eq!(app.tab, Tab::Weather);
        app.select_tab(9);
        assert_eq!(app.tab, Tab::Weather);
    }

    #[test]
    fn tab_index_matches_order() {
        for (i, tab) in Tab::ALL.iter().enumerate() {
            assert_eq!(tab.index(), i);
        }
    }

    #[test]
    fn charging_view_cycles() {
        let mut app = app();
        let seen: Vec<ChargingView> = (0..3)
            .map(|_| {
                app.cycle_charging_view();
                app.charging_view
            })
            .collect();
        assert_eq!(
            seen,
            vec![
                ChargingView::Stations,
                ChargingView::Analytics,
                ChargingView::DemandProfile
            ]
        );
    }

    #[test]
    fn rotate_moves_camera() {
        let mut app = app();
        app.rotate(1, -1);
        assert!((app.camera.rot_y - 0.1).abs() < 1e-12);
        assert!((app.camera.rot_x + 0.1).abs() < 1e-12);
        app.camera.reset();
        assert_eq!(app.camera, Camera::default());
    }

    #[test]
    fn starts_on_overview_with_a_snapshot() {
        let app = app();
        assert_eq!(app.tab, Tab::Overview);
        assert!(!app.quit);
        assert_eq!(app.dashboard.history().len(), 1);
    }

    #[test]
    fn clock_keeps_sub_millisecond_remainders() {
        let mut app = app();
        let frame = Duration::from_micros(250_600);
        let mut elapsed = Duration::ZERO;
        for _ in 0..4_000 {
            elapsed += frame;
            app.advance_to(elapsed);
        }
        // truncating each 250.6 ms frame would lose 2.4 s
        assert_eq!(app.dashboard.now_ms(), 1_002_400);
    }
}
