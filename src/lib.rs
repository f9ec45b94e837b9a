//! Synthetic power grid dashboard: generated metrics, an EV charging fleet,
//! and a terminal UI that refreshes them on a timer.

/// EV charging stations, fleet analytics, and demand profile.
pub mod charging;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod io;
/// Power flow, efficiency, weather, alerts, and the refresh scheduler.
pub mod metrics;
pub mod runner;
#[cfg(feature = "tui")]
pub mod tui;
pub mod view;
