//! Simulated EV charging stations.

pub mod fleet;
/// Hourly charging demand profile.
pub mod profile;
/// Single charging station model.
pub mod station;

pub use fleet::{ChargingFleet, FleetSummary};
pub use profile::DemandProfile;
pub use station::{ChargingStation, StationStatus, Vehicle};
