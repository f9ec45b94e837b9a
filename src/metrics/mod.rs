/// Operator alerts.
pub mod alert;
pub mod efficiency;
/// Power flow pipeline stages and losses.
pub mod flow;
pub mod generator;
/// Refresh scheduling for real-time mode and station ticks.
pub mod refresh;
pub mod summary;
pub mod types;
/// Weather conditions and impact assessment.
pub mod weather;

pub use generator::SnapshotGenerator;
pub use types::{QuickStats, Snapshot};
