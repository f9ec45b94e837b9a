//! Screen-independent geometry for the diagram panels.

pub mod camera;
pub mod topology;

pub use camera::{Camera, Point3, Projected};
pub use topology::{Component, FlowNode};
