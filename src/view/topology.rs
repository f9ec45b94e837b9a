//! Geometry of the flow diagram and the 3D system view.

use super::camera::Point3;
use crate::metrics::flow::{PowerFlow, Stage};

/// Horizontal placement of the flow diagram nodes, as a fraction of width.
pub const FLOW_NODE_X: [f64; 4] = [0.0, 0.35, 0.65, 1.0];
/// Stage power that saturates a flow node's colour (kW).
pub const FLOW_FULL_SCALE_KW: f32 = 1000.0;
/// Component power that saturates a 3D component's colour (kW).
pub const COMPONENT_FULL_SCALE_KW: f32 = 500.0;

/// Share of generation attributed to each generator.
const GENERATOR_SPLIT: [f32; 2] = [0.6, 0.4];

/// One node of the left-to-right flow diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowNode {
    pub stage: Stage,
    /// Relative x in `[0, 1]`.
    pub x: f64,
    pub value_kw: f32,
    /// Colour intensity in `[0, 1]`.
    pub intensity: f32,
}

/// Lays out the four pipeline stages for `flow`.
pub fn flow_nodes(flow: &PowerFlow) -> [FlowNode; 4] {
    Stage::ALL.map(|stage| {
        let idx = stage_index(stage);
        let value_kw = flow.value(stage);
        FlowNode {
            stage,
            x: FLOW_NODE_X[idx],
            value_kw,
            intensity: intensity(value_kw, FLOW_FULL_SCALE_KW),
        }
    })
}

fn stage_index(stage: Stage) -> usize {
    match stage {
        Stage::Generation => 0,
        Stage::Transmission => 1,
        Stage::Distribution => 2,
        Stage::Consumption => 3,
    }
}

/// A drawable equipment item in the 3D view.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: &'static str,
    pub position: Point3,
    /// Drawn radius before perspective.
    pub size: f64,
    pub value_kw: f32,
    pub intensity: f32,
}

/// Names of the components joined by each link.
pub const CONNECTIONS: [(&str, &str); 4] = [
    ("Generator 1", "Transformer"),
    ("Generator 2", "Transformer"),
    ("Transformer", "Distribution"),
    ("Transformer", "Load Center"),
];

/// Builds the five system components for `flow`, sorted back to front
/// (ascending z).
pub fn components(flow: &PowerFlow) -> Vec<Component> {
    let make = |name, position, size, value_kw: f32| Component {
        name,
        position,
        size,
        value_kw,
        intensity: intensity(value_kw, COMPONENT_FULL_SCALE_KW),
    };

    let mut items = vec![
        make(
            "Generator 1",
            Point3::new(-100.0, -50.0, 0.0),
            20.0,
            flow.generation_kw * GENERATOR_SPLIT[0],
        ),
        make(
            "Generator 2",
            Point3::new(-100.0, 50.0, 0.0),
            20.0,
            flow.generation_kw * GENERATOR_SPLIT[1],
        ),
        make(
            "Transformer",
            Point3::new(0.0, 0.0, 10.0),
            15.0,
            flow.transmission_kw,
        ),
        make(
            "Distribution",
            Point3::new(100.0, -30.0, 0.0),
            12.0,
            flow.distribution_kw,
        ),
        make(
            "Load Center",
            Point3::new(100.0, 30.0, 0.0),
            12.0,
            flow.consumption_kw,
        ),
    ];
    items.sort_by(|a, b| a.position.z.total_cmp(&b.position.z));
    items
}

/// Resolves [`CONNECTIONS`] to component pairs. Links whose endpoints are
/// missing are skipped.
pub fn links(components: &[Component]) -> Vec<(&Component, &Component)> {
    let find = |name: &str| components.iter().find(|c| c.name == name);
    CONNECTIONS
        .iter()
        .filter_map(|&(a, b)| Some((find(a)?, find(b)?)))
        .collect()
}

fn intensity(value_kw: f32, full_scale_kw: f32) -> f32 {
    (value_kw / full_scale_kw).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow() -> PowerFlow {
        PowerFlow::from_losses(100.0, 0.05, 0.05, 0.02)
    }

    #[test]
    fn flow_nodes_are_spread_left_to_right() {
        let nodes = flow_nodes(&flow());
        let xs: Vec<f64> = nodes.iter().map(|n| n.x).collect();
        assert_eq!(xs, FLOW_NODE_X.to_vec());
        assert_eq!(nodes[0].stage, Stage::Generation);
        assert_eq!(nodes[3].stage, Stage::Consumption);
        assert!((nodes[0].intensity - 0.1).abs() < 1e-6);
    }

    #[test]
    fn intensity_saturates() {
        let big = PowerFlow::from_losses(5000.0, 0.0, 0.0, 0.0);
        assert!(flow_nodes(&big).iter().all(|n| n.intensity == 1.0));
        assert!(components(&big).iter().all(|c| c.intensity == 1.0));
    }

    #[test]
    fn components_sorted_by_depth() {
        let items = components(&flow());
        assert_eq!(items.len(), 5);
        assert!(
            items
                .windows(2)
                .all(|w| w[0].position.z <= w[1].position.z)
        );
        assert_eq!(items.last().map(|c| c.name), Some("Transformer"));
    }

    #[test]
    fn generators_split_generation() {
        let items = components(&flow());
        let gen_total: f32 = items
            .iter()
            .filter(|c| c.name.starts_with("Generator"))
            .map(|c| c.value_kw)
            .sum();
        assert!((gen_total - 100.0).abs() < 1e-4);
        let g1 = items.iter().find(|c| c.name == "Generator 1");
        assert!(g1.is_some_and(|c| (c.value_kw - 60.0).abs() < 1e-4));
    }

    #[test]
    fn links_connect_through_transformer() {
        let items = components(&flow());
        let resolved = links(&items);
        assert_eq!(resolved.len(), 4);
        assert!(
            resolved
                .iter()
                .all(|(a, b)| a.name == "Transformer" || b.name == "Transformer")
        );
    }
}
