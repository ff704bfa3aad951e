//! Pedestrian network components

use geo::Point;

use crate::model::NodeId;

/// Pedestrian graph vertex
#[derive(Debug, Clone)]
pub struct PedestrianNode {
    /// OSM ID of the node
    pub id: NodeId,
    /// Node coordinates
    pub geometry: Point<f64>,
}

/// Directed walkable connection between two adjacent way nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PedestrianEdge {
    /// Walking cost in meters; halved on conveying segments
    pub weight: f64,
}

impl PedestrianEdge {
    pub fn new(weight: f64) -> Self {
        debug_assert!(weight >= 0.0, "negative edge weight {weight}");
        Self { weight }
    }
}
