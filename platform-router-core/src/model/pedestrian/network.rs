//! Directed weighted pedestrian graph addressed by OSM node id

use hashbrown::{HashMap, HashSet};
use petgraph::{
    Directed,
    graph::{DiGraph, EdgeReference, NodeIndex},
    visit::EdgeRef,
};

use super::components::{PedestrianEdge, PedestrianNode};
use crate::model::{Node, NodeId};

/// Walkable network of a station area. Built once by
/// [`build_pedestrian_graph`](crate::loading::build_pedestrian_graph), read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct PedestrianGraph {
    pub graph: DiGraph<PedestrianNode, PedestrianEdge>,
    index: HashMap<NodeId, NodeIndex>,
    /// Every node lying on a `highway=footway` way
    footway_nodes: HashSet<NodeId>,
}

impl PedestrianGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex for `node` unless it already exists
    pub fn add_node(&mut self, node: &Node) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node.id) {
            return idx;
        }
        let idx = self.graph.add_node(PedestrianNode {
            id: node.id,
            geometry: node.geometry,
        });
        self.index.insert(node.id, idx);
        idx
    }

    /// Sets the edge `from -> to`, replacing the weight of an existing one.
    ///
    /// Returns `false` if either endpoint is not a vertex.
    pub fn set_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> bool {
        let (Some(&a), Some(&b)) = (self.index.get(&from), self.index.get(&to)) else {
            return false;
        };
        self.graph.update_edge(a, b, PedestrianEdge::new(weight));
        true
    }

    pub fn mark_footway_node(&mut self, node: NodeId) {
        self.footway_nodes.insert(node);
    }

    pub fn is_footway_node(&self, node: NodeId) -> bool {
        self.footway_nodes.contains(&node)
    }

    pub fn node_index(&self, node: NodeId) -> Option<NodeIndex> {
        self.index.get(&node).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&PedestrianNode> {
        self.graph.node_weight(idx)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    /// Outgoing edges of a vertex
    pub fn edges(&self, idx: NodeIndex) -> petgraph::graph::Edges<'_, PedestrianEdge, Directed> {
        self.graph.edges(idx)
    }

    /// Weight of the edge `from -> to`, if any
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        let a = self.node_index(from)?;
        let b = self.node_index(to)?;
        self.graph
            .edges(a)
            .find(|edge: &EdgeReference<'_, PedestrianEdge>| edge.target() == b)
            .map(|edge| edge.weight().weight)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn footway_node_count(&self) -> usize {
        self.footway_nodes.len()
    }
}
