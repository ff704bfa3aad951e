//! Read-only in-memory map snapshot

use std::path::Path;

use geo::Point;
use hashbrown::HashMap;

use super::elements::{Node, Relation, Way};
use super::ids::{ElementId, NodeId, RelationId, WayId};
use crate::Error;

/// Parsed OSM data. Filled once by a loader and only read afterwards;
/// every component receives it by shared reference.
#[derive(Debug, Clone, Default)]
pub struct MapSnapshot {
    pub nodes: HashMap<NodeId, Node>,
    pub ways: HashMap<WayId, Way>,
    pub relations: HashMap<RelationId, Relation>,
}

impl MapSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a `.osm.pbf` extract
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded
    pub fn from_pbf(path: impl AsRef<Path>) -> Result<Self, Error> {
        crate::loading::osm::load_snapshot(path)
    }

    pub fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.id, node);
    }

    pub fn insert_way(&mut self, way: Way) {
        self.ways.insert(way.id, way);
    }

    pub fn insert_relation(&mut self, relation: Relation) {
        self.relations.insert(relation.id, relation);
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn way(&self, id: WayId) -> Option<&Way> {
        self.ways.get(&id)
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.relations.get(&id)
    }

    /// Coordinates of a node
    pub fn point(&self, id: NodeId) -> Option<Point<f64>> {
        self.nodes.get(&id).map(|node| node.geometry)
    }

    /// `name` tag of a way or relation
    pub fn element_name(&self, element: ElementId) -> Option<&str> {
        match element {
            ElementId::Node(id) => self.node(id).and_then(|n| n.tags.get("name")),
            ElementId::Way(id) => self.way(id).and_then(|w| w.tags.get("name")),
            ElementId::Relation(id) => self.relation(id).and_then(|r| r.tags.get("name")),
        }
    }

    pub fn contains(&self, element: ElementId) -> bool {
        match element {
            ElementId::Node(id) => self.nodes.contains_key(&id),
            ElementId::Way(id) => self.ways.contains_key(&id),
            ElementId::Relation(id) => self.relations.contains_key(&id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.ways.is_empty() && self.relations.is_empty()
    }
}
