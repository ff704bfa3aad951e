//! Station model: snapshot plus the structures derived from it once

use super::{MapSnapshot, PedestrianGraph, RailProximityIndex};

#[derive(Debug, Clone, Copy)]
pub struct StationModelMeta {
    /// Half width of rail corridors, meters
    pub rail_padding: f64,
}

/// Everything routing needs, shared read-only between queries.
/// Per-query state (spines, node sets, results) never lives here.
#[derive(Debug, Clone)]
pub struct StationModel {
    pub snapshot: MapSnapshot,
    pub pedestrian_graph: PedestrianGraph,
    pub rail_index: RailProximityIndex,
    pub meta: StationModelMeta,
}

impl StationModel {
    pub fn new(
        snapshot: MapSnapshot,
        pedestrian_graph: PedestrianGraph,
        rail_index: RailProximityIndex,
        meta: StationModelMeta,
    ) -> Self {
        Self {
            snapshot,
            pedestrian_graph,
            rail_index,
            meta,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "StationModel with {} nodes, {} ways, {} relations; {} walkable vertices, {} edges, {} rail corridors",
            self.snapshot.nodes.len(),
            self.snapshot.ways.len(),
            self.snapshot.relations.len(),
            self.pedestrian_graph.node_count(),
            self.pedestrian_graph.edge_count(),
            self.rail_index.len()
        )
    }
}
