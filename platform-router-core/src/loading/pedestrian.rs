//! Pedestrian graph construction from footway and steps ways

use itertools::Itertools;
use log::{debug, info};

use crate::{
    Error,
    cancel::Cancellation,
    geometry::great_circle_distance,
    model::{MapSnapshot, PedestrianGraph, Way, WayId},
};

/// Weight factor of a segment on a moving walkway or escalator
const CONVEYING_FACTOR: f64 = 0.5;

/// Direction of a `conveying=*` segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conveying {
    Forward,
    Backward,
    None,
}

impl Conveying {
    fn of(way: &Way) -> Self {
        match way.tags.get("conveying") {
            Some("forward") => Conveying::Forward,
            Some("backward") => Conveying::Backward,
            _ => Conveying::None,
        }
    }
}

fn is_walkable(way: &Way) -> bool {
    matches!(way.tags.get("highway"), Some("footway" | "steps"))
}

/// Builds the directed pedestrian graph.
///
/// Ways are visited in ascending id order, so when two ways produce the
/// same ordered node pair the later way's weight wins deterministically.
///
/// # Errors
///
/// [`Error::Cancelled`] if `cancel` fires during the build.
pub fn build_pedestrian_graph(
    snapshot: &MapSnapshot,
    cancel: &Cancellation,
) -> Result<PedestrianGraph, Error> {
    let mut graph = PedestrianGraph::new();

    let mut way_ids: Vec<WayId> = snapshot.ways.keys().copied().collect();
    way_ids.sort_unstable();

    let mut missing_nodes = 0usize;
    for way_id in way_ids {
        cancel.check()?;
        if let Some(way) = snapshot.way(way_id) {
            missing_nodes += add_way(&mut graph, snapshot, way);
        }
    }

    if missing_nodes > 0 {
        debug!("{missing_nodes} way node references point outside the snapshot");
    }
    info!(
        "Pedestrian graph: {} vertices, {} edges, {} footway nodes",
        graph.node_count(),
        graph.edge_count(),
        graph.footway_node_count()
    );
    Ok(graph)
}

/// Adds the way's nodes and walkable segments, returns the number of
/// node references missing from the snapshot
fn add_way(graph: &mut PedestrianGraph, snapshot: &MapSnapshot, way: &Way) -> usize {
    let mut missing = 0;
    let is_footway = way.tags.is("highway", "footway");

    for &node_id in &way.nodes {
        match snapshot.node(node_id) {
            Some(node) => {
                graph.add_node(node);
                if is_footway {
                    graph.mark_footway_node(node_id);
                }
            }
            None => missing += 1,
        }
    }

    if way.nodes.len() < 2 || !is_walkable(way) {
        return missing;
    }

    let conveying = Conveying::of(way);
    for (&a, &b) in way.nodes.iter().tuple_windows() {
        let (Some(from), Some(to)) = (snapshot.node(a), snapshot.node(b)) else {
            log::trace!("Way {:?}: segment {a:?}-{b:?} has a missing node", way.id);
            continue;
        };

        // no routing through elevators
        if from.tags.is("highway", "elevator") || to.tags.is("highway", "elevator") {
            continue;
        }

        let distance = great_circle_distance(from.geometry, to.geometry);
        match conveying {
            Conveying::Forward => {
                graph.set_edge(a, b, distance * CONVEYING_FACTOR);
            }
            Conveying::Backward => {
                graph.set_edge(b, a, distance * CONVEYING_FACTOR);
            }
            Conveying::None => {
                graph.set_edge(a, b, distance);
                graph.set_edge(b, a, distance);
            }
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, NodeId, Tags};

    fn snapshot_with_way(way_tags: &[(&str, &str)], second_node_tags: Tags) -> MapSnapshot {
        let mut snapshot = MapSnapshot::new();
        snapshot.insert_node(Node::new(NodeId(1), 0.0, 0.0, Tags::new()));
        snapshot.insert_node(Node::new(NodeId(2), 0.0, 0.001, second_node_tags));
        snapshot.insert_way(Way {
            id: WayId(10),
            nodes: vec![NodeId(1), NodeId(2)],
            tags: way_tags.iter().copied().collect(),
        });
        snapshot
    }

    fn build(snapshot: &MapSnapshot) -> PedestrianGraph {
        build_pedestrian_graph(snapshot, &Cancellation::new()).unwrap()
    }

    #[test]
    fn test_plain_footway_is_symmetric() {
        let snapshot = snapshot_with_way(&[("highway", "footway")], Tags::new());
        let graph = build(&snapshot);

        let expected = great_circle_distance(
            snapshot.point(NodeId(1)).unwrap(),
            snapshot.point(NodeId(2)).unwrap(),
        );
        let forward = graph.edge_weight(NodeId(1), NodeId(2)).unwrap();
        let backward = graph.edge_weight(NodeId(2), NodeId(1)).unwrap();

        assert!((forward - expected).abs() < 1e-9);
        assert!((backward - expected).abs() < 1e-9);
        assert!((expected - 111.19).abs() < 0.1);
        assert!(graph.is_footway_node(NodeId(1)));
        assert!(graph.is_footway_node(NodeId(2)));
    }

    #[test]
    fn test_forward_conveying_is_one_way_and_halved() {
        let snapshot =
            snapshot_with_way(&[("highway", "footway"), ("conveying", "forward")], Tags::new());
        let graph = build(&snapshot);

        let full = great_circle_distance(
            snapshot.point(NodeId(1)).unwrap(),
            snapshot.point(NodeId(2)).unwrap(),
        );
        let forward = graph.edge_weight(NodeId(1), NodeId(2)).unwrap();
        assert!((forward - full / 2.0).abs() < 1e-9);
        assert!(graph.edge_weight(NodeId(2), NodeId(1)).is_none());
    }

    #[test]
    fn test_backward_conveying_reverses_edge() {
        let snapshot =
            snapshot_with_way(&[("highway", "steps"), ("conveying", "backward")], Tags::new());
        let graph = build(&snapshot);

        assert!(graph.edge_weight(NodeId(1), NodeId(2)).is_none());
        assert!(graph.edge_weight(NodeId(2), NodeId(1)).is_some());
        // steps are walkable but not footway members
        assert!(!graph.is_footway_node(NodeId(1)));
    }

    #[test]
    fn test_elevator_nodes_are_excluded() {
        let elevator: Tags = [("highway", "elevator")].into_iter().collect();
        let snapshot = snapshot_with_way(&[("highway", "footway")], elevator);
        let graph = build(&snapshot);

        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_non_walkable_way_only_adds_vertices() {
        let snapshot = snapshot_with_way(&[("highway", "residential")], Tags::new());
        let graph = build(&snapshot);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_single_node_way_contributes_no_edges() {
        let mut snapshot = MapSnapshot::new();
        snapshot.insert_node(Node::new(NodeId(1), 0.0, 0.0, Tags::new()));
        snapshot.insert_way(Way {
            id: WayId(1),
            nodes: vec![NodeId(1)],
            tags: [("highway", "footway")].into_iter().collect(),
        });
        let graph = build(&snapshot);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_later_way_overwrites_weight() {
        let mut snapshot = snapshot_with_way(&[("highway", "footway")], Tags::new());
        snapshot.insert_way(Way {
            id: WayId(11),
            nodes: vec![NodeId(1), NodeId(2)],
            tags: [("highway", "footway"), ("conveying", "forward")]
                .into_iter()
                .collect(),
        });
        let graph = build(&snapshot);

        let full = graph.edge_weight(NodeId(2), NodeId(1)).unwrap();
        let forward = graph.edge_weight(NodeId(1), NodeId(2)).unwrap();
        assert!((forward - full / 2.0).abs() < 1e-9);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_cancelled_build() {
        let snapshot = snapshot_with_way(&[("highway", "footway")], Tags::new());
        let cancel = Cancellation::new();
        cancel.cancel();
        assert!(matches!(
            build_pedestrian_graph(&snapshot, &cancel),
            Err(Error::Cancelled)
        ));
    }
}
