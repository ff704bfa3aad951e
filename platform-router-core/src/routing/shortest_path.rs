//! Minimum-weight walk between two sets of vertices

use std::cmp::Ordering;

use geo::Coord;
use hashbrown::HashSet;
use log::{debug, warn};
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use super::dijkstra::dijkstra_tree;
use crate::{
    Error,
    cancel::Cancellation,
    model::{NodeId, PedestrianGraph},
};

/// Walk through the pedestrian graph
#[derive(Debug, Clone, PartialEq)]
pub struct WalkingPath {
    /// Visited nodes, source first
    pub nodes: Vec<NodeId>,
    /// Coordinates of `nodes`
    pub coords: Vec<Coord<f64>>,
    /// Total edge weight, meters
    pub weight: f64,
}

impl WalkingPath {
    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn target(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

/// Best target reached from one source
struct Candidate {
    weight: f64,
    source_rank: usize,
    target_rank: usize,
    path: Vec<NodeIndex>,
}

impl Candidate {
    fn order(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then(self.source_rank.cmp(&other.source_rank))
            .then(self.target_rank.cmp(&other.target_rank))
    }
}

/// Finds the lightest path from any of `sources` to any of `targets`.
///
/// One search runs per source in parallel. Each reports its best target and
/// the lightest of those wins; equal weights go to the earlier source, then
/// the earlier target, so the result does not depend on scheduling.
/// Ids that are not graph vertices are skipped.
///
/// Returns `Ok(None)` if no target is reachable.
///
/// # Errors
///
/// [`Error::Cancelled`] if `cancel` fires during the search.
pub fn shortest_path_between(
    graph: &PedestrianGraph,
    sources: &[NodeId],
    targets: &[NodeId],
    cancel: &Cancellation,
) -> Result<Option<WalkingPath>, Error> {
    let source_indices = vertices(graph, sources);
    let target_indices = vertices(graph, targets);
    if source_indices.is_empty() || target_indices.is_empty() {
        debug!(
            "Nothing to search: {} of {} sources and {} of {} targets are vertices",
            source_indices.len(),
            sources.len(),
            target_indices.len(),
            targets.len()
        );
        return Ok(None);
    }
    let target_set: HashSet<NodeIndex> = target_indices.iter().copied().collect();

    let candidates: Vec<Option<Candidate>> = source_indices
        .par_iter()
        .enumerate()
        .map(|(source_rank, &source)| {
            cancel.check()?;
            let tree = dijkstra_tree(graph, source, &target_set, cancel)?;

            let mut best: Option<(usize, f64)> = None;
            for (target_rank, &target) in target_indices.iter().enumerate() {
                if let Some(weight) = tree.distance(target)
                    && best.is_none_or(|(_, w)| weight < w)
                {
                    best = Some((target_rank, weight));
                }
            }

            Ok(best.and_then(|(target_rank, weight)| {
                tree.path_to(target_indices[target_rank])
                    .map(|path| Candidate {
                        weight,
                        source_rank,
                        target_rank,
                        path,
                    })
            }))
        })
        .collect::<Result<_, Error>>()?;

    let Some(best) = candidates
        .into_iter()
        .flatten()
        .min_by(Candidate::order)
    else {
        return Ok(None);
    };

    let mut nodes = Vec::with_capacity(best.path.len());
    let mut coords = Vec::with_capacity(best.path.len());
    for idx in best.path {
        let node = graph
            .node(idx)
            .ok_or(Error::UnrecoverableError("path vertex missing from graph"))?;
        nodes.push(node.id);
        coords.push(node.geometry.into());
    }

    debug!(
        "Shortest walk {:?} -> {:?}: {:.1} m over {} nodes",
        nodes.first(),
        nodes.last(),
        best.weight,
        nodes.len()
    );
    Ok(Some(WalkingPath {
        nodes,
        coords,
        weight: best.weight,
    }))
}

fn vertices(graph: &PedestrianGraph, ids: &[NodeId]) -> Vec<NodeIndex> {
    ids.iter()
        .filter_map(|&id| {
            let idx = graph.node_index(id);
            if idx.is_none() {
                warn!("Node {id:?} is not part of the pedestrian graph");
            }
            idx
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Tags};

    fn graph(nodes: &[i64], edges: &[(i64, i64, f64)]) -> PedestrianGraph {
        let mut graph = PedestrianGraph::new();
        for &id in nodes {
            graph.add_node(&Node::new(NodeId(id), 13.0, 52.0 + id as f64 * 1e-4, Tags::new()));
        }
        for &(from, to, weight) in edges {
            assert!(graph.set_edge(NodeId(from), NodeId(to), weight));
        }
        graph
    }

    fn ids(values: &[i64]) -> Vec<NodeId> {
        values.iter().copied().map(NodeId).collect()
    }

    #[test]
    fn test_diamond_takes_lighter_branch() {
        // A=1 B=2 C=3 D=4
        let graph = graph(
            &[1, 2, 3, 4],
            &[(1, 2, 5.0), (2, 4, 5.0), (1, 3, 3.0), (3, 4, 3.0)],
        );
        let path = shortest_path_between(&graph, &ids(&[1]), &ids(&[4]), &Cancellation::new())
            .unwrap()
            .unwrap();

        assert_eq!(path.nodes, ids(&[1, 3, 4]));
        assert_eq!(path.weight, 6.0);
        assert_eq!(path.coords.len(), 3);
    }

    #[test]
    fn test_global_minimum_over_all_pairs() {
        // the last source/target pair is the heaviest one
        let graph = graph(
            &[1, 2, 10, 20],
            &[(1, 10, 4.0), (1, 20, 9.0), (2, 10, 2.0), (2, 20, 7.0)],
        );
        let path = shortest_path_between(
            &graph,
            &ids(&[1, 2]),
            &ids(&[10, 20]),
            &Cancellation::new(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(path.nodes, ids(&[2, 10]));
        assert_eq!(path.weight, 2.0);
    }

    #[test]
    fn test_ties_prefer_earlier_source() {
        let graph = graph(&[1, 2, 3], &[(1, 3, 4.0), (2, 3, 4.0)]);
        let path = shortest_path_between(&graph, &ids(&[2, 1]), &ids(&[3]), &Cancellation::new())
            .unwrap()
            .unwrap();
        assert_eq!(path.source(), Some(NodeId(2)));
    }

    #[test]
    fn test_unreachable_targets() {
        let graph = graph(&[1, 2, 3], &[(2, 1, 1.0)]);
        let result =
            shortest_path_between(&graph, &ids(&[1]), &ids(&[2, 3]), &Cancellation::new()).unwrap();
        assert!(result.is_none());

        let unknown =
            shortest_path_between(&graph, &ids(&[99]), &ids(&[1]), &Cancellation::new()).unwrap();
        assert!(unknown.is_none());
    }

    #[test]
    fn test_source_equal_to_target() {
        let graph = graph(&[1, 2], &[(1, 2, 1.0)]);
        let path = shortest_path_between(&graph, &ids(&[1]), &ids(&[2, 1]), &Cancellation::new())
            .unwrap()
            .unwrap();
        assert_eq!(path.nodes, ids(&[1]));
        assert_eq!(path.weight, 0.0);
    }

    #[test]
    fn test_cancelled_before_search() {
        let graph = graph(&[1, 2], &[(1, 2, 1.0)]);
        let cancel = Cancellation::new();
        cancel.cancel();
        let result = shortest_path_between(&graph, &ids(&[1]), &ids(&[2]), &cancel);
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
