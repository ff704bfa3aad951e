use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use super::state::State;
use crate::{Error, cancel::Cancellation, model::PedestrianGraph};

/// Pops between two cancellation checks
const CANCEL_CHECK_INTERVAL: usize = 1024;

/// Distances and predecessors of one single-source search
#[derive(Debug, Clone)]
pub(crate) struct ShortestPathTree {
    start: NodeIndex,
    distances: HashMap<NodeIndex, f64>,
    predecessors: HashMap<NodeIndex, NodeIndex>,
}

impl ShortestPathTree {
    pub(crate) fn distance(&self, target: NodeIndex) -> Option<f64> {
        self.distances.get(&target).copied()
    }

    /// Vertices from the start to `target`, both included
    pub(crate) fn path_to(&self, target: NodeIndex) -> Option<Vec<NodeIndex>> {
        if !self.distances.contains_key(&target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.start {
            current = *self.predecessors.get(&current)?;
            path.push(current);
        }
        path.reverse(); // Now path is from start to target
        Some(path)
    }
}

/// Dijkstra's algorithm over the pedestrian graph.
///
/// Stops early once every vertex in `targets` is settled; with an empty
/// target set the whole reachable component is explored. Predecessors only
/// change on a strictly cheaper cost, so among equal paths the first found
/// is kept.
pub(crate) fn dijkstra_tree(
    graph: &PedestrianGraph,
    start: NodeIndex,
    targets: &HashSet<NodeIndex>,
    cancel: &Cancellation,
) -> Result<ShortestPathTree, Error> {
    // Estimate capacity based on graph size (adjust as needed)
    let estimated_nodes = graph.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);
    let mut remaining = targets.len();
    let mut settled: HashSet<NodeIndex> = HashSet::with_capacity(estimated_nodes);

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    let mut pops = 0usize;
    while let Some(State { cost, node }) = heap.pop() {
        pops += 1;
        if pops % CANCEL_CHECK_INTERVAL == 0 {
            cancel.check()?;
        }

        // Skip stale heap entries
        if !settled.insert(node) {
            continue;
        }

        if targets.contains(&node) {
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        }

        for edge in graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge.weight().weight;

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, node);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, node);
                    }
                }
            }
        }
    }

    Ok(ShortestPathTree {
        start,
        distances,
        predecessors,
    })
}
