//! Reduction of platform outlines to the spine facing the tracks
//!
//! A platform mapped as a plain line already is its spine. Area platforms
//! (closed ways, multipolygon relations) are walked node by node: the longest
//! run of consecutive nodes lying inside a rail corridor is the edge along
//! the tracks. Relations that map their `railway=platform_edge` ways directly
//! use those instead.

use fixedbitset::FixedBitSet;
use geo::Point;
use hashbrown::HashMap;
use log::{debug, warn};
use rayon::prelude::*;

use crate::{
    Error,
    model::{
        ElementId, MapSnapshot, NodeId, PlatformCatalog, PlatformSpine, RailProximityIndex,
        Relation, StationModel, Way, WayId,
    },
};

/// Inclusive index range of the longest rail-adjacent run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Run {
    pub start: usize,
    pub end: usize,
    pub len: usize,
}

/// Longest run of set bits in `closeness[..len]`.
///
/// With `wraps` the sequence is a ring: scanning starts at the first unset
/// position and walks a doubled view, so a run crossing the end of the
/// sequence is found in one piece. A ring that is close everywhere has no
/// run. Ties keep the run found first.
pub(crate) fn longest_close_run(closeness: &FixedBitSet, len: usize, wraps: bool) -> Option<Run> {
    if len == 0 {
        return None;
    }

    let offset = if wraps {
        (0..len).find(|&i| !closeness.contains(i))?
    } else {
        0
    };

    let mut best: Option<Run> = None;
    let mut current: Option<Run> = None;

    for step in 0..len {
        let idx = (offset + step) % len;
        if closeness.contains(idx) {
            current = Some(match current {
                Some(run) => Run {
                    end: idx,
                    len: run.len + 1,
                    ..run
                },
                None => Run {
                    start: idx,
                    end: idx,
                    len: 1,
                },
            });
        } else if let Some(run) = current.take() {
            if best.is_none_or(|b| run.len > b.len) {
                best = Some(run);
            }
        }
    }
    if let Some(run) = current {
        if best.is_none_or(|b| run.len > b.len) {
            best = Some(run);
        }
    }
    best
}

/// Resolves platform spines against a rail proximity index
#[derive(Debug, Clone, Copy)]
pub struct SpineResolver<'a> {
    snapshot: &'a MapSnapshot,
    rail_index: &'a RailProximityIndex,
}

impl<'a> SpineResolver<'a> {
    pub fn new(snapshot: &'a MapSnapshot, rail_index: &'a RailProximityIndex) -> Self {
        Self {
            snapshot,
            rail_index,
        }
    }

    pub fn for_model(model: &'a StationModel) -> Self {
        Self::new(&model.snapshot, &model.rail_index)
    }

    /// Spine of `platform`. `platform_number` disambiguates relations with
    /// several platform edges.
    ///
    /// # Errors
    ///
    /// - [`Error::UnresolvedSpine`] if no non-degenerate spine exists
    /// - [`Error::AmbiguousPlatformEdge`] if several edges remain candidates
    /// - [`Error::UnknownElement`] / [`Error::ElementKindMismatch`] for bad ids
    pub fn resolve(
        &self,
        platform: ElementId,
        platform_number: Option<&str>,
    ) -> Result<PlatformSpine, Error> {
        match platform {
            ElementId::Way(id) => {
                let way = self
                    .snapshot
                    .way(id)
                    .ok_or(Error::UnknownElement(platform))?;
                self.resolve_way(platform, way)
            }
            ElementId::Relation(id) => {
                let relation = self
                    .snapshot
                    .relation(id)
                    .ok_or(Error::UnknownElement(platform))?;
                self.resolve_relation(platform, relation, platform_number)
            }
            ElementId::Node(_) => Err(Error::ElementKindMismatch {
                element: platform,
                expected: "way or relation",
            }),
        }
    }

    /// Resolves the spines of all relevant catalog platforms in parallel.
    /// Relation edges are not disambiguated here since no service is chosen.
    pub fn resolve_catalog(
        &self,
        catalog: &PlatformCatalog,
    ) -> HashMap<ElementId, Result<PlatformSpine, Error>> {
        let platforms: Vec<ElementId> = catalog.relevant_platforms().map(|p| p.id).collect();
        let spines: Vec<(ElementId, Result<PlatformSpine, Error>)> = platforms
            .into_par_iter()
            .map(|id| (id, self.resolve(id, None)))
            .collect();
        spines.into_iter().collect()
    }

    fn resolve_way(&self, platform: ElementId, way: &Way) -> Result<PlatformSpine, Error> {
        if way.is_closed() {
            self.resolve_outline(platform, &way.nodes)
        } else {
            self.endpoint_spine(platform, way)
        }
    }

    fn resolve_relation(
        &self,
        platform: ElementId,
        relation: &Relation,
        platform_number: Option<&str>,
    ) -> Result<PlatformSpine, Error> {
        let members: Vec<(&Way, &str)> = relation
            .member_ways()
            .filter_map(|(id, role)| match self.snapshot.way(id) {
                Some(way) => Some((way, role)),
                None => {
                    warn!("Platform {platform}: member way {id:?} is missing from the snapshot");
                    None
                }
            })
            .collect();

        let edges: Vec<&Way> = members
            .iter()
            .map(|(way, _)| *way)
            .filter(|way| way.tags.is("railway", "platform_edge"))
            .collect();
        if !edges.is_empty() {
            let edge = select_platform_edge(platform, &edges, platform_number)?;
            debug!("Platform {platform}: using platform edge {:?}", edge.id);
            return self.endpoint_spine(platform, edge);
        }

        // holes do not border the tracks
        let outer: Vec<&Way> = members
            .iter()
            .filter(|(_, role)| *role != "inner")
            .map(|(way, _)| *way)
            .collect();
        self.resolve_outline(platform, &join_ways(&outer))
    }

    /// Spine from the first and last node of a line
    fn endpoint_spine(&self, platform: ElementId, way: &Way) -> Result<PlatformSpine, Error> {
        let start = way.first_node().and_then(|id| self.snapshot.point(id));
        let end = way.last_node().and_then(|id| self.snapshot.point(id));
        match (start, end) {
            (Some(start), Some(end)) => {
                PlatformSpine::new(start, end).ok_or(Error::UnresolvedSpine(platform))
            }
            _ => Err(Error::UnresolvedSpine(platform)),
        }
    }

    /// Spine from the longest rail-adjacent run along an outline
    fn resolve_outline(
        &self,
        platform: ElementId,
        nodes: &[NodeId],
    ) -> Result<PlatformSpine, Error> {
        let closed = nodes.len() > 1 && nodes.first() == nodes.last();
        let ring = if closed {
            &nodes[..nodes.len() - 1]
        } else {
            nodes
        };

        let points: Vec<Point<f64>> = ring
            .iter()
            .filter_map(|&id| {
                let point = self.snapshot.point(id);
                if point.is_none() {
                    warn!("Platform {platform}: node {id:?} is missing from the snapshot");
                }
                point
            })
            .collect();
        if points.is_empty() {
            warn!("Platform {platform} has no nodes");
            return Err(Error::UnresolvedSpine(platform));
        }

        let mut closeness = FixedBitSet::with_capacity(points.len());
        for (idx, point) in points.iter().enumerate() {
            if self.rail_index.is_close(*point) {
                closeness.insert(idx);
            }
        }

        let Some(run) = longest_close_run(&closeness, points.len(), closed) else {
            warn!(
                "Found no suitable spine for platform {platform}: {} of {} nodes close to rails",
                closeness.count_ones(..),
                points.len()
            );
            return Err(Error::UnresolvedSpine(platform));
        };
        debug!(
            "Platform {platform}: rail-adjacent run of {} nodes ({}..={})",
            run.len, run.start, run.end
        );

        PlatformSpine::new(points[run.start], points[run.end])
            .ok_or(Error::UnresolvedSpine(platform))
    }
}

/// Chains ways into one node sequence. Each way is reversed if needed so it
/// continues from the end of the chain; ways sharing no endpoint with the
/// chain are appended as mapped.
fn join_ways(ways: &[&Way]) -> Vec<NodeId> {
    let mut outline: Vec<NodeId> = Vec::new();
    for way in ways {
        let (Some(first), Some(last)) = (way.first_node(), way.last_node()) else {
            continue;
        };

        // the chain so far may run against the next way
        if let (Some(&head), Some(&tail)) = (outline.first(), outline.last())
            && tail != first
            && tail != last
            && (head == first || head == last)
        {
            outline.reverse();
        }

        match outline.last() {
            Some(&tail) if tail == first => outline.extend_from_slice(&way.nodes[1..]),
            Some(&tail) if tail == last => outline.extend(way.nodes.iter().rev().skip(1)),
            _ => outline.extend_from_slice(&way.nodes),
        }
    }
    outline
}

/// Picks the platform edge to use for a relation platform
fn select_platform_edge<'w>(
    platform: ElementId,
    edges: &[&'w Way],
    platform_number: Option<&str>,
) -> Result<&'w Way, Error> {
    if let [edge] = edges {
        return Ok(*edge);
    }

    let matching: Vec<&Way> = edges
        .iter()
        .copied()
        .filter(|edge| platform_number.is_some_and(|number| edge.tags.get("ref") == Some(number)))
        .collect();

    match matching.as_slice() {
        [edge] => Ok(*edge),
        _ => Err(Error::AmbiguousPlatformEdge {
            platform,
            candidates: edges.iter().map(|edge| edge.id).collect::<Vec<WayId>>(),
        }),
    }
}
