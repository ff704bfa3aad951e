//! Walking transfer between two platforms of a station

mod to_geojson;

use geo::Point;
use hashbrown::HashSet;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::shortest_path::{WalkingPath, shortest_path_between};
use crate::{
    Error,
    cancel::Cancellation,
    model::{
        ElementId, MapSnapshot, NodeId, PlatformCatalog, PlatformRecord, PlatformSpine,
        RelationId, StationModel,
    },
    station::{DoorPosition, SpineResolver, orient_spine, project_door},
};

/// Arrival and departure platforms with the services used there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSelection {
    pub source_platform: ElementId,
    pub source_service: RelationId,
    pub dest_platform: ElementId,
    pub dest_service: RelationId,
}

/// Where the walk leaves or enters one platform
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformPosition {
    pub platform: ElementId,
    pub service: RelationId,
    pub platform_number: Option<String>,
    /// Spine oriented towards the next stop of `service`
    pub spine: PlatformSpine,
    pub exit_node: NodeId,
    pub door: DoorPosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    pub path: WalkingPath,
    pub source: PlatformPosition,
    pub destination: PlatformPosition,
}

/// Which end of the walk a platform sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Source,
    Destination,
}

/// Plans the walk from the arrival platform to the departure platform and
/// locates the best door on both of them.
///
/// # Errors
///
/// - [`Error::UnknownPlatform`] / [`Error::ServiceNotAtPlatform`] for a
///   selection that does not match the catalog
/// - [`Error::UnresolvedSpine`] / [`Error::AmbiguousPlatformEdge`] if a
///   platform spine cannot be determined
/// - [`Error::NoEgressNodes`] if a platform has no node connected to the
///   walking network
/// - [`Error::UnreachableTarget`] if no walk exists
/// - [`Error::Cancelled`] if `cancel` fires
pub fn plan_transfer(
    model: &StationModel,
    catalog: &PlatformCatalog,
    selection: &RouteSelection,
    cancel: &Cancellation,
) -> Result<TransferPlan, Error> {
    let source_record =
        validate_selection(catalog, selection.source_platform, selection.source_service)?;
    let dest_record = validate_selection(catalog, selection.dest_platform, selection.dest_service)?;

    let resolver = SpineResolver::for_model(model);
    let source =
        PlatformContext::prepare(model, &resolver, source_record, selection.source_service)?;
    let destination =
        PlatformContext::prepare(model, &resolver, dest_record, selection.dest_service)?;
    cancel.check()?;

    let path = shortest_path_between(
        &model.pedestrian_graph,
        &source.egress,
        &destination.egress,
        cancel,
    )?
    .ok_or(Error::UnreachableTarget {
        source_platform: source.platform,
        target_platform: destination.platform,
    })?;
    info!(
        "Walk from {} to {}: {:.1} m over {} nodes",
        source.platform,
        destination.platform,
        path.weight,
        path.nodes.len()
    );

    let source = source.position(&model.snapshot, &path, Side::Source)?;
    let destination = destination.position(&model.snapshot, &path, Side::Destination)?;

    Ok(TransferPlan {
        path,
        source,
        destination,
    })
}

fn validate_selection(
    catalog: &PlatformCatalog,
    platform: ElementId,
    service: RelationId,
) -> Result<&PlatformRecord, Error> {
    let record = catalog
        .platform(platform)
        .ok_or(Error::UnknownPlatform(platform))?;
    if record.has_service(service) {
        Ok(record)
    } else {
        Err(Error::ServiceNotAtPlatform { platform, service })
    }
}

/// Per-query state of one platform before the walk is known
struct PlatformContext {
    platform: ElementId,
    service: RelationId,
    platform_number: Option<String>,
    spine: PlatformSpine,
    egress: Vec<NodeId>,
}

impl PlatformContext {
    fn prepare(
        model: &StationModel,
        resolver: &SpineResolver<'_>,
        record: &PlatformRecord,
        service: RelationId,
    ) -> Result<Self, Error> {
        let snapshot = &model.snapshot;
        let platform = record.id;

        let platform_number = record.platform_number(service).map(str::to_string);
        if platform_number.is_none() {
            warn!(
                "{}; platform edges cannot be matched by number",
                Error::MissingPlatformNumber { platform, service }
            );
        }

        let route = snapshot
            .relation(service)
            .ok_or(Error::UnknownElement(service.into()))?;
        let spine = resolver.resolve(platform, platform_number.as_deref())?;
        let spine = orient_spine(snapshot, spine, platform, route);

        let egress = egress_nodes(model, platform)?;
        debug!(
            "Platform {platform}: number {platform_number:?}, {} egress nodes",
            egress.len()
        );

        Ok(Self {
            platform,
            service,
            platform_number,
            spine,
            egress,
        })
    }

    fn position(
        self,
        snapshot: &MapSnapshot,
        path: &WalkingPath,
        side: Side,
    ) -> Result<PlatformPosition, Error> {
        let exit_node = exit_node(snapshot, path, side).ok_or(Error::UnrecoverableError(
            "walking path without nodes",
        ))?;
        let exit_point: Point<f64> = snapshot
            .point(exit_node)
            .ok_or(Error::UnknownElement(exit_node.into()))?;
        let door =
            project_door(exit_point, &self.spine).ok_or(Error::UnresolvedSpine(self.platform))?;

        Ok(PlatformPosition {
            platform: self.platform,
            service: self.service,
            platform_number: self.platform_number,
            spine: self.spine,
            exit_node,
            door,
        })
    }
}

/// Platform nodes where a walk may start or end: nodes with a `level` tag or
/// on a footway, that are vertices of the pedestrian graph.
///
/// # Errors
///
/// [`Error::NoEgressNodes`] if there are none.
pub fn egress_nodes(model: &StationModel, platform: ElementId) -> Result<Vec<NodeId>, Error> {
    let snapshot = &model.snapshot;
    let graph = &model.pedestrian_graph;

    let candidates: Vec<NodeId> = match platform {
        ElementId::Way(id) => snapshot
            .way(id)
            .ok_or(Error::UnknownElement(platform))?
            .nodes
            .clone(),
        ElementId::Relation(id) => {
            let relation = snapshot
                .relation(id)
                .ok_or(Error::UnknownElement(platform))?;
            relation
                .members
                .iter()
                .flat_map(|member| match member.element {
                    ElementId::Node(node) => vec![node],
                    ElementId::Way(way) => snapshot
                        .way(way)
                        .map(|way| way.nodes.clone())
                        .unwrap_or_default(),
                    ElementId::Relation(_) => Vec::new(),
                })
                .collect()
        }
        ElementId::Node(_) => {
            return Err(Error::ElementKindMismatch {
                element: platform,
                expected: "way or relation",
            });
        }
    };

    let mut seen = HashSet::new();
    let egress: Vec<NodeId> = candidates
        .into_iter()
        .filter(|&id| seen.insert(id))
        .filter(|&id| graph.contains(id))
        .filter(|&id| {
            graph.is_footway_node(id)
                || snapshot.node(id).is_some_and(|node| node.is_level_change())
        })
        .collect();

    if egress.is_empty() {
        return Err(Error::NoEgressNodes(platform));
    }
    Ok(egress)
}

/// First level-tagged node of the walk when leaving the source platform,
/// last one when entering the destination. Falls back to the walk's end.
fn exit_node(snapshot: &MapSnapshot, path: &WalkingPath, side: Side) -> Option<NodeId> {
    let level_change =
        |id: &&NodeId| snapshot.node(**id).is_some_and(|node| node.is_level_change());

    match side {
        Side::Source => path
            .nodes
            .iter()
            .find(level_change)
            .copied()
            .or_else(|| path.source()),
        Side::Destination => path
            .nodes
            .iter()
            .rev()
            .find(level_change)
            .copied()
            .or_else(|| path.target()),
    }
}
