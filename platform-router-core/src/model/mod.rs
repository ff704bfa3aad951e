//! Data model for platform routing
//!
//! Contains the OSM snapshot types and the structures derived from them.

pub mod osm;
pub mod pedestrian;
pub mod platform;
pub mod rail;
pub mod station_model;

pub use osm::{ElementId, MapSnapshot, Member, Node, NodeId, Relation, RelationId, Tags, Way, WayId};
pub use pedestrian::{PedestrianEdge, PedestrianGraph, PedestrianNode};
pub use platform::{PlatformCatalog, PlatformRecord, PlatformSpine, RouteKind, ServiceSummary};
pub use rail::{RailCorridor, RailProximityIndex};
pub use station_model::{StationModel, StationModelMeta};
