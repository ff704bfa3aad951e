//! OSM primitives as seen by the router

pub mod elements;
pub mod ids;
pub mod snapshot;

pub use elements::{Member, Node, Relation, Tags, Way};
pub use ids::{ElementId, NodeId, RelationId, WayId};
pub use snapshot::MapSnapshot;
