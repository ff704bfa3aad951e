use thiserror::Error;

use crate::model::{ElementId, RelationId, WayId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed geometry: {0}")]
    MalformedGeometry(String),
    #[error("No platform spine could be resolved for {0}")]
    UnresolvedSpine(ElementId),
    #[error("Platform {platform} has several platform edges {candidates:?} and none matches the platform number")]
    AmbiguousPlatformEdge {
        platform: ElementId,
        candidates: Vec<WayId>,
    },
    #[error("No walking route between {source_platform} and {target_platform}")]
    UnreachableTarget {
        source_platform: ElementId,
        target_platform: ElementId,
    },
    #[error("No platform number found for {platform} on service {service:?}")]
    MissingPlatformNumber {
        platform: ElementId,
        service: RelationId,
    },
    #[error("Expected a {expected}, got {element}")]
    ElementKindMismatch {
        element: ElementId,
        expected: &'static str,
    },
    #[error("Element {0} is not part of the map snapshot")]
    UnknownElement(ElementId),
    #[error("Element {0} is not a known platform")]
    UnknownPlatform(ElementId),
    #[error("Service {service:?} does not serve platform {platform}")]
    ServiceNotAtPlatform {
        platform: ElementId,
        service: RelationId,
    },
    #[error("Platform {0} has no nodes to enter or leave the walking network")]
    NoEgressNodes(ElementId),
    #[error("Platform selection was never delivered")]
    SelectionAborted,
    #[error("Operation cancelled")]
    Cancelled,
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("OSM error: {0}")]
    Osm(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Unrecoverable error: {0}")]
    UnrecoverableError(&'static str),
}
