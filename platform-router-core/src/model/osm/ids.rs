//! Typed OSM identifiers

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// OSM node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub i64);

/// OSM way identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WayId(pub i64);

/// OSM relation identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationId(pub i64);

/// Reference to any OSM element.
///
/// Platforms are mapped either as ways or as relations, so they are always
/// addressed through this type and matched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum ElementId {
    Node(NodeId),
    Way(WayId),
    Relation(RelationId),
}

impl ElementId {
    /// Way id of this element
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementKindMismatch`] if the element is not a way.
    pub fn way_id(self) -> Result<WayId, Error> {
        match self {
            ElementId::Way(id) => Ok(id),
            other => Err(Error::ElementKindMismatch {
                element: other,
                expected: "way",
            }),
        }
    }

    /// Relation id of this element
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementKindMismatch`] if the element is not a relation.
    pub fn relation_id(self) -> Result<RelationId, Error> {
        match self {
            ElementId::Relation(id) => Ok(id),
            other => Err(Error::ElementKindMismatch {
                element: other,
                expected: "relation",
            }),
        }
    }

    pub fn kind(self) -> &'static str {
        match self {
            ElementId::Node(_) => "node",
            ElementId::Way(_) => "way",
            ElementId::Relation(_) => "relation",
        }
    }

    fn raw(self) -> i64 {
        match self {
            ElementId::Node(NodeId(id))
            | ElementId::Way(WayId(id))
            | ElementId::Relation(RelationId(id)) => id,
        }
    }
}

impl From<NodeId> for ElementId {
    fn from(id: NodeId) -> Self {
        ElementId::Node(id)
    }
}

impl From<WayId> for ElementId {
    fn from(id: WayId) -> Self {
        ElementId::Way(id)
    }
}

impl From<RelationId> for ElementId {
    fn from(id: RelationId) -> Self {
        ElementId::Relation(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind(), self.raw())
    }
}

/// Parses the `kind/id` form used by openstreetmap.org urls, e.g. `way/52580085`
impl FromStr for ElementId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once('/')
            .ok_or_else(|| Error::InvalidData(format!("expected `kind/id`, got '{s}'")))?;
        let id: i64 = id
            .trim()
            .parse()
            .map_err(|e| Error::InvalidData(format!("invalid element id '{id}': {e}")))?;

        match kind.trim().to_ascii_lowercase().as_str() {
            "node" | "n" => Ok(ElementId::Node(NodeId(id))),
            "way" | "w" => Ok(ElementId::Way(WayId(id))),
            "relation" | "r" => Ok(ElementId::Relation(RelationId(id))),
            other => Err(Error::InvalidData(format!("unknown element kind '{other}'"))),
        }
    }
}
