//! Node, way and relation records of a map snapshot

use geo::Point;
use hashbrown::HashMap;

use super::ids::{ElementId, NodeId, RelationId, WayId};

/// Key/value tags of an OSM element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(HashMap<String, String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// True if `key` is present with exactly `value`
    pub fn is(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

}

impl<K, V> FromIterator<(K, V)> for Tags
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Tags(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    /// `x` is longitude, `y` is latitude (degrees)
    pub geometry: Point<f64>,
    pub tags: Tags,
}

impl Node {
    pub fn new(id: NodeId, lon: f64, lat: f64, tags: Tags) -> Self {
        Self {
            id,
            geometry: Point::new(lon, lat),
            tags,
        }
    }

    /// Node carries a `level` tag, i.e. it sits on a level change
    pub fn is_level_change(&self) -> bool {
        self.tags.has("level")
    }
}

#[derive(Debug, Clone)]
pub struct Way {
    pub id: WayId,
    pub nodes: Vec<NodeId>,
    pub tags: Tags,
}

impl Way {
    /// Closed ring: at least a triangle with the first id repeated at the end
    pub fn is_closed(&self) -> bool {
        self.nodes.len() >= 4 && self.nodes.first() == self.nodes.last()
    }

    pub fn first_node(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn last_node(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub element: ElementId,
    pub role: String,
}

impl Member {
    pub fn new(element: impl Into<ElementId>, role: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            role: role.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Relation {
    pub id: RelationId,
    /// Members in mapped order; for routes this order is the direction of travel
    pub members: Vec<Member>,
    pub tags: Tags,
}

impl Relation {
    /// Position of `element` in the member list
    pub fn member_position(&self, element: ElementId) -> Option<usize> {
        self.members.iter().position(|m| m.element == element)
    }

    /// Member ways, in member order
    pub fn member_ways(&self) -> impl Iterator<Item = (WayId, &str)> {
        self.members.iter().filter_map(|m| match m.element {
            ElementId::Way(id) => Some((id, m.role.as_str())),
            _ => None,
        })
    }
}
