//! Services (route relations) calling at platforms

use crate::model::{RelationId, Tags};

/// Vehicle type of a route, from its `route` tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Train,
    LightRail,
    Subway,
    Tram,
    Trolleybus,
    Bus,
    Ferry,
    Other(String),
}

impl RouteKind {
    pub fn from_tag(value: &str) -> Self {
        match value {
            "train" | "railway" => RouteKind::Train,
            "light_rail" => RouteKind::LightRail,
            "subway" => RouteKind::Subway,
            "tram" => RouteKind::Tram,
            "trolleybus" => RouteKind::Trolleybus,
            "bus" => RouteKind::Bus,
            "ferry" => RouteKind::Ferry,
            other => RouteKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RouteKind::Train => "train",
            RouteKind::LightRail => "light_rail",
            RouteKind::Subway => "subway",
            RouteKind::Tram => "tram",
            RouteKind::Trolleybus => "trolleybus",
            RouteKind::Bus => "bus",
            RouteKind::Ferry => "ferry",
            RouteKind::Other(value) => value,
        }
    }
}

/// Presentation data of a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSummary {
    pub id: RelationId,
    pub name: String,
    /// Line designation, the route's `ref` tag
    pub reference: String,
    pub from: String,
    pub to: String,
    pub operator: String,
    pub kind: RouteKind,
}

impl ServiceSummary {
    pub fn from_tags(id: RelationId, tags: &Tags) -> Self {
        Self {
            id,
            name: tags.get("name").unwrap_or_default().to_string(),
            reference: tags.get("ref").unwrap_or_default().to_string(),
            from: tags.get("from").unwrap_or_default().to_string(),
            to: tags.get("to").unwrap_or_default().to_string(),
            operator: tags.get("operator").unwrap_or_default().to_string(),
            kind: RouteKind::from_tag(tags.get("route").unwrap_or_default()),
        }
    }

    /// Short label such as `S3 to Erkner`, falling back to the name
    pub fn label(&self) -> String {
        match (self.reference.is_empty(), self.to.is_empty()) {
            (false, false) => format!("{} to {}", self.reference, self.to),
            (false, true) => self.reference.clone(),
            (true, _) => self.name.clone(),
        }
    }
}
