//! Platforms found for a station search

use hashbrown::HashMap;

use super::service::ServiceSummary;
use crate::model::{ElementId, RelationId};

/// A platform and the services calling at it
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformRecord {
    pub id: ElementId,
    pub name: String,
    /// Route relations in discovery order, without duplicates
    pub services: Vec<RelationId>,
    /// Platform number announced by each service, where it has one
    pub platform_numbers: HashMap<RelationId, String>,
}

impl PlatformRecord {
    pub fn new(id: ElementId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            services: Vec::new(),
            platform_numbers: HashMap::new(),
        }
    }

    /// Records `service`, keeping the first insertion position
    pub fn add_service(&mut self, service: RelationId) {
        if !self.services.contains(&service) {
            self.services.push(service);
        }
    }

    pub fn has_service(&self, service: RelationId) -> bool {
        self.services.contains(&service)
    }

    pub fn platform_number(&self, service: RelationId) -> Option<&str> {
        self.platform_numbers.get(&service).map(String::as_str)
    }

    /// Platforms without services cannot be part of a transfer
    pub fn is_relevant(&self) -> bool {
        !self.services.is_empty()
    }
}

/// Platform listing for one search term
#[derive(Debug, Clone, Default)]
pub struct PlatformCatalog {
    pub search_term: String,
    /// Sorted by element id
    pub platforms: Vec<PlatformRecord>,
    pub services: HashMap<RelationId, ServiceSummary>,
}

impl PlatformCatalog {
    pub fn platform(&self, id: ElementId) -> Option<&PlatformRecord> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn service(&self, id: RelationId) -> Option<&ServiceSummary> {
        self.services.get(&id)
    }

    pub fn relevant_platforms(&self) -> impl Iterator<Item = &PlatformRecord> {
        self.platforms.iter().filter(|p| p.is_relevant())
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}
