//! Platform discovery, service matching and platform numbers

use hashbrown::HashMap;
use log::{debug, info};

use crate::{
    Error,
    model::{
        ElementId, MapSnapshot, PlatformCatalog, PlatformRecord, RelationId, ServiceSummary, Tags,
    },
};

fn is_platform(tags: &Tags) -> bool {
    tags.is("railway", "platform") || tags.is("public_transport", "platform")
}

fn is_route(tags: &Tags) -> bool {
    tags.is("type", "route")
}

/// Finds the platforms whose name contains `search_term` and the services
/// calling at each of them.
///
/// An empty search term matches every platform.
pub fn build_catalog(snapshot: &MapSnapshot, search_term: &str) -> PlatformCatalog {
    let matches_term = |tags: &Tags| {
        is_platform(tags) && tags.get("name").unwrap_or_default().contains(search_term)
    };

    let way_platforms = snapshot
        .ways
        .values()
        .filter(|way| matches_term(&way.tags))
        .map(|way| PlatformRecord::new(way.id.into(), way.tags.get("name").unwrap_or_default()));
    let relation_platforms = snapshot
        .relations
        .values()
        .filter(|relation| matches_term(&relation.tags))
        .map(|relation| {
            PlatformRecord::new(
                relation.id.into(),
                relation.tags.get("name").unwrap_or_default(),
            )
        });

    let mut platforms: Vec<PlatformRecord> = way_platforms.chain(relation_platforms).collect();
    platforms.sort_by_key(|p| p.id);
    debug!("Found {} platforms for '{search_term}'", platforms.len());

    let services = match_services(snapshot, &mut platforms);
    assign_platform_numbers(snapshot, &mut platforms);
    info!(
        "Matched {} services to {} platforms for '{search_term}'",
        services.len(),
        platforms.len()
    );

    PlatformCatalog {
        search_term: search_term.to_string(),
        platforms,
        services,
    }
}

/// Records every route relation as a service of each platform it references.
///
/// Routes are visited in ascending id so that service order is stable.
/// Way members only match platform ways, relation members only platform
/// relations.
fn match_services(
    snapshot: &MapSnapshot,
    platforms: &mut [PlatformRecord],
) -> HashMap<RelationId, ServiceSummary> {
    let by_element: HashMap<ElementId, usize> = platforms
        .iter()
        .enumerate()
        .map(|(idx, platform)| (platform.id, idx))
        .collect();

    let mut routes: Vec<RelationId> = snapshot
        .relations
        .values()
        .filter(|relation| is_route(&relation.tags))
        .map(|relation| relation.id)
        .collect();
    routes.sort_unstable();

    let mut services = HashMap::new();
    for route_id in routes {
        let Some(route) = snapshot.relation(route_id) else {
            continue;
        };
        for member in &route.members {
            let platform_idx = match member.element {
                ElementId::Way(_) | ElementId::Relation(_) => by_element.get(&member.element),
                ElementId::Node(_) => None,
            };
            if let Some(&idx) = platform_idx {
                platforms[idx].add_service(route_id);
                services
                    .entry(route_id)
                    .or_insert_with(|| ServiceSummary::from_tags(route_id, &route.tags));
            }
        }
    }
    services
}

/// Resolves the platform number of every (platform, service) pair.
/// Pairs without one stay unset.
fn assign_platform_numbers(snapshot: &MapSnapshot, platforms: &mut [PlatformRecord]) {
    for platform in platforms.iter_mut() {
        for &service in &platform.services {
            match resolve_platform_number(snapshot, platform.id, service) {
                Ok(number) => {
                    platform.platform_numbers.insert(service, number);
                }
                Err(e) => debug!("{e}"),
            }
        }
    }
}

/// Platform number of `platform` as announced for `service`.
///
/// Takes the first node member of the route whose `name` equals the
/// platform's name (its stop position) and returns its `local_ref`, falling
/// back to `ref`.
///
/// # Errors
///
/// [`Error::MissingPlatformNumber`] if the platform has no name, no stop
/// position matches, or the stop position has neither tag;
/// [`Error::UnknownElement`] if the service is not in the snapshot.
pub fn resolve_platform_number(
    snapshot: &MapSnapshot,
    platform: ElementId,
    service: RelationId,
) -> Result<String, Error> {
    let missing = || Error::MissingPlatformNumber { platform, service };

    let route = snapshot
        .relation(service)
        .ok_or(Error::UnknownElement(service.into()))?;
    let name = snapshot.element_name(platform).ok_or_else(missing)?;

    let stop_position = route
        .members
        .iter()
        .filter_map(|member| match member.element {
            ElementId::Node(id) => snapshot.node(id),
            _ => None,
        })
        .find(|node| node.tags.get("name") == Some(name))
        .ok_or_else(missing)?;

    stop_position
        .tags
        .get("local_ref")
        .or_else(|| stop_position.tags.get("ref"))
        .map(str::to_string)
        .ok_or_else(missing)
}
