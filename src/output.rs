//! Presentation of the catalog and the transfer result

use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use platform_router_core::{
    model::{PlatformCatalog, PlatformRecord, ServiceSummary},
    routing::{PlatformPosition, TransferPlan},
};
use serde_json::json;

pub fn print_catalog(catalog: &PlatformCatalog) {
    if catalog.is_empty() {
        println!("No platforms match '{}'", catalog.search_term);
        return;
    }

    println!("Platforms matching '{}':", catalog.search_term);
    for platform in &catalog.platforms {
        println!("  {:<18} {}", platform.id.to_string(), platform.name);
        for service in platform.services.iter().filter_map(|id| catalog.service(*id)) {
            println!("      {}", service_line(platform, service));
        }
    }
}

/// One catalog row, e.g. `S3 to Erkner on platform 1`
fn service_line(platform: &PlatformRecord, service: &ServiceSummary) -> String {
    let number = platform.platform_number(service.id).unwrap_or("?");
    format!(
        "{:>12}  {:<10} {} on platform {number}  {}",
        service.id.0,
        service.kind.as_str(),
        service.label(),
        service.operator
    )
    .trim_end()
    .to_string()
}

pub fn print_plan(plan: &TransferPlan) {
    println!("Walk of {:.0} m over {} nodes", plan.path.weight, plan.path.nodes.len());
    print_position("Leave", &plan.source);
    print_position("Board", &plan.destination);
}

fn print_position(verb: &str, position: &PlatformPosition) {
    let number = position.platform_number.as_deref().unwrap_or("?");
    println!(
        "  {verb} {} (platform {number}) at {:.0}% of the platform, {:.0} m from its front end",
        position.platform,
        position.door.normalized * 100.0,
        position.door.distance
    );
}

/// Writes the path and both door points as a feature collection
pub fn write_plan(plan: &TransferPlan, path: &Path) -> Result<()> {
    let features = vec![
        plan.to_geojson()?,
        door_feature("source", &plan.source)?,
        door_feature("destination", &plan.destination)?,
    ];
    let collection = FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    };

    let text = serde_json::to_string_pretty(&collection)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn door_feature(side: &str, position: &PlatformPosition) -> Result<Feature> {
    let geometry = Geometry::new(GeoJsonValue::from(&position.door.point));
    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "side": side,
            "platform": position.platform.to_string(),
            "normalized_position": position.door.normalized,
            "distance": position.door.distance,
        }
    });
    Ok(serde_json::from_value::<Feature>(value)?)
}

#[cfg(test)]
mod tests {
    use platform_router_core::model::{ElementId, RelationId, Tags, WayId};

    use super::*;

    #[test]
    fn test_service_line_names_destination_and_platform() {
        let tags: Tags = [
            ("route", "light_rail"),
            ("ref", "S3"),
            ("to", "Erkner"),
            ("operator", "S-Bahn Berlin"),
        ]
        .into_iter()
        .collect();
        let service = ServiceSummary::from_tags(RelationId(300), &tags);

        let mut platform = PlatformRecord::new(ElementId::Way(WayId(100)), "Ostkreuz");
        platform.add_service(RelationId(300));
        assert!(service_line(&platform, &service).contains("S3 to Erkner on platform ?"));

        platform
            .platform_numbers
            .insert(RelationId(300), "1".to_string());
        let line = service_line(&platform, &service);
        assert!(line.contains("S3 to Erkner on platform 1"));
        assert!(line.ends_with("S-Bahn Berlin"));
    }
}
