use geo::LineString;
use geojson::{Feature, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::{PlatformPosition, TransferPlan};
use crate::Error;

impl TransferPlan {
    /// Converts the walking path to a `GeoJSON` `Feature` with the door
    /// positions of both platforms as properties.
    pub fn to_geojson(&self) -> Result<Feature, Error> {
        let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(
            self.path.coords.clone(),
        )));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "weight": self.path.weight,
                "node_count": self.path.nodes.len(),
                "source": position_properties(&self.source),
                "destination": position_properties(&self.destination),
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn position_properties(position: &PlatformPosition) -> serde_json::Value {
    json!({
        "platform": position.platform.to_string(),
        "service": position.service.0,
        "platform_number": position.platform_number,
        "exit_node": position.exit_node.0,
        "door": [position.door.point.x(), position.door.point.y()],
        "normalized_position": position.door.normalized,
        "distance": position.door.distance,
    })
}

#[cfg(test)]
mod tests {
    use geo::{Coord, Point};

    use super::*;
    use crate::{
        model::{ElementId, NodeId, PlatformSpine, RelationId, WayId},
        routing::WalkingPath,
        station::DoorPosition,
    };

    fn position(platform: i64, normalized: f64) -> PlatformPosition {
        PlatformPosition {
            platform: ElementId::Way(WayId(platform)),
            service: RelationId(9),
            platform_number: Some("2".to_string()),
            spine: PlatformSpine::new(Point::new(13.0, 52.0), Point::new(13.001, 52.0)).unwrap(),
            exit_node: NodeId(1),
            door: DoorPosition {
                point: Point::new(13.0005, 52.0),
                normalized,
                distance: 34.2,
            },
        }
    }

    #[test]
    fn test_feature_carries_path_and_positions() {
        let plan = TransferPlan {
            path: WalkingPath {
                nodes: vec![NodeId(1), NodeId(2)],
                coords: vec![Coord { x: 13.0, y: 52.0 }, Coord { x: 13.001, y: 52.001 }],
                weight: 132.5,
            },
            source: position(10, 0.5),
            destination: position(11, 1.25),
        };

        let feature = serde_json::to_value(plan.to_geojson().unwrap()).unwrap();
        assert_eq!(feature["geometry"]["type"], json!("LineString"));
        assert_eq!(feature["geometry"]["coordinates"].as_array().unwrap().len(), 2);

        let properties = &feature["properties"];
        assert_eq!(properties["weight"], json!(132.5));
        assert_eq!(properties["source"]["platform"], json!("way/10"));
        assert_eq!(properties["destination"]["normalized_position"], json!(1.25));

        assert!(plan.to_geojson_string().unwrap().contains("LineString"));
    }
}
