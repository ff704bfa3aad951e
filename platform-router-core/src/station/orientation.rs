//! Orients spines by the direction of travel of a service

use geo::Point;
use log::debug;

use crate::{
    geometry::great_circle_distance,
    model::{ElementId, MapSnapshot, PlatformSpine, Relation},
};

/// First node member after `platform` in the route's member list.
///
/// Route members are ordered along the direction of travel, so this is the
/// stop the service calls at next.
pub fn next_stop(snapshot: &MapSnapshot, platform: ElementId, route: &Relation) -> Option<Point<f64>> {
    let position = route.member_position(platform)?;
    route.members[position + 1..]
        .iter()
        .find_map(|member| match member.element {
            ElementId::Node(id) => snapshot.point(id),
            _ => None,
        })
}

/// Returns the spine with `start` on the side of the next stop.
///
/// Nothing changes when the next stop is unknown or both ends are equally
/// far, so applying this twice gives the same result as applying it once.
pub fn orient_spine(
    snapshot: &MapSnapshot,
    spine: PlatformSpine,
    platform: ElementId,
    route: &Relation,
) -> PlatformSpine {
    let Some(next) = next_stop(snapshot, platform, route) else {
        debug!(
            "No stop after platform {platform} on service {:?}, keeping spine orientation",
            route.id
        );
        return spine;
    };

    let to_start = great_circle_distance(spine.start, next);
    let to_end = great_circle_distance(spine.end, next);
    if to_end < to_start {
        debug!("Reversing spine of platform {platform} for service {:?}", route.id);
        spine.reversed()
    } else {
        spine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Member, Node, NodeId, RelationId, Tags, WayId};

    fn setup() -> (MapSnapshot, Relation, PlatformSpine) {
        let mut snapshot = MapSnapshot::new();
        snapshot.insert_node(Node::new(NodeId(1), 13.000, 52.0, Tags::new()));
        snapshot.insert_node(Node::new(NodeId(2), 13.010, 52.0, Tags::new()));
        snapshot.insert_node(Node::new(NodeId(3), 12.990, 52.0, Tags::new()));
        let route = Relation {
            id: RelationId(1),
            members: vec![
                Member::new(NodeId(1), "stop"),
                Member::new(WayId(5), "platform"),
                Member::new(WayId(6), "platform"),
                Member::new(NodeId(2), "stop"),
                Member::new(NodeId(3), "stop"),
            ],
            tags: Tags::new(),
        };
        // start points west, away from the next stop in the east
        let spine =
            PlatformSpine::new(Point::new(12.9995, 52.0), Point::new(13.0005, 52.0)).unwrap();
        (snapshot, route, spine)
    }

    #[test]
    fn test_next_stop_skips_non_nodes() {
        let (snapshot, route, _) = setup();
        let next = next_stop(&snapshot, ElementId::Way(WayId(5)), &route).unwrap();
        assert_eq!(next, Point::new(13.010, 52.0));
        assert!(next_stop(&snapshot, ElementId::Way(WayId(99)), &route).is_none());
    }

    #[test]
    fn test_spine_is_reversed_towards_next_stop() {
        let (snapshot, route, spine) = setup();
        let oriented = orient_spine(&snapshot, spine, ElementId::Way(WayId(5)), &route);
        assert_eq!(oriented, spine.reversed());
    }

    #[test]
    fn test_orientation_is_idempotent() {
        let (snapshot, route, spine) = setup();
        let platform = ElementId::Way(WayId(5));
        let once = orient_spine(&snapshot, spine, platform, &route);
        let twice = orient_spine(&snapshot, once, platform, &route);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_platform_keeps_orientation() {
        let (snapshot, route, spine) = setup();
        let result = orient_spine(&snapshot, spine, ElementId::Way(WayId(42)), &route);
        assert_eq!(result, spine);
    }
}
