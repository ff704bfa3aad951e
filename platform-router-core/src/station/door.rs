//! Position along the platform that is closest to the exit

use geo::Point;

use crate::{
    geometry::{great_circle_distance, project_onto_line},
    model::PlatformSpine,
};

/// Where to stand on a platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorPosition {
    /// Exit projected onto the spine line
    pub point: Point<f64>,
    /// Position from spine start (`0`) to spine end (`1`); values outside
    /// `[0, 1]` mean the exit lies beyond the spine
    pub normalized: f64,
    /// Meters from spine start, negative behind it
    pub distance: f64,
}

/// Projects `exit` onto the infinite line through the spine.
///
/// Returns `None` only if the spine is too short to define a line.
pub fn project_door(exit: Point<f64>, spine: &PlatformSpine) -> Option<DoorPosition> {
    let projection = project_onto_line(exit, spine.start, spine.end)?;
    let length = spine.length();
    if length <= 0.0 {
        return None;
    }

    let along = great_circle_distance(spine.start, projection.point);
    let distance = if projection.fraction < 0.0 {
        -along
    } else {
        along
    };

    Some(DoorPosition {
        point: projection.point,
        normalized: distance / length,
        distance,
    })
}
