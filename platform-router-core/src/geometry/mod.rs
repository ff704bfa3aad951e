//! Small-distance geometry on lon/lat points.
//!
//! All metric values are meters on a spherical earth (haversine), the same
//! measure used for pedestrian edge weights.

use geo::{Bearing, Coord, Destination, Distance, Haversine, LineString, Point};

use crate::Error;

/// Mean earth radius used for the local planar frame, meters
const EARTH_RADIUS: f64 = 6_371_008.8;

/// Great-circle distance in meters
pub fn great_circle_distance(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine.distance(a, b)
}

/// Initial bearing from `a` to `b`, degrees clockwise from north in `[0, 360)`
pub fn bearing(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine.bearing(a, b).rem_euclid(360.0)
}

/// Rectangle padding the segment `a`-`b` by `pad` meters on both sides.
///
/// Returns a closed ring of five points (first == last), wound clockwise so
/// that [`is_point_in_rectangle`] accepts it.
pub fn rotated_bound_with_pad(a: Point<f64>, b: Point<f64>, pad: f64) -> LineString<f64> {
    let line_bearing = bearing(a, b);
    let bearing_up = line_bearing + 90.0;
    let bearing_down = if line_bearing < 90.0 {
        line_bearing + 270.0
    } else {
        line_bearing - 90.0
    };

    let n1 = Haversine.destination(a, bearing_up, pad);
    let n2 = Haversine.destination(a, bearing_down, pad);
    let n3 = Haversine.destination(b, bearing_down, pad);
    let n4 = Haversine.destination(b, bearing_up, pad);

    LineString::from(vec![n1, n2, n3, n4, n1])
}

/// Convex quad containment for a closed 5-point ring wound clockwise.
///
/// A point on an edge counts as inside.
///
/// # Errors
///
/// [`Error::MalformedGeometry`] if the ring is not exactly five points or not
/// closed. Callers treat this as "not contained".
pub fn is_point_in_rectangle(ring: &LineString<f64>, point: Point<f64>) -> Result<bool, Error> {
    if ring.0.len() != 5 || !ring.is_closed() {
        return Err(Error::MalformedGeometry(format!(
            "expected a closed ring of 5 points, got {} points",
            ring.0.len()
        )));
    }

    for edge in ring.0.windows(2) {
        let (a, b) = (edge[0], edge[1]);
        let edge_vec = b - a;
        let to_point = Coord {
            x: point.x() - a.x,
            y: point.y() - a.y,
        };

        let cross = edge_vec.x * to_point.y - edge_vec.y * to_point.x;
        if cross > 0.0 {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Orthogonal projection of a point onto the infinite line through a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineProjection {
    /// Foot of the perpendicular
    pub point: Point<f64>,
    /// Position along `start -> end`, `0` at start and `1` at end; not clamped
    pub fraction: f64,
}

/// Projects `point` onto the line through `start` and `end` in a local
/// equirectangular frame centered on `start`.
///
/// Returns `None` for a degenerate line (`start == end`).
pub fn project_onto_line(
    point: Point<f64>,
    start: Point<f64>,
    end: Point<f64>,
) -> Option<LineProjection> {
    let frame = LocalFrame::new(start);
    let ab = frame.to_local(end);
    let ap = frame.to_local(point);

    let length_sq = ab.x * ab.x + ab.y * ab.y;
    if length_sq <= f64::EPSILON {
        return None;
    }

    let fraction = (ap.x * ab.x + ap.y * ab.y) / length_sq;
    let foot = Coord {
        x: ab.x * fraction,
        y: ab.y * fraction,
    };

    Some(LineProjection {
        point: frame.to_global(foot),
        fraction,
    })
}

/// Tangent plane approximation around an origin, meters
struct LocalFrame {
    origin: Point<f64>,
    cos_lat: f64,
}

impl LocalFrame {
    fn new(origin: Point<f64>) -> Self {
        Self {
            origin,
            cos_lat: origin.y().to_radians().cos(),
        }
    }

    fn to_local(&self, p: Point<f64>) -> Coord<f64> {
        Coord {
            x: (p.x() - self.origin.x()).to_radians() * self.cos_lat * EARTH_RADIUS,
            y: (p.y() - self.origin.y()).to_radians() * EARTH_RADIUS,
        }
    }

    fn to_global(&self, c: Coord<f64>) -> Point<f64> {
        Point::new(
            self.origin.x() + (c.x / (EARTH_RADIUS * self.cos_lat)).to_degrees(),
            self.origin.y() + (c.y / EARTH_RADIUS).to_degrees(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn square() -> LineString<f64> {
        // clockwise unit square
        LineString::from(vec![
            (0.0, 0.0),
            (0.0, 1.0),
            (1.0, 1.0),
            (1.0, 0.0),
            (0.0, 0.0),
        ])
    }

    #[test]
    fn test_point_in_rectangle() {
        let ring = square();
        assert!(is_point_in_rectangle(&ring, Point::new(0.5, 0.5)).unwrap());
        assert!(!is_point_in_rectangle(&ring, Point::new(1.5, 0.5)).unwrap());
        assert!(!is_point_in_rectangle(&ring, Point::new(0.5, -0.1)).unwrap());
    }

    #[test]
    fn test_malformed_ring_fails_closed() {
        let open = LineString::from(vec![
            (0.0, 0.0),
            (0.0, 1.0),
            (1.0, 1.0),
            (1.0, 0.0),
            (0.5, 0.0),
        ]);
        let short = LineString::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)]);

        assert!(matches!(
            is_point_in_rectangle(&open, Point::new(0.5, 0.5)),
            Err(Error::MalformedGeometry(_))
        ));
        assert!(is_point_in_rectangle(&short, Point::new(0.2, 0.5)).is_err());
        assert!(is_point_in_rectangle(&LineString::new(vec![]), Point::new(0.0, 0.0)).is_err());
    }

    #[test]
    fn test_rotated_bound_is_closed_and_padded() {
        let a = Point::new(13.45, 52.50);
        let b = Point::new(13.451, 52.5005);
        let pad = 3.0;
        let ring = rotated_bound_with_pad(a, b, pad);

        assert_eq!(ring.0.len(), 5);
        assert!(ring.is_closed());

        // corners 0,1 pad `a`, corners 2,3 pad `b`
        for (corner, anchor) in [(0, a), (1, a), (2, b), (3, b)] {
            let d = great_circle_distance(Point::from(ring.0[corner]), anchor);
            assert!((d - pad).abs() < 1e-3, "corner {corner} at {d} m");
        }
        // opposite corners sit on opposite sides of the segment
        let width = great_circle_distance(Point::from(ring.0[0]), Point::from(ring.0[1]));
        assert!((width - 2.0 * pad).abs() < 1e-2);
    }

    #[test]
    fn test_rotated_bound_contains_segment_midpoint_for_all_headings() {
        let a = Point::new(13.4, 52.5);
        for (dx, dy) in [
            (0.001, 0.0),
            (0.0, 0.001),
            (-0.001, 0.0),
            (0.0, -0.001),
            (0.001, 0.001),
            (-0.001, -0.0005),
            (0.0007, -0.001),
        ] {
            let b = Point::new(a.x() + dx, a.y() + dy);
            let ring = rotated_bound_with_pad(a, b, 3.0);
            let mid = Point::new(a.x() + dx / 2.0, a.y() + dy / 2.0);
            assert!(is_point_in_rectangle(&ring, mid).unwrap(), "heading ({dx}, {dy})");

            let far = Haversine.destination(mid, bearing(a, b) + 90.0, 10.0);
            assert!(!is_point_in_rectangle(&ring, far).unwrap(), "heading ({dx}, {dy})");
        }
    }

    #[test]
    fn test_bearing_range() {
        let a = Point::new(13.4, 52.5);
        let west = bearing(a, Point::new(13.39, 52.5));
        assert!((0.0..360.0).contains(&west));
        assert!((west - 270.0).abs() < 0.1);
    }

    #[test]
    fn test_project_midpoint() {
        let start = Point::new(13.4500, 52.5000);
        let end = Point::new(13.4520, 52.5010);
        let mid = Point::new(13.4510, 52.5005);

        let projection = project_onto_line(mid, start, end).unwrap();
        assert!((projection.fraction - 0.5).abs() < EPS);
    }

    #[test]
    fn test_projection_is_not_clamped() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(0.0, 0.001);
        let before = Point::new(0.0002, -0.0005);

        let projection = project_onto_line(before, start, end).unwrap();
        assert!((projection.fraction + 0.5).abs() < EPS);
        assert!(projection.point.x().abs() < 1e-9);
    }

    #[test]
    fn test_projection_degenerate_line() {
        let p = Point::new(1.0, 1.0);
        assert!(project_onto_line(Point::new(2.0, 2.0), p, p).is_none());
    }
}
