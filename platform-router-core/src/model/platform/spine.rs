//! Two-point platform spine

use geo::Point;

use crate::geometry::great_circle_distance;

/// Line along the platform edge that faces the tracks.
///
/// `start` and `end` always differ; a degenerate spine is never constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformSpine {
    pub start: Point<f64>,
    pub end: Point<f64>,
}

impl PlatformSpine {
    /// Returns `None` when both points coincide
    pub fn new(start: Point<f64>, end: Point<f64>) -> Option<Self> {
        if start == end {
            None
        } else {
            Some(Self { start, end })
        }
    }

    /// Same spine with the endpoints exchanged
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Great-circle length in meters
    pub fn length(&self) -> f64 {
        great_circle_distance(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_spine_is_rejected() {
        let p = Point::new(13.4, 52.5);
        assert!(PlatformSpine::new(p, p).is_none());
    }

    #[test]
    fn test_reversed() {
        let a = Point::new(13.4, 52.5);
        let b = Point::new(13.401, 52.5);
        let spine = PlatformSpine::new(a, b).unwrap();
        assert_eq!(spine.reversed().start, b);
        assert_eq!(spine.reversed().reversed(), spine);
        assert!((spine.length() - spine.reversed().length()).abs() < 1e-9);
    }
}
