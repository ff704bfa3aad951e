//! Rail corridors used to decide which platform nodes face the tracks

use geo::{BoundingRect, LineString, Point};
use rstar::{
    RTree,
    primitives::{GeomWithData, Rectangle},
};

use crate::{geometry::is_point_in_rectangle, model::WayId};

/// Oriented rectangle padding one segment of a running rail line
#[derive(Debug, Clone)]
pub struct RailCorridor {
    /// Rail way the segment belongs to
    pub way: WayId,
    /// Closed 5-point ring
    pub ring: LineString<f64>,
}

type CorridorEnvelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Immutable set of rail corridors ("gates") with an envelope index
#[derive(Debug, Clone)]
pub struct RailProximityIndex {
    corridors: Vec<RailCorridor>,
    rtree: RTree<CorridorEnvelope>,
}

impl RailProximityIndex {
    pub fn new(corridors: Vec<RailCorridor>) -> Self {
        let envelopes = corridors
            .iter()
            .enumerate()
            .filter_map(|(idx, corridor)| {
                corridor.ring.bounding_rect().map(|rect| {
                    GeomWithData::new(
                        Rectangle::from_corners(
                            [rect.min().x, rect.min().y],
                            [rect.max().x, rect.max().y],
                        ),
                        idx,
                    )
                })
            })
            .collect();

        Self {
            corridors,
            rtree: RTree::bulk_load(envelopes),
        }
    }

    /// True if `point` lies inside any corridor.
    ///
    /// Malformed corridors are logged and count as "not contained".
    pub fn is_close(&self, point: Point<f64>) -> bool {
        self.rtree
            .locate_all_at_point(&[point.x(), point.y()])
            .any(|candidate| {
                let corridor = &self.corridors[candidate.data];
                match is_point_in_rectangle(&corridor.ring, point) {
                    Ok(inside) => inside,
                    Err(e) => {
                        log::warn!("Skipping corridor of rail way {:?}: {e}", corridor.way);
                        false
                    }
                }
            })
    }

    pub fn corridors(&self) -> &[RailCorridor] {
        &self.corridors
    }

    pub fn len(&self) -> usize {
        self.corridors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corridors.is_empty()
    }
}
