//! Rail corridor index construction

use itertools::Itertools;
use log::info;
use rayon::prelude::*;

use crate::{
    geometry::rotated_bound_with_pad,
    model::{MapSnapshot, RailCorridor, RailProximityIndex, Way},
};

/// `railway=*` values of running lines
const RUNNING_RAIL: [&str; 6] = [
    "rail",
    "light_rail",
    "tram",
    "subway",
    "narrow_gauge",
    "monorail",
];

fn is_running_rail(way: &Way) -> bool {
    way.tags
        .get("railway")
        .is_some_and(|value| RUNNING_RAIL.contains(&value))
}

/// Pads every segment of every running rail line by `padding` meters
pub fn build_rail_index(snapshot: &MapSnapshot, padding: f64) -> RailProximityIndex {
    let rails: Vec<&Way> = snapshot
        .ways
        .values()
        .filter(|way| is_running_rail(way))
        .collect();
    let corridors: Vec<RailCorridor> = rails
        .par_iter()
        .flat_map_iter(|way| {
            // a segment with a node missing from the extract is dropped,
            // never bridged
            way.nodes
                .iter()
                .tuple_windows()
                .filter_map(|(&a, &b)| Some((snapshot.point(a)?, snapshot.point(b)?)))
                .filter(|(a, b)| a != b)
                .map(move |(a, b)| RailCorridor {
                    way: way.id,
                    ring: rotated_bound_with_pad(a, b, padding),
                })
        })
        .collect();

    info!("Rail index: {} corridors", corridors.len());
    RailProximityIndex::new(corridors)
}
