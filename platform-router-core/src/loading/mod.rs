//! This module is responsible for loading OSM data and building the
//! read-only station model used for platform routing.

mod builder;
mod config;
pub mod osm;
mod pedestrian;
mod rail;

pub use builder::{create_station_model, station_model_from_snapshot};
pub use config::{DEFAULT_RAIL_PADDING, StationModelConfig};
pub use pedestrian::build_pedestrian_graph;
pub use rail::build_rail_index;
