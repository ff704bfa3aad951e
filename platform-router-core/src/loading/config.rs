use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Half width of a rail corridor in meters
pub const DEFAULT_RAIL_PADDING: f64 = 3.0;

/// Inputs for [`create_station_model`](super::create_station_model)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationModelConfig {
    /// Path to the `.osm.pbf` extract
    pub osm_path: PathBuf,
    /// Rail corridor half width, meters
    #[serde(default = "default_rail_padding")]
    pub rail_padding: f64,
}

impl StationModelConfig {
    pub fn new(osm_path: impl Into<PathBuf>) -> Self {
        Self {
            osm_path: osm_path.into(),
            rail_padding: DEFAULT_RAIL_PADDING,
        }
    }
}

fn default_rail_padding() -> f64 {
    DEFAULT_RAIL_PADDING
}
