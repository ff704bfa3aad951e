//! OSM pbf processing

mod processor;

pub use processor::load_snapshot;
