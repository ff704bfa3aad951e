use std::time::Instant;

use log::info;

use super::config::StationModelConfig;
use super::pedestrian::build_pedestrian_graph;
use super::rail::build_rail_index;
use crate::{
    Error,
    cancel::Cancellation,
    model::{MapSnapshot, StationModel, StationModelMeta},
};

/// Creates a station model from the configured OSM extract
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the file cannot be read,
/// or the build is cancelled
pub fn create_station_model(
    config: &StationModelConfig,
    cancel: &Cancellation,
) -> Result<StationModel, Error> {
    validate_config(config)?;

    let started = Instant::now();
    let snapshot = MapSnapshot::from_pbf(&config.osm_path)?;
    info!("Parsing took {:?}", started.elapsed());

    let model = station_model_from_snapshot(
        snapshot,
        StationModelMeta {
            rail_padding: config.rail_padding,
        },
        cancel,
    )?;

    // Decoding protobuf blocks leaves a lot of freed memory in the heap.
    // This call returns free memory from the tail of the heap to the system.
    //
    // # Safety
    //
    // This call is safe to use on linux with glibc implementation
    // which is checked by the cfg attribute in compile time.
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    unsafe {
        if libc::malloc_trim(0) == 0 {
            log::warn!("Memory trimming failed - continuing anyway");
        } else {
            log::debug!("Successfully trimmed unused heap memory");
        }
    }
    Ok(model)
}

/// Builds the pedestrian graph and the rail index over an already parsed
/// snapshot. Both builders only read the snapshot and run concurrently.
///
/// # Errors
///
/// Returns an error if the build is cancelled or a builder thread panics
pub fn station_model_from_snapshot(
    snapshot: MapSnapshot,
    meta: StationModelMeta,
    cancel: &Cancellation,
) -> Result<StationModel, Error> {
    let started = Instant::now();

    let (pedestrian_graph, rail_index) = std::thread::scope(|scope| {
        let graph_handle = scope.spawn(|| build_pedestrian_graph(&snapshot, cancel));
        let rail_index = build_rail_index(&snapshot, meta.rail_padding);
        let graph = graph_handle
            .join()
            .map_err(|_| Error::UnrecoverableError("pedestrian graph thread panicked"))?;
        Ok::<_, Error>((graph?, rail_index))
    })?;

    info!("Station model built in {:?}", started.elapsed());
    Ok(StationModel::new(snapshot, pedestrian_graph, rail_index, meta))
}

fn validate_config(config: &StationModelConfig) -> Result<(), Error> {
    if !config.osm_path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("OSM file not found: {}", config.osm_path.display()),
        )));
    }

    if !config.rail_padding.is_finite() || config.rail_padding <= 0.0 {
        return Err(Error::InvalidData(format!(
            "Rail padding must be a positive number of meters, got {}",
            config.rail_padding
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_rejected() {
        let config = StationModelConfig::new("/nonexistent/berlin-latest.osm.pbf");
        assert!(matches!(
            create_station_model(&config, &Cancellation::new()),
            Err(Error::IoError(_))
        ));
    }

    #[test]
    fn test_invalid_padding_is_rejected() {
        let mut config = StationModelConfig::new(std::env::temp_dir());
        config.rail_padding = -1.0;
        assert!(matches!(validate_config(&config), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_empty_snapshot_builds() {
        let model = station_model_from_snapshot(
            MapSnapshot::new(),
            StationModelMeta { rail_padding: 3.0 },
            &Cancellation::new(),
        )
        .unwrap();
        assert_eq!(model.pedestrian_graph.node_count(), 0);
        assert!(model.rail_index.is_empty());
    }
}
