//! Host configuration: optional TOML file, overridden by command line flags

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use platform_router_core::{
    loading::{DEFAULT_RAIL_PADDING, StationModelConfig},
    model::{ElementId, RelationId},
    routing::RouteSelection,
};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TOML file with default settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// OSM extract (.osm.pbf) covering the station
    #[arg(long)]
    pub osm_path: Option<PathBuf>,

    /// Only list platforms whose name contains this text
    #[arg(short, long)]
    pub search_term: Option<String>,

    /// Half width of the corridor around rail tracks, meters
    #[arg(long)]
    pub rail_padding: Option<f64>,

    /// Where to write the walking path as GeoJSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Arrival platform, e.g. `way/123` or `relation/456`
    #[arg(long)]
    pub source_platform: Option<ElementId>,

    /// Relation id of the arriving service
    #[arg(long)]
    pub source_service: Option<i64>,

    /// Departure platform, e.g. `way/123` or `relation/456`
    #[arg(long)]
    pub dest_platform: Option<ElementId>,

    /// Relation id of the departing service
    #[arg(long)]
    pub dest_service: Option<i64>,
}

/// Selection as written in the config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub source_platform: Option<String>,
    pub source_service: Option<i64>,
    pub dest_platform: Option<String>,
    pub dest_service: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub osm_path: Option<PathBuf>,
    pub search_term: String,
    pub rail_padding: f64,
    pub output: PathBuf,
    pub selection: SelectionConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            osm_path: None,
            search_term: String::new(),
            rail_padding: DEFAULT_RAIL_PADDING,
            output: PathBuf::from("path.geojson"),
            selection: SelectionConfig::default(),
        }
    }
}

impl HostConfig {
    /// Reads the config file, or the defaults if there is none
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Applies command line flags on top of the file values
    pub fn merge(mut self, args: Args) -> Self {
        if let Some(path) = args.osm_path {
            self.osm_path = Some(path);
        }
        if let Some(term) = args.search_term {
            self.search_term = term;
        }
        if let Some(padding) = args.rail_padding {
            self.rail_padding = padding;
        }
        if let Some(output) = args.output {
            self.output = output;
        }
        if let Some(platform) = args.source_platform {
            self.selection.source_platform = Some(platform.to_string());
        }
        if let Some(service) = args.source_service {
            self.selection.source_service = Some(service);
        }
        if let Some(platform) = args.dest_platform {
            self.selection.dest_platform = Some(platform.to_string());
        }
        if let Some(service) = args.dest_service {
            self.selection.dest_service = Some(service);
        }
        self
    }

    pub fn model_config(&self) -> Result<StationModelConfig> {
        let path = self
            .osm_path
            .clone()
            .context("no OSM extract given, pass --osm-path or set osm_path in the config file")?;
        let mut config = StationModelConfig::new(path);
        config.rail_padding = self.rail_padding;
        Ok(config)
    }

    /// The complete selection, `None` if nothing was selected
    pub fn selection(&self) -> Result<Option<RouteSelection>> {
        let s = &self.selection;
        match (
            &s.source_platform,
            s.source_service,
            &s.dest_platform,
            s.dest_service,
        ) {
            (None, None, None, None) => Ok(None),
            (Some(source), Some(source_service), Some(dest), Some(dest_service)) => {
                Ok(Some(RouteSelection {
                    source_platform: source.parse().context("source platform")?,
                    source_service: RelationId(source_service),
                    dest_platform: dest.parse().context("destination platform")?,
                    dest_service: RelationId(dest_service),
                }))
            }
            _ => bail!(
                "incomplete selection: source platform, source service, destination platform and destination service are all required"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_values_are_overridden_by_flags() {
        let config: HostConfig = toml::from_str(
            r#"
            osm_path = "berlin.osm.pbf"
            search_term = "Ostkreuz"

            [selection]
            source_platform = "way/100"
            source_service = 400
            dest_platform = "relation/200"
            dest_service = 401
            "#,
        )
        .unwrap();
        assert_eq!(config.rail_padding, DEFAULT_RAIL_PADDING);

        let args = Args::parse_from([
            "platform-router",
            "--search-term",
            "Warschauer",
            "--dest-service",
            "402",
        ]);
        let config = config.merge(args);
        assert_eq!(config.search_term, "Warschauer");
        assert_eq!(config.output, PathBuf::from("path.geojson"));

        let selection = config.selection().unwrap().unwrap();
        assert_eq!(selection.dest_service, RelationId(402));
        assert_eq!(selection.dest_platform.to_string(), "relation/200");
    }

    #[test]
    fn test_partial_selection_is_rejected() {
        let args = Args::parse_from(["platform-router", "--source-platform", "way/1"]);
        let config = HostConfig::default().merge(args);
        assert!(config.selection().is_err());
        assert!(HostConfig::default().selection().unwrap().is_none());
        assert!(HostConfig::default().model_config().is_err());
    }
}
