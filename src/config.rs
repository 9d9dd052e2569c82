use std::path::PathBuf;

use clap::ValueEnum;

use crate::cache::CachePolicy;
use crate::error::{PipelineError, Result};

pub const DEFAULT_SHAPEFILE: &str = "dams/dams00x020.shp";
pub const DEFAULT_GEOJSON: &str = "dams/major_us_dams_2006.geojson";
pub const DEFAULT_MBTILES: &str = "major_us_dams_2006.mbtiles";
pub const DEFAULT_MIN_ZOOM: u8 = 3;
pub const DEFAULT_MAX_ZOOM: u8 = 14;
pub const DEFAULT_CONVERTER_BIN: &str = "ogr2ogr";
pub const DEFAULT_TILER_BIN: &str = "tippecanoe";
pub const TARGET_SRS: &str = "EPSG:4326";

/// Deepest zoom level accepted for tiling.
pub const MAX_SUPPORTED_ZOOM: u8 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConverterBackend {
    /// External ogr2ogr process, reprojecting to EPSG:4326
    #[default]
    #[value(name = "ogr2ogr")]
    Ogr2ogr,
    /// In-process conversion, no reprojection
    Native,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub shapefile: PathBuf,
    pub geojson: PathBuf,
    pub mbtiles: PathBuf,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub converter: ConverterBackend,
    pub converter_bin: String,
    pub tiler_bin: String,
    pub cache_policy: CachePolicy,
    pub keep_going: bool,
    pub summary: bool,
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            shapefile: PathBuf::from(DEFAULT_SHAPEFILE),
            geojson: PathBuf::from(DEFAULT_GEOJSON),
            mbtiles: PathBuf::from(DEFAULT_MBTILES),
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            converter: ConverterBackend::default(),
            converter_bin: DEFAULT_CONVERTER_BIN.to_string(),
            tiler_bin: DEFAULT_TILER_BIN.to_string(),
            cache_policy: CachePolicy::default(),
            keep_going: false,
            summary: false,
            dry_run: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.max_zoom > MAX_SUPPORTED_ZOOM {
            return Err(PipelineError::Config(format!(
                "max zoom {} exceeds {}",
                self.max_zoom, MAX_SUPPORTED_ZOOM
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(PipelineError::Config(format!(
                "min zoom {} is above max zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.converter_bin.is_empty() || self.tiler_bin.is_empty() {
            return Err(PipelineError::Config(
                "tool program names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
