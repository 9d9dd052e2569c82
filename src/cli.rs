use std::path::PathBuf;

use clap::Parser;

use dam_tiles::config::{
    DEFAULT_CONVERTER_BIN, DEFAULT_GEOJSON, DEFAULT_MAX_ZOOM, DEFAULT_MBTILES, DEFAULT_MIN_ZOOM,
    DEFAULT_SHAPEFILE, DEFAULT_TILER_BIN,
};
use dam_tiles::{CachePolicy, Config, ConverterBackend};

#[derive(Parser, Debug)]
#[command(
    name = "dam-tiles",
    version,
    about = "Convert the US dams shapefile to GeoJSON and tile it into an mbtiles archive"
)]
pub struct Args {
    #[arg(long, default_value = DEFAULT_SHAPEFILE, help = "Source shapefile")]
    pub shapefile: PathBuf,
    #[arg(long, default_value = DEFAULT_GEOJSON, help = "GeoJSON output, reused when present")]
    pub geojson: PathBuf,
    #[arg(long, default_value = DEFAULT_MBTILES, help = "Tile archive output, always overwritten")]
    pub mbtiles: PathBuf,
    #[arg(long, default_value_t = DEFAULT_MIN_ZOOM)]
    pub min_zoom: u8,
    #[arg(long, default_value_t = DEFAULT_MAX_ZOOM)]
    pub max_zoom: u8,
    #[arg(long, value_enum, default_value_t = ConverterBackend::Ogr2ogr)]
    pub converter: ConverterBackend,
    #[arg(long, default_value = DEFAULT_CONVERTER_BIN, help = "Converter program to run")]
    pub converter_bin: String,
    #[arg(long, default_value = DEFAULT_TILER_BIN, help = "Tiler program to run")]
    pub tiler_bin: String,
    #[arg(long, value_enum, default_value_t = CachePolicy::Exists)]
    pub cache_policy: CachePolicy,
    #[arg(long, help = "Tile even if the conversion failed")]
    pub keep_going: bool,
    #[arg(long, help = "Print feature count and extent of the GeoJSON")]
    pub summary: bool,
    #[arg(long, help = "Print the commands without running them")]
    pub dry_run: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            shapefile: args.shapefile,
            geojson: args.geojson,
            mbtiles: args.mbtiles,
            min_zoom: args.min_zoom,
            max_zoom: args.max_zoom,
            converter: args.converter,
            converter_bin: args.converter_bin,
            tiler_bin: args.tiler_bin,
            cache_policy: args.cache_policy,
            keep_going: args.keep_going,
            summary: args.summary,
            dry_run: args.dry_run,
        }
    }
}
