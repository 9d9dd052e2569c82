use log::{info, warn};
use shapefile_to_geojson::convert_shapefile_to_geojson;

use crate::cache::{self, Freshness};
use crate::config::{Config, ConverterBackend, TARGET_SRS};
use crate::error::{PipelineError, Result};
use crate::tool::ToolInvocation;

pub const ALREADY_MADE_NOTICE: &str = "nice, geojson already made";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Skipped,
    Converted,
    DryRun,
}

pub fn converter_invocation(config: &Config) -> ToolInvocation {
    ToolInvocation::new(config.converter_bin.clone())
        .args(["-f", "GeoJSON", "-t_srs", TARGET_SRS])
        .path_arg(&config.geojson)
        .path_arg(&config.shapefile)
}

/// Produces the GeoJSON unless the cache policy says the existing one is good.
pub async fn convert(config: &Config) -> Result<Conversion> {
    let freshness = cache::check(config.cache_policy, &config.shapefile, &config.geojson)
        .map_err(PipelineError::Cache)?;

    match &freshness {
        Freshness::Fresh => {
            println!("{}", ALREADY_MADE_NOTICE);
            return Ok(Conversion::Skipped);
        }
        Freshness::Missing => info!("{} not found, converting", config.geojson.display()),
        Freshness::Stale(reason) => info!("{} is stale: {}", config.geojson.display(), reason),
    }

    if config.dry_run {
        if let Freshness::Stale(_) = freshness {
            println!("would remove: {}", config.geojson.display());
        }
        match config.converter {
            ConverterBackend::Ogr2ogr => println!("would run: {}", converter_invocation(config)),
            ConverterBackend::Native => println!(
                "would convert natively: {} -> {}",
                config.shapefile.display(),
                config.geojson.display()
            ),
        }
        return Ok(Conversion::DryRun);
    }

    // ogr2ogr will not overwrite an existing GeoJSON
    if let Freshness::Stale(_) = freshness {
        fs_err::remove_file(&config.geojson)?;
    }

    let converted = match config.converter {
        ConverterBackend::Ogr2ogr => converter_invocation(config).run().await,
        ConverterBackend::Native => convert_natively(config).await,
    };
    if let Err(err) = converted {
        // a partial file would look fresh to the next run
        if config.geojson.exists() {
            warn!("removing partial output {}", config.geojson.display());
            fs_err::remove_file(&config.geojson)?;
        }
        return Err(err);
    }

    cache::record(config.cache_policy, &config.shapefile, &config.geojson)
        .map_err(PipelineError::Cache)?;
    Ok(Conversion::Converted)
}

async fn convert_natively(config: &Config) -> Result<()> {
    warn!(
        "native conversion does not reproject; output keeps the source CRS instead of {}",
        TARGET_SRS
    );
    let input = path_str(&config.shapefile)?;
    let output = path_str(&config.geojson)?;
    info!("converting {} to {}", input, output);
    convert_shapefile_to_geojson(input, output)
        .await
        .map_err(|e| PipelineError::Convert(e.to_string()))
}

fn path_str(path: &std::path::Path) -> Result<&str> {
    path.to_str().ok_or_else(|| {
        PipelineError::Config(format!("path is not valid UTF-8: {}", path.display()))
    })
}
