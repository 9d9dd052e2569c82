use log::{error, info, warn};

use crate::config::Config;
use crate::convert::{self, Conversion};
use crate::error::Result;
use crate::summary;
use crate::tile;

/// What a pipeline run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// `None` when conversion failed and the run kept going.
    pub conversion: Option<Conversion>,
    /// False under dry run, where the tiler is only printed.
    pub tiled: bool,
}

/// Converts the shapefile if needed, then tiles the GeoJSON.
pub async fn run(config: &Config) -> Result<Outcome> {
    config.validate()?;

    let conversion = match convert::convert(config).await {
        Ok(conversion) => Some(conversion),
        Err(err) if config.keep_going => {
            error!("{}; tiling anyway", err);
            None
        }
        Err(err) => return Err(err),
    };

    if config.summary && !config.dry_run {
        report_summary(config);
    }

    tile::tile(config).await?;
    if !config.dry_run {
        info!("wrote {}", config.mbtiles.display());
    }

    Ok(Outcome {
        conversion,
        tiled: !config.dry_run,
    })
}

fn report_summary(config: &Config) {
    match summary::read_summary(&config.geojson) {
        Ok(summary) => println!("{}: {}", config.geojson.display(), summary),
        Err(err) => warn!(
            "could not summarize {}: {:#}",
            config.geojson.display(),
            err
        ),
    }
}

/// Exit code for a finished run, as a shell would report it.
pub fn exit_code(result: &Result<Outcome>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(err) => err.exit_code(),
    }
}
