//! Decides whether an existing GeoJSON output can be reused.
//!
//! The default policy only looks at whether the output exists, so a changed
//! shapefile is never picked up. The `mtime` and `checksum` policies compare
//! the output against every component of the source shapefile.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ValueEnum;
use fs_err::File;
use log::debug;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CachePolicy {
    /// Reuse the output whenever it exists
    #[default]
    Exists,
    /// Rebuild when a shapefile component is newer than the output
    Mtime,
    /// Rebuild when the shapefile checksum differs from the recorded one
    Checksum,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Missing,
    Stale(String),
}

impl Freshness {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Freshness::Fresh)
    }
}

/// Path of the checksum record kept next to the output.
pub fn sidecar_path(geojson: &Path) -> PathBuf {
    let mut name = geojson
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".sha256");
    geojson.with_file_name(name)
}

/// Every file sharing the shapefile's base name, sorted by file name.
///
/// `exclude` drops derived files that happen to share the base name.
pub fn shapefile_components(shapefile: &Path, exclude: &[&Path]) -> Result<Vec<PathBuf>> {
    let stem = match shapefile.file_stem() {
        Some(stem) => stem.to_string_lossy().into_owned(),
        None => return Ok(Vec::new()),
    };
    let dir = match shapefile.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let prefix = format!("{}.", stem);
    let excluded: Vec<OsString> = exclude
        .iter()
        .filter_map(|p| p.file_name().map(OsString::from))
        .collect();

    let mut components = Vec::new();
    for entry in fs_err::read_dir(&dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if excluded.contains(&name) {
            continue;
        }
        if name.to_string_lossy().starts_with(&prefix) && entry.file_type()?.is_file() {
            components.push(entry.path());
        }
    }
    components.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(components)
}

/// SHA-256 over the components, each prefixed by its file name.
pub fn digest_components(components: &[PathBuf]) -> Result<String> {
    let mut hasher = Sha256::new();
    for path in components {
        if let Some(name) = path.file_name() {
            hasher.update(name.to_string_lossy().as_bytes());
        }
        let mut file = File::open(path)?;
        io::copy(&mut file, &mut hasher)?;
    }
    Ok(hex::encode(hasher.finalize()))
}

pub fn check(policy: CachePolicy, shapefile: &Path, geojson: &Path) -> Result<Freshness> {
    if !geojson.exists() {
        return Ok(Freshness::Missing);
    }
    if policy == CachePolicy::Exists {
        return Ok(Freshness::Fresh);
    }

    let sidecar = sidecar_path(geojson);
    let components = shapefile_components(shapefile, &[geojson, sidecar.as_path()])?;
    if components.is_empty() {
        debug!(
            "no components found for {}, keeping existing output",
            shapefile.display()
        );
        return Ok(Freshness::Fresh);
    }

    match policy {
        CachePolicy::Exists => Ok(Freshness::Fresh),
        CachePolicy::Mtime => {
            let built = fs_err::metadata(geojson)?.modified()?;
            for path in &components {
                if fs_err::metadata(path)?.modified()? > built {
                    return Ok(Freshness::Stale(format!(
                        "{} is newer than {}",
                        path.display(),
                        geojson.display()
                    )));
                }
            }
            Ok(Freshness::Fresh)
        }
        CachePolicy::Checksum => {
            if !sidecar.exists() {
                return Ok(Freshness::Stale(format!(
                    "no checksum recorded at {}",
                    sidecar.display()
                )));
            }
            let recorded = fs_err::read_to_string(&sidecar)?;
            let current = digest_components(&components)?;
            if recorded.trim() == current {
                Ok(Freshness::Fresh)
            } else {
                Ok(Freshness::Stale("shapefile checksum changed".to_string()))
            }
        }
    }
}

/// Records whatever the policy needs after a successful conversion.
pub fn record(policy: CachePolicy, shapefile: &Path, geojson: &Path) -> Result<()> {
    if policy != CachePolicy::Checksum {
        return Ok(());
    }
    let sidecar = sidecar_path(geojson);
    let components = shapefile_components(shapefile, &[geojson, sidecar.as_path()])?;
    let digest = digest_components(&components)?;
    fs_err::write(&sidecar, format!("{}\n", digest))?;
    debug!("recorded checksum {} in {}", digest, sidecar.display());
    Ok(())
}
