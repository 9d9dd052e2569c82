use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SHAPEFILE: &str = "dams/dams00x020.shp";
pub const GEOJSON: &str = "dams/major_us_dams_2006.geojson";
pub const MBTILES: &str = "major_us_dams_2006.mbtiles";

/// A scratch working directory with stub `ogr2ogr` and `tippecanoe` on PATH.
///
/// Each stub appends its argv to `tools.log` and writes its output file.
pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
    pub bin: PathBuf,
    log: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().join("work");
        let bin = tmp.path().join("bin");
        let log = tmp.path().join("tools.log");
        fs::create_dir_all(root.join("dams")).expect("create dams dir");
        fs::create_dir_all(&bin).expect("create bin dir");

        write_stub(
            &bin.join("ogr2ogr"),
            &format!(
                r#"#!/bin/sh
echo "ogr2ogr $*" >> "{log}"
out="$5"
in="$6"
if [ ! -f "$in" ]; then
    echo "ogr2ogr: unable to open datasource $in" >&2
    exit 1
fi
printf '%s' '{{"type":"FeatureCollection","features":[{{"type":"Feature","properties":{{"DAM_NAME":"Hoover Dam"}},"geometry":{{"type":"Point","coordinates":[-114.737,36.016]}}}}]}}' > "$out"
"#,
                log = log.display()
            ),
        );
        write_stub(
            &bin.join("tippecanoe"),
            &format!(
                r#"#!/bin/sh
echo "tippecanoe $*" >> "{log}"
out="$2"
for last in "$@"; do :; done
if [ ! -f "$last" ]; then
    echo "tippecanoe: $last: No such file or directory" >&2
    exit 1
fi
echo "tiles from $last" > "$out"
"#,
                log = log.display()
            ),
        );

        Self {
            _tmp: tmp,
            root,
            bin,
            log,
        }
    }

    pub fn with_shapefile() -> Self {
        let env = Self::new();
        env.write_shapefile(b"shp-v1");
        env
    }

    pub fn write_shapefile(&self, contents: &[u8]) {
        fs::write(self.path(SHAPEFILE), contents).expect("write shp");
        fs::write(self.path("dams/dams00x020.dbf"), b"dbf").expect("write dbf");
        fs::write(self.path("dams/dams00x020.shx"), b"shx").expect("write shx");
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn cmd(&self) -> Command {
        let path = std::env::var("PATH").unwrap_or_default();
        let mut cmd = cargo_bin_cmd!("dam-tiles");
        cmd.current_dir(&self.root)
            .env("PATH", format!("{}:{}", self.bin.display(), path))
            .env_remove("RUST_LOG");
        cmd
    }

    /// Recorded tool invocations, one line per call.
    pub fn invocations(&self) -> Vec<String> {
        match fs::read_to_string(&self.log) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn calls_to(&self, tool: &str) -> usize {
        let prefix = format!("{} ", tool);
        self.invocations()
            .iter()
            .filter(|line| line.starts_with(&prefix))
            .count()
    }
}

fn write_stub(path: &Path, script: &str) {
    fs::write(path, script).expect("write stub");
    let mut perms = fs::metadata(path).expect("stub metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("make stub executable");
}
