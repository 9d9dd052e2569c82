use std::collections::BTreeMap;
use std::fmt;
use std::io::BufReader;
use std::path::Path;

use anyhow::Result;
use fs_err::File;
use geo::{coord, BoundingRect, Coord, MultiPoint, Point, Rect};
use geojson::{GeoJson, Geometry, Value};

/// Feature count, geometry tally and extent of a GeoJSON file.
#[derive(Debug, Default)]
pub struct Summary {
    pub features: usize,
    pub geometry_types: BTreeMap<&'static str, usize>,
    pub bbox: Option<Rect<f64>>,
}

pub fn read_summary(path: &Path) -> Result<Summary> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let gj: GeoJson = serde_json::from_reader(reader)?;
    Ok(summarize(&gj))
}

pub fn summarize(gj: &GeoJson) -> Summary {
    let mut summary = Summary::default();
    let mut coords = Vec::new();

    let mut add = |geometry: Option<&Geometry>, summary: &mut Summary| {
        summary.features += 1;
        let name = match geometry {
            Some(geom) => {
                collect_coords(&geom.value, &mut coords);
                type_name(&geom.value)
            }
            None => "None",
        };
        *summary.geometry_types.entry(name).or_insert(0) += 1;
    };

    match gj {
        GeoJson::FeatureCollection(collection) => {
            for feature in &collection.features {
                add(feature.geometry.as_ref(), &mut summary);
            }
        }
        GeoJson::Feature(feature) => add(feature.geometry.as_ref(), &mut summary),
        GeoJson::Geometry(geom) => add(Some(geom), &mut summary),
    }

    let points: Vec<Point<f64>> = coords.into_iter().map(Point::from).collect();
    summary.bbox = MultiPoint::new(points).bounding_rect();
    summary
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn collect_coords(value: &Value, out: &mut Vec<Coord<f64>>) {
    if let Value::GeometryCollection(geometries) = value {
        for geom in geometries {
            collect_coords(&geom.value, out);
        }
        return;
    }
    let mut push = |c: &Vec<f64>| {
        if c.len() >= 2 {
            out.push(coord! { x: c[0], y: c[1] });
        }
    };
    match value {
        Value::Point(c) => push(c),
        Value::MultiPoint(cs) | Value::LineString(cs) => cs.iter().for_each(push),
        Value::MultiLineString(rings) | Value::Polygon(rings) => {
            rings.iter().flatten().for_each(push)
        }
        Value::MultiPolygon(polygons) => polygons.iter().flatten().flatten().for_each(push),
        Value::GeometryCollection(_) => {}
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} features", self.features)?;
        if !self.geometry_types.is_empty() {
            let tally: Vec<String> = self
                .geometry_types
                .iter()
                .map(|(name, count)| format!("{} {}", count, name))
                .collect();
            write!(f, " ({})", tally.join(", "))?;
        }
        match self.bbox {
            Some(rect) => write!(
                f,
                ", bbox [{:.6}, {:.6}, {:.6}, {:.6}]",
                rect.min().x,
                rect.min().y,
                rect.max().x,
                rect.max().y
            ),
            None => write!(f, ", no coordinates"),
        }
    }
}
