//! Output encoding for merged streets.
//!
//! Each record is one line: the geometry in the configured encoding,
//! optional extended columns (midpoint, geodesic length, bounding box)
//! and the canonical name, joined by the configured delimiter.

use std::io::Write;

use geojson::{Feature, Geometry, Value as GeoJsonValue};
use serde_json::json;
use wkt::ToWkt;

use crate::model::Street;
use crate::{ClusterMap, Error};

/// Geometry encoding for emitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Google polyline, precision 1e-6.
    Polyline,
    /// `LINESTRING(lon lat,…)`.
    Wkt,
    /// RFC 7946 `Feature` with a `LineString` geometry.
    GeoJson,
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: GeometryFormat,
    pub delimiter: String,
    pub extended: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: GeometryFormat::Polyline,
            delimiter: "\0".to_string(),
            extended: false,
        }
    }
}

/// Writes every cluster in ascending key order, fragments in arrival
/// order within a key.
pub fn write_streets<W: Write>(
    clusters: &ClusterMap,
    config: &OutputConfig,
    out: &mut W,
) -> Result<(), Error> {
    for streets in clusters.values() {
        for street in streets {
            let record = render_street(street, config)?;
            writeln!(out, "{record}")?;
        }
    }
    Ok(())
}

/// Renders one street as a delimited record.
pub fn render_street(street: &Street, config: &OutputConfig) -> Result<String, Error> {
    let mut columns = Vec::new();

    let geometry = match config.format {
        GeometryFormat::Polyline => {
            polyline::encode_coordinates(street.path.coords().iter().copied(), 6)
                .map_err(|e| Error::EncodeError(e.to_string()))?
        }
        GeometryFormat::Wkt => street.path.line_string().wkt_string(),
        GeometryFormat::GeoJson => geojson_feature(street)?,
    };
    columns.push(geometry);

    if config.extended {
        let midpoint = street.path.interpolate(0.5);
        columns.push(format!("{:.7}", midpoint.x));
        columns.push(format!("{:.7}", midpoint.y));

        columns.push(format!("{:.0}", street.path.length()));

        let (sw, ne) = street.path.bounds();
        columns.push(format!("{:.7}", sw.x));
        columns.push(format!("{:.7}", sw.y));
        columns.push(format!("{:.7}", ne.x));
        columns.push(format!("{:.7}", ne.y));
    }

    columns.push(street.name.clone());
    Ok(columns.join(&config.delimiter))
}

fn geojson_feature(street: &Street) -> Result<String, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(street.path.line_string()));
    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {},
    });

    let feature =
        Feature::from_json_value(value).map_err(|e| Error::EncodeError(e.to_string()))?;
    serde_json::to_string(&feature).map_err(|e| Error::EncodeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Oneway, Path};
    use geo::Coord;

    fn street(points: &[(f64, f64)]) -> Street {
        Street {
            path: Path::new(points.iter().map(|&(x, y)| Coord { x, y }).collect()),
            name: "Lê Lợi".to_string(),
            oneway: Oneway::No,
            way_id: 1,
        }
    }

    #[test]
    fn polyline_record_ends_with_the_name() {
        let config = OutputConfig::default();
        let record = render_street(&street(&[(108.2, 16.05), (108.3, 16.06)]), &config).unwrap();

        let fields: Vec<&str> = record.split('\0').collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1], "Lê Lợi");

        let decoded = polyline::decode_polyline(fields[0], 6).unwrap();
        assert_eq!(decoded.0.len(), 2);
        assert!((decoded.0[0].x - 108.2).abs() < 1e-6);
        assert!((decoded.0[0].y - 16.05).abs() < 1e-6);
    }

    #[test]
    fn wkt_record_uses_lon_lat_order() {
        let config = OutputConfig {
            format: GeometryFormat::Wkt,
            delimiter: "|".to_string(),
            extended: false,
        };
        let record = render_street(&street(&[(108.2, 16.05), (108.3, 16.06)]), &config).unwrap();

        let fields: Vec<&str> = record.split('|').collect();
        assert!(fields[0].starts_with("LINESTRING"));
        assert!(fields[0].contains("108.2 16.05"));
    }

    #[test]
    fn geojson_record_is_a_feature_with_empty_properties() {
        let config = OutputConfig {
            format: GeometryFormat::GeoJson,
            delimiter: "\t".to_string(),
            extended: false,
        };
        let record = render_street(&street(&[(108.2, 16.05), (108.3, 16.06)]), &config).unwrap();

        let geometry_field = record.split('\t').next().unwrap();
        let value: serde_json::Value = serde_json::from_str(geometry_field).unwrap();
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "LineString");
        assert_eq!(value["geometry"]["coordinates"][0][0], 108.2);
        assert_eq!(
            value["properties"],
            serde_json::Value::Object(serde_json::Map::new())
        );
    }

    #[test]
    fn extended_columns_carry_midpoint_length_and_bounds() {
        let config = OutputConfig {
            format: GeometryFormat::Polyline,
            delimiter: "|".to_string(),
            extended: true,
        };
        let record = render_street(&street(&[(108.2, 16.05), (108.3, 16.06)]), &config).unwrap();

        let fields: Vec<&str> = record.split('|').collect();
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[1], "108.2500000");
        assert_eq!(fields[2], "16.0550000");
        // Roughly 10.7 km of street, formatted without decimals.
        let length: f64 = fields[3].parse().unwrap();
        assert!((10_000.0..12_000.0).contains(&length), "{length}");
        assert_eq!(fields[4], "108.2000000");
        assert_eq!(fields[5], "16.0500000");
        assert_eq!(fields[6], "108.3000000");
        assert_eq!(fields[7], "16.0600000");
        assert_eq!(fields[8], "Lê Lợi");
    }

    #[test]
    fn clusters_are_written_in_key_order() {
        let named = |name: &str| {
            let mut s = street(&[(0.0, 0.0), (1.0, 0.0)]);
            s.name = name.to_string();
            s
        };

        let mut clusters = ClusterMap::new();
        clusters.insert("Tran Phu".to_string(), vec![named("Tran Phu")]);
        clusters.insert("An Thuong".to_string(), vec![named("An Thuong")]);

        let mut buffer = Vec::new();
        write_streets(&clusters, &OutputConfig::default(), &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("An Thuong"));
        assert!(lines[1].ends_with("Tran Phu"));
    }
}
