use ldquery_model::CqlError;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// A position of a GeoJSON geometry. Only the first two ordinates are used.
pub type Position = Vec<f64>;

/// A GeoJSON geometry as it appears in CQL2-JSON spatial predicates.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// Reads either a GeoJSON geometry or a `{"bbox": [...]}` object.
    pub fn from_json(value: &Value) -> Result<Self, CqlError> {
        if let Some(bbox) = value.get("bbox") {
            let values = bbox
                .as_array()
                .ok_or_else(|| CqlError::InvalidGeometry(format!("invalid bbox {bbox}")))?
                .iter()
                .map(|value| {
                    value
                        .as_f64()
                        .ok_or_else(|| CqlError::InvalidGeometry(format!("invalid bbox {bbox}")))
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Self::from_bbox(&values);
        }
        let geometry = Geometry::deserialize(value)
            .map_err(|error| CqlError::InvalidGeometry(error.to_string()))?;
        geometry.validate()?;
        Ok(geometry)
    }

    /// Creates the polygon covering a `[min x, min y, max x, max y]` bounding box.
    pub fn from_bbox(values: &[f64]) -> Result<Self, CqlError> {
        match values {
            [x0, y0, x1, y1] => Ok(Geometry::Polygon(vec![vec![
                vec![*x0, *y0],
                vec![*x0, *y1],
                vec![*x1, *y1],
                vec![*x1, *y0],
                vec![*x0, *y0],
            ]])),
            [_, _, _, _, _, _] => Err(CqlError::Unsupported(
                "bounding boxes with six values (XYZ)".to_owned(),
            )),
            _ => Err(CqlError::InvalidGeometry(format!(
                "a bounding box needs four values but got {}",
                values.len()
            ))),
        }
    }

    fn positions(&self) -> Vec<&Position> {
        match self {
            Geometry::Point(position) => vec![position],
            Geometry::MultiPoint(positions) | Geometry::LineString(positions) => {
                positions.iter().collect()
            }
            Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
                lines.iter().flatten().collect()
            }
            Geometry::MultiPolygon(polygons) => polygons.iter().flatten().flatten().collect(),
        }
    }

    fn validate(&self) -> Result<(), CqlError> {
        for position in self.positions() {
            if !(2..=3).contains(&position.len()) {
                return Err(CqlError::InvalidGeometry(format!(
                    "a position needs two or three ordinates but got {}",
                    position.len()
                )));
            }
            if position.iter().any(|ordinate| !ordinate.is_finite()) {
                return Err(CqlError::InvalidGeometry(
                    "ordinates must be finite numbers".to_owned(),
                ));
            }
        }
        match self {
            Geometry::Polygon(rings) if rings.iter().any(|ring| ring.len() < 4) => Err(
                CqlError::InvalidGeometry("a polygon ring needs at least four positions".to_owned()),
            ),
            _ => Ok(()),
        }
    }

    /// Renders the geometry as well-known text.
    pub fn to_wkt(&self) -> String {
        self.to_string()
    }
}

impl Display for Geometry {
    /// Writes the well-known text of the geometry.
    ///
    /// All ordinates are written with the same number of decimal places, namely the largest number
    /// of decimal places of any ordinate.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let precision = self
            .positions()
            .into_iter()
            .flat_map(|position| position.iter().take(2))
            .map(|ordinate| decimal_places(*ordinate))
            .max()
            .unwrap_or(0);
        let writer = WktWriter { precision };
        match self {
            Geometry::Point(position) => {
                f.write_str("POINT (")?;
                writer.position(f, position)?;
                f.write_str(")")
            }
            Geometry::MultiPoint(positions) => {
                f.write_str("MULTIPOINT (")?;
                for (i, position) in positions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str("(")?;
                    writer.position(f, position)?;
                    f.write_str(")")?;
                }
                f.write_str(")")
            }
            Geometry::LineString(positions) => {
                f.write_str("LINESTRING ")?;
                writer.line(f, positions)
            }
            Geometry::MultiLineString(lines) => {
                f.write_str("MULTILINESTRING ")?;
                writer.lines(f, lines)
            }
            Geometry::Polygon(rings) => {
                f.write_str("POLYGON ")?;
                writer.lines(f, rings)
            }
            Geometry::MultiPolygon(polygons) => {
                f.write_str("MULTIPOLYGON (")?;
                for (i, rings) in polygons.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    writer.lines(f, rings)?;
                }
                f.write_str(")")
            }
        }
    }
}

struct WktWriter {
    precision: usize,
}

impl WktWriter {
    fn position(&self, f: &mut Formatter<'_>, position: &Position) -> std::fmt::Result {
        for (i, ordinate) in position.iter().take(2).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{ordinate:.precision$}", precision = self.precision)?;
        }
        Ok(())
    }

    fn line(&self, f: &mut Formatter<'_>, positions: &[Position]) -> std::fmt::Result {
        f.write_str("(")?;
        for (i, position) in positions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            self.position(f, position)?;
        }
        f.write_str(")")
    }

    fn lines(&self, f: &mut Formatter<'_>, lines: &[Vec<Position>]) -> std::fmt::Result {
        f.write_str("(")?;
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            self.line(f, line)?;
        }
        f.write_str(")")
    }
}

fn decimal_places(value: f64) -> usize {
    let text = value.to_string();
    text.split_once('.')
        .map_or(0, |(_, decimals)| decimals.len())
}
