//! Geometry types produced by the WKT parser.

use locations_common::BoundingBox;

/// Coordinate dimensionality declared by (or inferred from) the WKT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Xy,
    Xyz,
    Xym,
    Xyzm,
}

impl Dimension {
    /// Number of ordinates per coordinate.
    pub fn width(&self) -> usize {
        match self {
            Dimension::Xy => 2,
            Dimension::Xyz | Dimension::Xym => 3,
            Dimension::Xyzm => 4,
        }
    }

    pub fn has_z(&self) -> bool {
        matches!(self, Dimension::Xyz | Dimension::Xyzm)
    }
}

/// A single position. `x` is longitude and `y` latitude for geographic data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub m: Option<f64>,
}

impl Coord {
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.z.map_or(true, f64::is_finite)
            && self.m.map_or(true, f64::is_finite)
    }

    /// Planar equality, ignoring Z and M.
    pub fn same_xy(&self, other: &Coord) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Simple feature geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// `None` for `POINT EMPTY`.
    Point(Option<Coord>),
    LineString(Vec<Coord>),
    /// Exterior ring first, then holes.
    Polygon(Vec<Vec<Coord>>),
    MultiPoint(Vec<Coord>),
    MultiLineString(Vec<Vec<Coord>>),
    MultiPolygon(Vec<Vec<Vec<Coord>>>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    /// Upper case WKT keyword of the geometry type.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "POINT",
            Geometry::LineString(_) => "LINESTRING",
            Geometry::Polygon(_) => "POLYGON",
            Geometry::MultiPoint(_) => "MULTIPOINT",
            Geometry::MultiLineString(_) => "MULTILINESTRING",
            Geometry::MultiPolygon(_) => "MULTIPOLYGON",
            Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        }
    }

    /// All coordinates of the geometry, in document order.
    pub fn coords(&self) -> Vec<&Coord> {
        let mut out = Vec::new();
        self.collect_coords(&mut out);
        out
    }

    fn collect_coords<'a>(&'a self, out: &mut Vec<&'a Coord>) {
        match self {
            Geometry::Point(p) => out.extend(p.iter()),
            Geometry::LineString(line) | Geometry::MultiPoint(line) => out.extend(line.iter()),
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => {
                out.extend(rings.iter().flatten())
            }
            Geometry::MultiPolygon(polygons) => {
                out.extend(polygons.iter().flatten().flatten())
            }
            Geometry::GeometryCollection(members) => {
                for member in members {
                    member.collect_coords(out);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.coords().is_empty()
    }

    /// Any coordinate carries a Z ordinate.
    pub fn has_z(&self) -> bool {
        self.coords().iter().any(|c| c.z.is_some())
    }

    /// Planar bounding box, `None` when the geometry is empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.coords().into_iter().map(|c| (c.x, c.y)))
    }
}
