//! Geometric validity checks.
//!
//! A geometry is valid when it is non-empty, all its coordinates are finite,
//! line strings have two distinct points, and polygon rings are closed, have
//! at least three distinct points and do not intersect themselves. Every
//! vertex of a hole must lie inside or on its shell; crossings between rings
//! whose vertices all satisfy that, and interaction between separate polygons,
//! are not checked.

use crate::errors::InvalidGeometry;
use crate::geometry::{Coord, Geometry};

impl Geometry {
    /// Check the geometry, returning the first problem found.
    pub fn validate(&self) -> Result<(), InvalidGeometry> {
        if self.is_empty() {
            return Err(InvalidGeometry::Empty);
        }
        if self.coords().iter().any(|c| !c.is_finite()) {
            return Err(InvalidGeometry::NonFiniteCoordinate);
        }
        self.validate_parts()
    }

    fn validate_parts(&self) -> Result<(), InvalidGeometry> {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Ok(()),
            Geometry::LineString(line) => validate_line(line),
            Geometry::MultiLineString(lines) => lines.iter().try_for_each(|l| validate_line(l)),
            Geometry::Polygon(rings) => validate_polygon(rings),
            Geometry::MultiPolygon(polygons) => {
                polygons.iter().try_for_each(|p| validate_polygon(p))
            }
            Geometry::GeometryCollection(members) => members
                .iter()
                .filter(|m| !m.is_empty())
                .try_for_each(|m| m.validate_parts()),
        }
    }
}

/// Drop consecutive repeated points.
fn dedup(points: &[Coord]) -> Vec<Coord> {
    let mut out: Vec<Coord> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().map_or(true, |last| !last.same_xy(p)) {
            out.push(*p);
        }
    }
    out
}

fn validate_line(line: &[Coord]) -> Result<(), InvalidGeometry> {
    if dedup(line).len() < 2 {
        return Err(InvalidGeometry::TooFewPoints("linestring"));
    }
    Ok(())
}

fn validate_polygon(rings: &[Vec<Coord>]) -> Result<(), InvalidGeometry> {
    if rings.is_empty() {
        return Err(InvalidGeometry::Empty);
    }
    rings.iter().try_for_each(|r| validate_ring(r))?;

    let (shell, holes) = rings.split_at(1);
    for hole in holes {
        if let Some(p) = hole.iter().find(|p| !ring_covers(&shell[0], p)) {
            return Err(InvalidGeometry::HoleOutsideShell { x: p.x, y: p.y });
        }
    }
    Ok(())
}

/// `p` lies inside the closed ring or on its boundary.
fn ring_covers(ring: &[Coord], p: &Coord) -> bool {
    let mut inside = false;
    for w in ring.windows(2) {
        let (a, b) = (&w[0], &w[1]);
        if on_segment(p, a, b) {
            return true;
        }
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

fn validate_ring(ring: &[Coord]) -> Result<(), InvalidGeometry> {
    let (first, last) = match (ring.first(), ring.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(InvalidGeometry::TooFewPoints("ring")),
    };
    if !first.same_xy(last) {
        return Err(InvalidGeometry::RingNotClosed);
    }

    let points = dedup(ring);
    // Closed ring of a triangle: 3 distinct points plus the closing point.
    if points.len() < 4 {
        return Err(InvalidGeometry::TooFewPoints("ring"));
    }

    let segments: Vec<(Coord, Coord)> = points.windows(2).map(|w| (w[0], w[1])).collect();
    let n = segments.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = segments[i];
            let (c, d) = segments[j];
            let adjacent_forward = j == i + 1;
            let adjacent_wrap = i == 0 && j == n - 1;

            let touches = if adjacent_forward {
                // Shared point is b == c; the segments must not fold back.
                on_segment(&a, &c, &d) || on_segment(&d, &a, &b)
            } else if adjacent_wrap {
                // Shared point is a == d.
                on_segment(&b, &c, &d) || on_segment(&c, &a, &b)
            } else {
                segments_intersect(&a, &b, &c, &d)
            };

            if touches {
                return Err(InvalidGeometry::SelfIntersection { x: c.x, y: c.y });
            }
        }
    }

    Ok(())
}

/// Sign of the cross product of `(b - a)` and `(c - a)`.
fn orientation(a: &Coord, b: &Coord, c: &Coord) -> i8 {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    }
}

/// `p` lies on the closed segment `a`-`b`.
fn on_segment(p: &Coord, a: &Coord, b: &Coord) -> bool {
    orientation(a, b, p) == 0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

/// Closed segments `a`-`b` and `c`-`d` share at least one point.
fn segments_intersect(a: &Coord, b: &Coord, c: &Coord, d: &Coord) -> bool {
    let o1 = orientation(a, b, c);
    let o2 = orientation(a, b, d);
    let o3 = orientation(c, d, a);
    let o4 = orientation(c, d, b);

    if o1 != o2 && o3 != o4 && o1 != 0 && o2 != 0 && o3 != 0 && o4 != 0 {
        return true;
    }

    on_segment(c, a, b) || on_segment(d, a, b) || on_segment(a, c, d) || on_segment(b, c, d)
}
