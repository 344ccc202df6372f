//! WKT parsing.
//!
//! Accepts the seven simple feature types with optional `Z`, `M` or `ZM`
//! tags (written separately, `POINT Z (...)`, or joined, `POINTZ(...)`) and
//! `EMPTY` bodies. Untagged coordinates with three ordinates are read as
//! XYZ, four as XYZM. Keywords are case-insensitive.

use std::fmt;

use crate::errors::GeometryError;
use crate::geometry::{Coord, Dimension, Geometry};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Number(f64),
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "'{}'", w),
            Token::Number(n) => write!(f, "{}", n),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

const KEYWORDS: [(&str, Kind); 7] = [
    ("POINT", Kind::Point),
    ("LINESTRING", Kind::LineString),
    ("POLYGON", Kind::Polygon),
    ("MULTIPOINT", Kind::MultiPoint),
    ("MULTILINESTRING", Kind::MultiLineString),
    ("MULTIPOLYGON", Kind::MultiPolygon),
    ("GEOMETRYCOLLECTION", Kind::GeometryCollection),
];

fn dimension_tag(tag: &str) -> Option<Dimension> {
    match tag {
        "Z" => Some(Dimension::Xyz),
        "M" => Some(Dimension::Xym),
        "ZM" => Some(Dimension::Xyzm),
        _ => None,
    }
}

/// Split a keyword such as `POINTZ` into its type and joined dimension tag.
fn split_keyword(word: &str) -> Result<(Kind, Option<Dimension>), GeometryError> {
    for (name, kind) in KEYWORDS {
        if let Some(rest) = word.strip_prefix(name) {
            if rest.is_empty() {
                return Ok((kind, None));
            }
            if let Some(dim) = dimension_tag(rest) {
                return Ok((kind, Some(dim)));
            }
        }
    }
    Err(GeometryError::UnsupportedType(word.to_string()))
}

fn tokenize(input: &str) -> Result<Vec<Token>, GeometryError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            c if c.is_ascii_alphabetic() => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if !c.is_ascii_alphabetic() {
                        break;
                    }
                    word.push(c.to_ascii_uppercase());
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
            c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                let mut text = String::new();
                while let Some(&c) = chars.peek() {
                    if !(c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')) {
                        break;
                    }
                    text.push(c);
                    chars.next();
                }
                let value: f64 = text
                    .parse()
                    .map_err(|_| GeometryError::InvalidCoordinate(text.clone()))?;
                tokens.push(Token::Number(value));
            }
            other => {
                return Err(GeometryError::InvalidWkt(format!(
                    "Unexpected character '{}'",
                    other
                )))
            }
        }
    }

    Ok(tokens)
}

/// Deepest GEOMETRYCOLLECTION nesting accepted.
pub const MAX_NESTING: usize = 32;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, GeometryError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(GeometryError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn peek_word(&self, word: &str) -> bool {
        matches!(self.peek(), Some(Token::Word(w)) if w == word)
    }

    fn expect_lparen(&mut self) -> Result<(), GeometryError> {
        match self.next()? {
            Token::LParen => Ok(()),
            other => Err(GeometryError::InvalidWkt(format!(
                "Expected '(', found {}",
                other
            ))),
        }
    }

    /// Parse `( item, item, ... )`.
    fn delimited<T>(
        &mut self,
        mut item: impl FnMut(&mut Parser) -> Result<T, GeometryError>,
    ) -> Result<Vec<T>, GeometryError> {
        self.expect_lparen()?;
        let mut items = vec![item(self)?];
        loop {
            match self.next()? {
                Token::Comma => items.push(item(self)?),
                Token::RParen => return Ok(items),
                other => {
                    return Err(GeometryError::InvalidWkt(format!(
                        "Expected ',' or ')', found {}",
                        other
                    )))
                }
            }
        }
    }

    fn coord(&mut self, dim: Option<Dimension>) -> Result<Coord, GeometryError> {
        let mut values = Vec::with_capacity(4);
        while let Some(Token::Number(n)) = self.peek() {
            values.push(*n);
            self.pos += 1;
        }

        let dim = match (dim, values.len()) {
            (Some(d), n) if d.width() == n => d,
            (None, 2) => Dimension::Xy,
            (None, 3) => Dimension::Xyz,
            (None, 4) => Dimension::Xyzm,
            (_, 0) => {
                return match self.peek() {
                    Some(t) => Err(GeometryError::InvalidWkt(format!(
                        "Expected coordinate, found {}",
                        t
                    ))),
                    None => Err(GeometryError::UnexpectedEnd),
                }
            }
            (_, n) => {
                return Err(GeometryError::InvalidWkt(format!(
                    "Coordinate has {} ordinates, expected {}",
                    n,
                    dim.map_or_else(|| "2 to 4".to_string(), |d| d.width().to_string())
                )))
            }
        };

        let mut coord = Coord::xy(values[0], values[1]);
        match dim {
            Dimension::Xy => {}
            Dimension::Xyz => coord.z = Some(values[2]),
            Dimension::Xym => coord.m = Some(values[2]),
            Dimension::Xyzm => {
                coord.z = Some(values[2]);
                coord.m = Some(values[3]);
            }
        }
        Ok(coord)
    }

    fn coord_seq(&mut self, dim: Option<Dimension>) -> Result<Vec<Coord>, GeometryError> {
        self.delimited(|p| p.coord(dim))
    }

    fn ring_seq(&mut self, dim: Option<Dimension>) -> Result<Vec<Vec<Coord>>, GeometryError> {
        self.delimited(|p| p.coord_seq(dim))
    }

    /// MULTIPOINT members may be written bare or wrapped: `(1 2, 3 4)` or `((1 2), (3 4))`.
    fn multipoint_member(&mut self, dim: Option<Dimension>) -> Result<Coord, GeometryError> {
        if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            let coord = self.coord(dim)?;
            match self.next()? {
                Token::RParen => Ok(coord),
                other => Err(GeometryError::InvalidWkt(format!(
                    "Expected ')', found {}",
                    other
                ))),
            }
        } else {
            self.coord(dim)
        }
    }

    fn geometry(&mut self) -> Result<Geometry, GeometryError> {
        let word = match self.next()? {
            Token::Word(w) => w,
            other => {
                return Err(GeometryError::InvalidWkt(format!(
                    "Expected geometry type, found {}",
                    other
                )))
            }
        };

        let (kind, mut dim) = split_keyword(&word)?;
        if dim.is_none() {
            if let Some(Token::Word(tag)) = self.peek() {
                if let Some(d) = dimension_tag(tag) {
                    dim = Some(d);
                    self.pos += 1;
                }
            }
        }

        if self.peek_word("EMPTY") {
            self.pos += 1;
            return Ok(empty(kind));
        }

        let geometry = match kind {
            Kind::Point => {
                let mut coords = self.coord_seq(dim)?;
                if coords.len() != 1 {
                    return Err(GeometryError::InvalidWkt(format!(
                        "POINT must have exactly one coordinate, got {}",
                        coords.len()
                    )));
                }
                Geometry::Point(coords.pop())
            }
            Kind::LineString => Geometry::LineString(self.coord_seq(dim)?),
            Kind::Polygon => Geometry::Polygon(self.ring_seq(dim)?),
            Kind::MultiPoint => {
                Geometry::MultiPoint(self.delimited(|p| p.multipoint_member(dim))?)
            }
            Kind::MultiLineString => Geometry::MultiLineString(self.ring_seq(dim)?),
            Kind::MultiPolygon => {
                Geometry::MultiPolygon(self.delimited(|p| p.ring_seq(dim))?)
            }
            Kind::GeometryCollection => {
                if self.depth >= MAX_NESTING {
                    return Err(GeometryError::InvalidWkt(
                        "geometry nesting too deep".to_string(),
                    ));
                }
                self.depth += 1;
                let members = self.delimited(|p| p.geometry());
                self.depth -= 1;
                Geometry::GeometryCollection(members?)
            }
        };

        Ok(geometry)
    }
}

fn empty(kind: Kind) -> Geometry {
    match kind {
        Kind::Point => Geometry::Point(None),
        Kind::LineString => Geometry::LineString(Vec::new()),
        Kind::Polygon => Geometry::Polygon(Vec::new()),
        Kind::MultiPoint => Geometry::MultiPoint(Vec::new()),
        Kind::MultiLineString => Geometry::MultiLineString(Vec::new()),
        Kind::MultiPolygon => Geometry::MultiPolygon(Vec::new()),
        Kind::GeometryCollection => Geometry::GeometryCollection(Vec::new()),
    }
}

/// Parse a WKT string into a [`Geometry`].
pub fn parse_wkt(wkt: &str) -> Result<Geometry, GeometryError> {
    let tokens = tokenize(wkt.trim())?;
    if tokens.is_empty() {
        return Err(GeometryError::InvalidWkt("Empty input".to_string()));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let geometry = parser.geometry()?;

    if let Some(extra) = parser.peek() {
        return Err(GeometryError::InvalidWkt(format!(
            "Unexpected trailing content starting at {}",
            extra
        )));
    }

    Ok(geometry)
}
