//! Coordinates, extents and the comparison tolerance used by the pair scan.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One corner of a location boundary, `(x, y)`.
pub type Coord = Vector2<f64>;

/// The four corners of a location, unordered.
pub type Corners = [Coord; 4];

/// Build `Corners` from plain `[x, y]` pairs (the stored/JSON shape).
#[inline]
pub fn corners(points: [[f64; 2]; 4]) -> Corners {
    points.map(|[x, y]| Coord::new(x, y))
}

/// Geometry configuration (tolerances).
///
/// `eps_coord` is the largest difference at which two coordinate components
/// count as equal. The default `0.0` is exact equality.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    pub eps_coord: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { eps_coord: 0.0 }
    }
}

impl GeomCfg {
    #[inline]
    pub fn with_eps(eps_coord: f64) -> Self {
        Self {
            eps_coord: eps_coord.max(0.0),
        }
    }

    #[inline]
    pub(crate) fn same(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.eps_coord
    }
}

/// Usable interior dimensions of a rectangular location. Never stored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Span along x.
    pub length: f64,
    /// Span along y.
    pub height: f64,
}

/// The four corners do not describe an axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("corner {index} has a non-finite coordinate")]
    NonFinite { index: usize },
    #[error("no two corners share an x-value with differing y-values")]
    NoVerticalEdge,
    #[error("no two corners share a y-value with differing x-values")]
    NoHorizontalEdge,
    #[error("corners do not cover the four vertices of an axis-aligned rectangle")]
    NotRectangle,
    #[error("rectangle spans more than the f64 range")]
    ExtentOverflow,
}
