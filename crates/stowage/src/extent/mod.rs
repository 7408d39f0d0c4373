//! Extent of an axis-aligned rectangular location.
//!
//! Purpose
//! - Derive the usable `(length, height)` of a location from its four corner
//!   points, given in no particular order.
//! - Reject anything that is not a genuine axis-aligned rectangle with a typed
//!   `GeometryError` instead of reading past a missing pair.
//!
//! Model
//! - Scan the 6 unordered corner pairs. The first pair sharing x (with
//!   differing y) is a vertical edge and gives the height; the first pair
//!   sharing y (with differing x) is a horizontal edge and gives the length.
//!   For a true rectangle either qualifying pair of each kind has the same
//!   magnitude, so "first found" is only a tie-break.
//! - After the scan, the corners must cover `{x_a, x_b} × {y_a, y_b}` exactly
//!   once each. Duplicate points and stray fourth points fail here.
//!
//! Code cross-refs: `crate::fit::validate_fit` consumes `Extent`.

mod scan;
mod types;

pub use scan::{compute_extent, compute_extent_with};
pub use types::{corners, Coord, Corners, Extent, GeomCfg, GeometryError};

#[cfg(test)]
mod tests;
