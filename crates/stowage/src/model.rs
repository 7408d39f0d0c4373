//! Locations, items, and the create payloads callers submit for them.
//!
//! Payload validation here is the outer tier: it rejects malformed input
//! (wrong coordinate count/shape, non-positive dimensions) before any fit
//! decision. Whether four well-formed coordinates actually make a rectangle is
//! left to `crate::extent`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extent::{self, compute_extent_with, Corners, Extent, GeomCfg, GeometryError};
use crate::fit::ItemDims;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub i64);
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored location: a named axis-aligned rectangle.
///
/// `coordinate` keeps the `[[x, y]; 4]` shape callers submit; corner order is
/// whatever the caller used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub coordinate: [[f64; 2]; 4],
}

impl Location {
    #[inline]
    pub fn corners(&self) -> Corners {
        extent::corners(self.coordinate)
    }

    /// Recomputed on every call.
    pub fn extent(&self, cfg: GeomCfg) -> Result<Extent, GeometryError> {
        compute_extent_with(&self.corners(), cfg)
    }
}

/// A stored item. `width` is carried but never compared against a location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub location_id: LocationId,
}

impl Item {
    #[inline]
    pub fn dims(&self) -> ItemDims {
        ItemDims {
            length: self.length,
            height: self.height,
        }
    }
}

/// Malformed caller input, rejected before the geometry core runs.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("coordinate needs to be exactly 4 points, got {found}")]
    CoordinateCount { found: usize },
    #[error("coordinate {index} needs exactly 2 numbers, got {found}")]
    CoordinateShape { index: usize, found: usize },
    #[error("coordinate {index} is not finite")]
    CoordinateNotFinite { index: usize },
    #[error("{field} must be a positive finite number, got {value}")]
    Dimension { field: &'static str, value: f64 },
}

/// Create payload for a location, as submitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub coordinate: Vec<Vec<f64>>,
}

/// A `NewLocation` whose shape has been checked.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationDraft {
    pub name: String,
    pub coordinate: [[f64; 2]; 4],
}

impl NewLocation {
    pub fn validate(&self) -> Result<LocationDraft, ValidationError> {
        let name = validate_name(&self.name, "name")?;
        let coordinate = coordinate_array(&self.coordinate)?;
        Ok(LocationDraft { name, coordinate })
    }
}

/// Check raw `[[x, y], ...]` input: exactly four pairs of finite numbers.
pub fn coordinate_array(raw: &[Vec<f64>]) -> Result<[[f64; 2]; 4], ValidationError> {
    if raw.len() != 4 {
        return Err(ValidationError::CoordinateCount { found: raw.len() });
    }
    let mut coordinate = [[0.0; 2]; 4];
    for (index, point) in raw.iter().enumerate() {
        let &[x, y] = point.as_slice() else {
            return Err(ValidationError::CoordinateShape {
                index,
                found: point.len(),
            });
        };
        if !(x.is_finite() && y.is_finite()) {
            return Err(ValidationError::CoordinateNotFinite { index });
        }
        coordinate[index] = [x, y];
    }
    Ok(coordinate)
}

/// Create payload for an item, as submitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl NewItem {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name, "name")?;
        validate_name(&self.kind, "type")?;
        for (field, value) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::Dimension { field, value });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn dims(&self) -> ItemDims {
        ItemDims {
            length: self.length,
            height: self.height,
        }
    }
}

/// Trimmed, non-empty.
pub(crate) fn validate_name(raw: &str, field: &'static str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(name.to_string())
}
