//! Fit decision: does an item's length and height stay within a location's extent.
//!
//! Only length and height are compared. Item width is never checked against a
//! location; locations are treated as deep enough.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::extent::{compute_extent_with, Corners, Extent, GeomCfg, GeometryError};

/// The two item dimensions a fit decision reads.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemDims {
    pub length: f64,
    pub height: f64,
}

/// Dimension that made an item too large.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Length,
    Height,
}

impl Dimension {
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Length => "length",
            Dimension::Height => "height",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a fit check. A rejection is a result, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitDecision {
    Accepted,
    Rejected { failing: Dimension },
}

impl FitDecision {
    #[inline]
    pub fn is_accepted(self) -> bool {
        matches!(self, FitDecision::Accepted)
    }

    #[inline]
    pub fn failing(self) -> Option<Dimension> {
        match self {
            FitDecision::Accepted => None,
            FitDecision::Rejected { failing } => Some(failing),
        }
    }
}

/// Wire shape of a decision:
/// `{"accepted": true}` or `{"accepted": false, "failingDimension": "length"}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitReport {
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failing_dimension: Option<Dimension>,
}

impl From<FitDecision> for FitReport {
    fn from(d: FitDecision) -> Self {
        Self {
            accepted: d.is_accepted(),
            failing_dimension: d.failing(),
        }
    }
}

/// Admit `item` iff `length <= extent.length` and `height <= extent.height`.
///
/// Length is checked first, so an item too large in both reports `Length`.
/// Comparisons are written negated so a NaN dimension is rejected, not admitted.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn validate_fit(item: ItemDims, extent: Extent) -> FitDecision {
    if !(item.length <= extent.length) {
        FitDecision::Rejected {
            failing: Dimension::Length,
        }
    } else if !(item.height <= extent.height) {
        FitDecision::Rejected {
            failing: Dimension::Height,
        }
    } else {
        FitDecision::Accepted
    }
}

/// Compute the location's extent from its corners and decide the fit.
#[inline]
pub fn evaluate_item_fit(dims: ItemDims, corners: &Corners) -> Result<FitDecision, GeometryError> {
    evaluate_item_fit_with(dims, corners, GeomCfg::default())
}

pub fn evaluate_item_fit_with(
    dims: ItemDims,
    corners: &Corners,
    cfg: GeomCfg,
) -> Result<FitDecision, GeometryError> {
    let extent = compute_extent_with(corners, cfg)?;
    Ok(validate_fit(dims, extent))
}
