use super::types::{Corners, Extent, GeomCfg, GeometryError};

/// Index pair `(i, j)` with `i < j` into `Corners`.
type Pair = (usize, usize);

/// Extent of `corners` with exact coordinate comparison.
#[inline]
pub fn compute_extent(corners: &Corners) -> Result<Extent, GeometryError> {
    compute_extent_with(corners, GeomCfg::default())
}

/// Extent of `corners` under the tolerances in `cfg`.
///
/// Pre: none; any input is accepted and classified.
/// Post: `Ok` only if the corners are exactly the four vertices of an
/// axis-aligned rectangle with non-zero length and height.
pub fn compute_extent_with(corners: &Corners, cfg: GeomCfg) -> Result<Extent, GeometryError> {
    if let Some(index) = corners
        .iter()
        .position(|c| !(c.x.is_finite() && c.y.is_finite()))
    {
        return Err(GeometryError::NonFinite { index });
    }

    let (vertical, horizontal) = edge_pairs(corners, cfg);
    let (va, vb) = vertical.ok_or(GeometryError::NoVerticalEdge)?;
    let (ha, hb) = horizontal.ok_or(GeometryError::NoHorizontalEdge)?;

    let xs = (corners[ha].x, corners[hb].x);
    let ys = (corners[va].y, corners[vb].y);
    if !covers_grid(corners, xs, ys, cfg) {
        return Err(GeometryError::NotRectangle);
    }

    let length = (xs.0 - xs.1).abs();
    let height = (ys.0 - ys.1).abs();
    // Finite corners can still be far enough apart to overflow.
    if !(length.is_finite() && height.is_finite()) {
        return Err(GeometryError::ExtentOverflow);
    }
    Ok(Extent { length, height })
}

/// First vertical pair (shared x, differing y) and first horizontal pair
/// (shared y, differing x), scanning pairs in lexicographic index order.
fn edge_pairs(corners: &Corners, cfg: GeomCfg) -> (Option<Pair>, Option<Pair>) {
    let mut vertical = None;
    let mut horizontal = None;
    for i in 0..corners.len() {
        for j in (i + 1)..corners.len() {
            let (p, q) = (corners[i], corners[j]);
            if vertical.is_none() && cfg.same(p.x, q.x) && !cfg.same(p.y, q.y) {
                vertical = Some((i, j));
            }
            if horizontal.is_none() && cfg.same(p.y, q.y) && !cfg.same(p.x, q.x) {
                horizontal = Some((i, j));
            }
        }
    }
    (vertical, horizontal)
}

/// Each vertex of `{xs.0, xs.1} × {ys.0, ys.1}` is matched by exactly one corner.
fn covers_grid(corners: &Corners, xs: (f64, f64), ys: (f64, f64), cfg: GeomCfg) -> bool {
    let grid = [(xs.0, ys.0), (xs.0, ys.1), (xs.1, ys.0), (xs.1, ys.1)];
    let mut taken = [false; 4];
    for p in corners {
        let slot = (0..grid.len())
            .find(|&k| !taken[k] && cfg.same(p.x, grid[k].0) && cfg.same(p.y, grid[k].1));
        match slot {
            Some(k) => taken[k] = true,
            None => return false,
        }
    }
    true
}
