use super::*;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// All 24 orderings of four indices.
fn orderings() -> Vec<[usize; 4]> {
    let mut out = Vec::with_capacity(24);
    for a in 0..4 {
        for b in 0..4 {
            for c in 0..4 {
                for d in 0..4 {
                    let idx = [a, b, c, d];
                    let distinct = (0..4).all(|i| (i + 1..4).all(|j| idx[i] != idx[j]));
                    if distinct {
                        out.push(idx);
                    }
                }
            }
        }
    }
    out
}

fn reorder(c: &Corners, order: [usize; 4]) -> Corners {
    order.map(|k| c[k])
}

fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Corners {
    corners([[x1, y1], [x1, y2], [x2, y1], [x2, y2]])
}

#[test]
fn negative_quadrant_rectangle() {
    let c = corners([[-1.0, -1.0], [-5.0, -1.0], [-1.0, 2.0], [-5.0, 2.0]]);
    let e = compute_extent(&c).unwrap();
    assert_eq!(
        e,
        Extent {
            length: 4.0,
            height: 3.0
        }
    );
}

#[test]
fn perimeter_order_rectangle() {
    // Corners listed walking the boundary rather than grouped by x.
    let c = corners([[-1.0, 1.0], [5.0, 1.0], [5.0, 6.0], [-1.0, 6.0]]);
    let e = compute_extent(&c).unwrap();
    assert_eq!(e.length, 6.0);
    assert_eq!(e.height, 5.0);
}

#[test]
fn every_ordering_gives_same_extent() {
    let base = rect(2.0, -3.5, 7.25, 1.5);
    let orders = orderings();
    assert_eq!(orders.len(), 24);
    for order in orders {
        let e = compute_extent(&reorder(&base, order)).unwrap();
        assert_eq!(e.length, 5.25, "order {order:?}");
        assert_eq!(e.height, 5.0, "order {order:?}");
    }
}

#[test]
fn repeated_calls_agree() {
    let c = rect(0.0, 0.0, 3.0, 4.0);
    let first = compute_extent(&c).unwrap();
    let second = compute_extent(&c).unwrap();
    let shuffled = compute_extent(&reorder(&c, [3, 1, 0, 2])).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, shuffled);
}

#[test]
fn identical_corners_are_rejected() {
    let c = corners([[1.0, 1.0]; 4]);
    assert_eq!(compute_extent(&c), Err(GeometryError::NoVerticalEdge));
}

#[test]
fn no_shared_x_is_rejected() {
    let c = corners([[0.0, 0.0], [1.0, 2.0], [2.0, 5.0], [3.0, 0.0]]);
    assert_eq!(compute_extent(&c), Err(GeometryError::NoVerticalEdge));
}

#[test]
fn vertical_line_has_no_horizontal_edge() {
    // All four share x: plenty of vertical pairs, no horizontal one.
    let c = corners([[2.0, 0.0], [2.0, 1.0], [2.0, 2.0], [2.0, 3.0]]);
    assert_eq!(compute_extent(&c), Err(GeometryError::NoHorizontalEdge));
}

#[test]
fn duplicated_corner_is_rejected() {
    // Three distinct vertices of a rectangle, one repeated.
    let c = corners([[0.0, 0.0], [0.0, 2.0], [3.0, 0.0], [0.0, 2.0]]);
    assert_eq!(compute_extent(&c), Err(GeometryError::NotRectangle));
}

#[test]
fn stray_fourth_corner_is_rejected() {
    // Edge pairs exist, but the fourth point is off the rectangle.
    let c = corners([[0.0, 0.0], [0.0, 2.0], [3.0, 0.0], [4.0, 2.0]]);
    assert_eq!(compute_extent(&c), Err(GeometryError::NotRectangle));
}

#[test]
fn non_finite_corner_is_reported_by_index() {
    let c = corners([[0.0, 0.0], [0.0, 2.0], [f64::NAN, 0.0], [3.0, 2.0]]);
    assert_eq!(
        compute_extent(&c),
        Err(GeometryError::NonFinite { index: 2 })
    );
    let c = corners([[0.0, 0.0], [0.0, f64::INFINITY], [3.0, 0.0], [3.0, 2.0]]);
    assert_eq!(
        compute_extent(&c),
        Err(GeometryError::NonFinite { index: 1 })
    );
}

#[test]
fn overflowing_span_is_rejected() {
    let c = rect(-1e308, 0.0, 1e308, 2.0);
    assert_eq!(compute_extent(&c), Err(GeometryError::ExtentOverflow));
    let c = rect(0.0, -1e308, 3.0, 1e308);
    assert_eq!(compute_extent(&c), Err(GeometryError::ExtentOverflow));
    // Large but representable spans still pass.
    let e = compute_extent(&rect(-1e307, 0.0, 1e307, 2.0)).unwrap();
    assert_eq!(e.length, 2e307);
}

#[test]
fn tolerance_absorbs_rounding() {
    let c = corners([[0.0, 0.0], [1e-10, 2.0], [3.0, -1e-10], [3.0, 2.0]]);
    assert_eq!(compute_extent(&c), Err(GeometryError::NotRectangle));
    let e = compute_extent_with(&c, GeomCfg::with_eps(1e-9)).unwrap();
    assert!((e.length - 3.0).abs() < 1e-9);
    assert!((e.height - 2.0).abs() < 1e-9);
}

#[test]
fn negative_tolerance_is_clamped() {
    assert_eq!(GeomCfg::with_eps(-1.0).eps_coord, 0.0);
}

#[test]
fn randomized_rectangles_seeded() {
    let mut rng = StdRng::seed_from_u64(7);
    let orders = orderings();
    for _ in 0..200 {
        let x1 = rng.gen_range(-100.0..100.0);
        let y1 = rng.gen_range(-100.0..100.0);
        let x2 = x1 + rng.gen_range(0.5..50.0);
        let y2 = y1 - rng.gen_range(0.5..50.0);
        let c = reorder(&rect(x1, y1, x2, y2), orders[rng.gen_range(0..orders.len())]);
        let e = compute_extent(&c).unwrap();
        assert_eq!(e.length, (x1 - x2).abs());
        assert_eq!(e.height, (y1 - y2).abs());
    }
}

proptest! {
    #[test]
    fn extent_is_independent_of_corner_order(
        x1 in -1.0e3f64..1.0e3,
        y1 in -1.0e3f64..1.0e3,
        dx in 0.01f64..1.0e3,
        dy in 0.01f64..1.0e3,
        pick in 0usize..24,
    ) {
        let (x2, y2) = (x1 + dx, y1 + dy);
        let order = orderings()[pick];
        let e = compute_extent(&reorder(&rect(x1, y1, x2, y2), order)).unwrap();
        prop_assert_eq!(e.length, (x1 - x2).abs());
        prop_assert_eq!(e.height, (y1 - y2).abs());
    }

    #[test]
    fn three_distinct_x_values_never_pass(
        xs in proptest::array::uniform4(-50i32..50),
        ys in proptest::array::uniform4(-50i32..50),
    ) {
        let mut distinct = xs.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assume!(distinct.len() >= 3);
        let c = corners([0, 1, 2, 3].map(|k| [xs[k] as f64, ys[k] as f64]));
        prop_assert!(compute_extent(&c).is_err());
    }
}
