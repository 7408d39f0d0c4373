//! Location-fit validation for a small warehouse service.
//!
//! Layers (leaves first)
//! - `extent`: derive `(length, height)` of an axis-aligned rectangular
//!   location from four unordered corners; typed `GeometryError` otherwise.
//! - `fit`: admit or reject an item's `(length, height)` against an extent.
//! - `model`: locations, items, and create-payload validation.
//! - `service`: collaborator traits plus the `Warehouse` facade running the
//!   fit-checked create/relocate paths.
//! - `store`: in-memory store implementing the collaborator traits.
//!
//! `extent` and `fit` are pure and hold no state; they are safe to call from
//! any number of threads and never log.

pub mod extent;
pub mod fit;
pub mod model;
pub mod service;
pub mod store;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use extent::{compute_extent, Coord, Corners, Extent, GeomCfg, GeometryError};
pub use fit::{evaluate_item_fit, validate_fit, Dimension, FitDecision, FitReport, ItemDims};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::extent::{
        compute_extent, compute_extent_with, corners, Coord, Corners, Extent, GeomCfg,
        GeometryError,
    };
    pub use crate::fit::{
        evaluate_item_fit, evaluate_item_fit_with, validate_fit, Dimension, FitDecision,
        FitReport, ItemDims,
    };
    pub use crate::model::{
        coordinate_array, Item, ItemId, Location, LocationDraft, LocationId, NewItem, NewLocation,
        ValidationError,
    };
    pub use crate::service::{
        ItemStore, LocationLookup, LocationStore, ServiceError, StoreError, Warehouse,
    };
    pub use crate::store::{MemoryStore, Snapshot};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn core_values_are_shareable() {
        assert_send_sync::<Extent>();
        assert_send_sync::<FitDecision>();
        assert_send_sync::<GeomCfg>();
        assert_send_sync::<GeometryError>();
    }

    #[test]
    fn concurrent_evaluation_agrees() {
        let c = corners([[-1.0, 1.0], [5.0, 1.0], [5.0, 6.0], [-1.0, 6.0]]);
        let dims = ItemDims {
            length: 2.0,
            height: 20.0,
        };
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| evaluate_item_fit(dims, &c)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for r in results {
            assert_eq!(r.unwrap().failing(), Some(Dimension::Height));
        }
    }
}
