//! Collaborator seams and the service facade that drives the fit core.
//!
//! Purpose
//! - `LocationLookup`/`LocationStore` and `ItemStore` describe what the core
//!   needs from persistence: fetch a location by id, fetch/store an item.
//! - `Warehouse` runs the two fit-checked call paths (item creation, item
//!   relocation) and passes the remaining CRUD operations through.
//!
//! Logging lives here, not in `extent`/`fit`: accepted mutations at `info`,
//! fit rejections at `warn`.

use thiserror::Error;
use tracing::{info, warn};

use crate::extent::{GeomCfg, GeometryError};
use crate::fit::{evaluate_item_fit_with, Dimension, FitDecision, FitReport, ItemDims};
use crate::model::{
    validate_name, Item, ItemId, Location, LocationDraft, LocationId, NewItem, NewLocation,
    ValidationError,
};

/// Failures raised by a store implementation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("location {0} not found")]
    LocationNotFound(LocationId),
    #[error("item {0} not found")]
    ItemNotFound(ItemId),
    #[error("location {location} still holds {items} item(s)")]
    LocationInUse { location: LocationId, items: usize },
    #[error("no ids left to allocate")]
    IdSpaceExhausted,
}

/// "Fetch location by id".
pub trait LocationLookup {
    fn location(&self, id: LocationId) -> Result<Location, StoreError>;
}

/// Location CRUD beyond the lookup the fit check needs.
pub trait LocationStore: LocationLookup {
    fn locations(&self) -> Vec<Location>;
    fn insert_location(&mut self, draft: LocationDraft) -> Result<Location, StoreError>;
    fn rename_location(&mut self, id: LocationId, name: String) -> Result<Location, StoreError>;
    fn remove_location(&mut self, id: LocationId) -> Result<(), StoreError>;
}

/// "Fetch/store item".
pub trait ItemStore {
    fn item(&self, id: ItemId) -> Result<Item, StoreError>;
    fn items(&self) -> Vec<Item>;
    fn insert_item(&mut self, location_id: LocationId, item: NewItem) -> Result<Item, StoreError>;
    fn set_item_location(
        &mut self,
        item_id: ItemId,
        location_id: LocationId,
    ) -> Result<Item, StoreError>;
    fn remove_item(&mut self, id: ItemId) -> Result<(), StoreError>;
}

/// Everything a `Warehouse` operation can fail with.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("location {location} has unusable geometry: {source}")]
    Geometry {
        location: LocationId,
        #[source]
        source: GeometryError,
    },
    #[error("The item is too long or tall to fit inside the location")]
    Rejected { dimension: Dimension },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Stable machine-readable class for the caller's status mapping.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation",
            ServiceError::Geometry { .. } => "geometry",
            ServiceError::Rejected { .. } => "rejected",
            ServiceError::Store(StoreError::LocationInUse { .. }) => "conflict",
            ServiceError::Store(StoreError::IdSpaceExhausted) => "exhausted",
            ServiceError::Store(_) => "not_found",
        }
    }

    /// User-facing detail; only fit rejections carry one.
    pub fn detail(&self) -> Option<String> {
        match self {
            ServiceError::Rejected { dimension } => Some(format!(
                "The item's {dimension} cannot fit into the location."
            )),
            _ => None,
        }
    }
}

/// Service facade over a store `S`.
#[derive(Clone, Debug, Default)]
pub struct Warehouse<S> {
    store: S,
    cfg: GeomCfg,
}

impl<S> Warehouse<S> {
    pub fn new(store: S) -> Self {
        Self::with_cfg(store, GeomCfg::default())
    }

    pub fn with_cfg(store: S, cfg: GeomCfg) -> Self {
        Self { store, cfg }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: LocationStore + ItemStore> Warehouse<S> {
    pub fn create_location(&mut self, payload: NewLocation) -> Result<Location, ServiceError> {
        let draft = payload.validate()?;
        let location = self.store.insert_location(draft)?;
        info!(location = %location.id, name = %location.name, "location_created");
        Ok(location)
    }

    pub fn list_locations(&self) -> Vec<Location> {
        self.store.locations()
    }

    pub fn get_location(&self, id: LocationId) -> Result<Location, ServiceError> {
        Ok(self.store.location(id)?)
    }

    pub fn rename_location(
        &mut self,
        id: LocationId,
        name: &str,
    ) -> Result<Location, ServiceError> {
        let name = validate_name(name, "name")?;
        let location = self.store.rename_location(id, name)?;
        info!(location = %id, name = %location.name, "location_renamed");
        Ok(location)
    }

    pub fn delete_location(&mut self, id: LocationId) -> Result<(), ServiceError> {
        self.store.remove_location(id)?;
        info!(location = %id, "location_deleted");
        Ok(())
    }

    /// Fit-checked insert: the new item must fit the target location.
    pub fn create_item(
        &mut self,
        location_id: LocationId,
        payload: NewItem,
    ) -> Result<Item, ServiceError> {
        payload.validate()?;
        let location = self.store.location(location_id)?;
        self.ensure_fits(&location, payload.dims())?;
        let item = self.store.insert_item(location_id, payload)?;
        info!(item = %item.id, location = %location_id, "item_created");
        Ok(item)
    }

    pub fn list_items(&self) -> Vec<Item> {
        self.store.items()
    }

    pub fn get_item(&self, id: ItemId) -> Result<Item, ServiceError> {
        Ok(self.store.item(id)?)
    }

    /// Fit-checked move: the item's stored dimensions must fit the destination.
    pub fn relocate_item(
        &mut self,
        item_id: ItemId,
        location_id: LocationId,
    ) -> Result<Item, ServiceError> {
        let location = self.store.location(location_id)?;
        let item = self.store.item(item_id)?;
        self.ensure_fits(&location, item.dims())?;
        let moved = self.store.set_item_location(item_id, location_id)?;
        info!(item = %item_id, from = %item.location_id, to = %location_id, "item_relocated");
        Ok(moved)
    }

    pub fn delete_item(&mut self, id: ItemId) -> Result<(), ServiceError> {
        self.store.remove_item(id)?;
        info!(item = %id, "item_deleted");
        Ok(())
    }

    /// Read-only fit report against a stored location.
    pub fn evaluate_location_fit(
        &self,
        location_id: LocationId,
        dims: ItemDims,
    ) -> Result<FitReport, ServiceError> {
        let location = self.store.location(location_id)?;
        Ok(self.decide(&location, dims)?.into())
    }

    fn decide(&self, location: &Location, dims: ItemDims) -> Result<FitDecision, ServiceError> {
        evaluate_item_fit_with(dims, &location.corners(), self.cfg).map_err(|source| {
            ServiceError::Geometry {
                location: location.id,
                source,
            }
        })
    }

    fn ensure_fits(&self, location: &Location, dims: ItemDims) -> Result<(), ServiceError> {
        match self.decide(location, dims)? {
            FitDecision::Accepted => Ok(()),
            FitDecision::Rejected { failing } => {
                warn!(
                    location = %location.id,
                    dimension = %failing,
                    length = dims.length,
                    height = dims.height,
                    "item_rejected"
                );
                Err(ServiceError::Rejected { dimension: failing })
            }
        }
    }
}
