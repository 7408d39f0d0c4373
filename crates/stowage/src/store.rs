//! In-memory reference store and its JSON snapshot.
//!
//! Ids are allocated like a serial column: start at 1, never reused.
//! Items must reference an existing location, and a location that still holds
//! items cannot be removed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Item, ItemId, Location, LocationDraft, LocationId, NewItem};
use crate::service::{ItemStore, LocationLookup, LocationStore, StoreError};

/// Full store contents, in id order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub items: Vec<Item>,
    /// Next ids to hand out; absent in older files, then derived from the ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_location: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_item: Option<i64>,
}

#[derive(Clone, Debug)]
pub struct MemoryStore {
    locations: BTreeMap<LocationId, Location>,
    items: BTreeMap<ItemId, Item>,
    next_location: i64,
    next_item: i64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            locations: BTreeMap::new(),
            items: BTreeMap::new(),
            next_location: 1,
            next_item: 1,
        }
    }
}

impl MemoryStore {
    /// Rebuild a store. The next ids are the larger of the stored counters and
    /// one past the largest id present, so deleted ids stay retired.
    ///
    /// Fails if an item points at a location the snapshot does not contain.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, StoreError> {
        let locations: BTreeMap<_, _> = snapshot
            .locations
            .into_iter()
            .map(|l| (l.id, l))
            .collect();
        let mut items = BTreeMap::new();
        for item in snapshot.items {
            if !locations.contains_key(&item.location_id) {
                return Err(StoreError::LocationNotFound(item.location_id));
            }
            items.insert(item.id, item);
        }
        let next_location = next_id(
            locations.keys().next_back().map(|id: &LocationId| id.0),
            snapshot.next_location,
        )?;
        let next_item = next_id(
            items.keys().next_back().map(|id: &ItemId| id.0),
            snapshot.next_item,
        )?;
        Ok(Self {
            locations,
            items,
            next_location,
            next_item,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            locations: self.locations.values().cloned().collect(),
            items: self.items.values().cloned().collect(),
            next_location: Some(self.next_location),
            next_item: Some(self.next_item),
        }
    }

    fn allocate_location(&mut self) -> Result<LocationId, StoreError> {
        let id = self.next_location;
        self.next_location = id.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?;
        Ok(LocationId(id))
    }

    fn allocate_item(&mut self) -> Result<ItemId, StoreError> {
        let id = self.next_item;
        self.next_item = id.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?;
        Ok(ItemId(id))
    }

    fn require_location(&self, id: LocationId) -> Result<(), StoreError> {
        if self.locations.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::LocationNotFound(id))
        }
    }
}

/// `max(stored, largest + 1)`, at least 1.
fn next_id(largest: Option<i64>, stored: Option<i64>) -> Result<i64, StoreError> {
    let after_largest = match largest {
        Some(id) => id.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?,
        None => 1,
    };
    Ok(after_largest.max(stored.unwrap_or(1)))
}

impl LocationLookup for MemoryStore {
    fn location(&self, id: LocationId) -> Result<Location, StoreError> {
        self.locations
            .get(&id)
            .cloned()
            .ok_or(StoreError::LocationNotFound(id))
    }
}

impl LocationStore for MemoryStore {
    fn locations(&self) -> Vec<Location> {
        self.locations.values().cloned().collect()
    }

    fn insert_location(&mut self, draft: LocationDraft) -> Result<Location, StoreError> {
        let id = self.allocate_location()?;
        let location = Location {
            id,
            name: draft.name,
            coordinate: draft.coordinate,
        };
        self.locations.insert(id, location.clone());
        Ok(location)
    }

    fn rename_location(&mut self, id: LocationId, name: String) -> Result<Location, StoreError> {
        let location = self
            .locations
            .get_mut(&id)
            .ok_or(StoreError::LocationNotFound(id))?;
        location.name = name;
        Ok(location.clone())
    }

    fn remove_location(&mut self, id: LocationId) -> Result<(), StoreError> {
        self.require_location(id)?;
        let held = self.items.values().filter(|i| i.location_id == id).count();
        if held > 0 {
            return Err(StoreError::LocationInUse {
                location: id,
                items: held,
            });
        }
        self.locations.remove(&id);
        Ok(())
    }
}

impl ItemStore for MemoryStore {
    fn item(&self, id: ItemId) -> Result<Item, StoreError> {
        self.items
            .get(&id)
            .cloned()
            .ok_or(StoreError::ItemNotFound(id))
    }

    fn items(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }

    fn insert_item(&mut self, location_id: LocationId, item: NewItem) -> Result<Item, StoreError> {
        self.require_location(location_id)?;
        let id = self.allocate_item()?;
        let item = Item {
            id,
            name: item.name,
            kind: item.kind,
            length: item.length,
            width: item.width,
            height: item.height,
            location_id,
        };
        self.items.insert(id, item.clone());
        Ok(item)
    }

    fn set_item_location(
        &mut self,
        item_id: ItemId,
        location_id: LocationId,
    ) -> Result<Item, StoreError> {
        self.require_location(location_id)?;
        let item = self
            .items
            .get_mut(&item_id)
            .ok_or(StoreError::ItemNotFound(item_id))?;
        item.location_id = location_id;
        Ok(item.clone())
    }

    fn remove_item(&mut self, id: ItemId) -> Result<(), StoreError> {
        self.items
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::ItemNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> LocationDraft {
        LocationDraft {
            name: name.into(),
            coordinate: [[0.0, 0.0], [0.0, 2.0], [3.0, 0.0], [3.0, 2.0]],
        }
    }

    fn new_item() -> NewItem {
        NewItem {
            name: "bin".into(),
            kind: "plastic".into(),
            length: 1.0,
            width: 1.0,
            height: 1.0,
        }
    }

    #[test]
    fn ids_are_serial_and_not_reused() {
        let mut s = MemoryStore::default();
        let a = s.insert_location(draft("a")).unwrap();
        let b = s.insert_location(draft("b")).unwrap();
        assert_eq!((a.id, b.id), (LocationId(1), LocationId(2)));
        s.remove_location(b.id).unwrap();
        let c = s.insert_location(draft("c")).unwrap();
        assert_eq!(c.id, LocationId(3));
    }

    #[test]
    fn items_need_an_existing_location() {
        let mut s = MemoryStore::default();
        assert_eq!(
            s.insert_item(LocationId(1), new_item()),
            Err(StoreError::LocationNotFound(LocationId(1)))
        );
        let loc = s.insert_location(draft("a")).unwrap();
        let it = s.insert_item(loc.id, new_item()).unwrap();
        assert_eq!(
            s.set_item_location(it.id, LocationId(7)),
            Err(StoreError::LocationNotFound(LocationId(7)))
        );
    }

    #[test]
    fn snapshot_round_trip_keeps_id_allocation() {
        let mut s = MemoryStore::default();
        let loc = s.insert_location(draft("a")).unwrap();
        s.insert_item(loc.id, new_item()).unwrap();
        let second = s.insert_item(loc.id, new_item()).unwrap();
        s.remove_item(ItemId(1)).unwrap();

        let json = serde_json::to_string(&s.snapshot()).unwrap();
        let snap: Snapshot = serde_json::from_str(&json).unwrap();
        let mut restored = MemoryStore::from_snapshot(snap).unwrap();
        assert_eq!(restored.items(), vec![second]);
        let next = restored.insert_item(loc.id, new_item()).unwrap();
        assert_eq!(next.id, ItemId(3));
    }

    #[test]
    fn deleted_newest_ids_stay_retired_after_reload() {
        let mut s = MemoryStore::default();
        let loc = s.insert_location(draft("a")).unwrap();
        let spare = s.insert_location(draft("b")).unwrap();
        s.insert_item(loc.id, new_item()).unwrap();
        let newest = s.insert_item(loc.id, new_item()).unwrap();
        s.remove_item(newest.id).unwrap();
        s.remove_location(spare.id).unwrap();

        let json = serde_json::to_string(&s.snapshot()).unwrap();
        let mut restored = MemoryStore::from_snapshot(serde_json::from_str(&json).unwrap()).unwrap();
        assert_eq!(restored.insert_item(loc.id, new_item()).unwrap().id, ItemId(3));
        assert_eq!(restored.insert_location(draft("c")).unwrap().id, LocationId(3));
    }

    #[test]
    fn snapshot_without_counters_derives_them() {
        let snap: Snapshot = serde_json::from_str(
            r#"{"locations":[{"id":4,"name":"a","coordinate":[[0,0],[0,1],[1,0],[1,1]]}]}"#,
        )
        .unwrap();
        let mut s = MemoryStore::from_snapshot(snap).unwrap();
        assert_eq!(s.insert_location(draft("b")).unwrap().id, LocationId(5));
        assert_eq!(s.insert_item(LocationId(4), new_item()).unwrap().id, ItemId(1));
    }

    #[test]
    fn largest_id_does_not_overflow() {
        let snap = Snapshot {
            locations: vec![Location {
                id: LocationId(i64::MAX),
                name: "last".into(),
                coordinate: [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]],
            }],
            ..Snapshot::default()
        };
        assert_eq!(
            MemoryStore::from_snapshot(snap).unwrap_err(),
            StoreError::IdSpaceExhausted
        );

        let snap = Snapshot {
            next_item: Some(i64::MAX),
            ..Snapshot::default()
        };
        let mut s = MemoryStore::from_snapshot(snap).unwrap();
        let loc = s.insert_location(draft("a")).unwrap();
        assert_eq!(
            s.insert_item(loc.id, new_item()).unwrap_err(),
            StoreError::IdSpaceExhausted
        );
        assert!(s.items().is_empty());
    }

    #[test]
    fn snapshot_with_dangling_item_is_rejected() {
        let snap: Snapshot = serde_json::from_str(
            r#"{"items":[{"id":1,"name":"x","type":"y","length":1,"width":1,"height":1,"location_id":5}]}"#,
        )
        .unwrap();
        assert_eq!(
            MemoryStore::from_snapshot(snap).unwrap_err(),
            StoreError::LocationNotFound(LocationId(5))
        );
    }
}
