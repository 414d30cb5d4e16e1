//! # Object Table
//!
//! Fixed-capacity slot arena for map objects (monsters, projectiles,
//! effects, scenery).

use crate::ids::{ObjectSlotId, RegionId};
use crate::units::WorldPoint3d;

/// Default object capacity of a loaded map.
pub const MAXIMUM_OBJECTS_PER_MAP: usize = 384;

/// Largest capacity an [`ObjectTable`] can address with a [`ObjectSlotId`].
pub const MAXIMUM_OBJECT_CAPACITY: usize = 1 << 16;

/// Spatial state of a live map object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapObject {
    /// Where the object is.
    pub location: WorldPoint3d,
    /// The region the simulation considers the object to be in.
    pub region: RegionId,
    /// Next object in the same region's object list.
    pub next_in_region: Option<ObjectSlotId>,
}

impl MapObject {
    /// Creates an object that is not linked into any region list yet.
    #[inline]
    #[must_use]
    pub const fn new(location: WorldPoint3d, region: RegionId) -> Self {
        Self {
            location,
            region,
            next_in_region: None,
        }
    }
}

/// The authoritative object table.
///
/// Slots are allocated once when the map loads. Spawning and despawning
/// reuse slots through a free list and never touch the heap.
///
/// # Thread Safety
///
/// Not thread-safe. The simulation and the renderer are expected to take
/// turns on the same thread.
pub struct ObjectTable {
    /// Slot storage. `None` marks an unused slot.
    slots: Box<[Option<MapObject>]>,
    /// Free slot indices, lowest index on top.
    free_list: Vec<u16>,
    /// Number of used slots.
    used_count: usize,
}

impl ObjectTable {
    /// Creates a table with `capacity` unused slots.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or above [`MAXIMUM_OBJECT_CAPACITY`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            capacity <= MAXIMUM_OBJECT_CAPACITY,
            "Capacity {capacity} exceeds the addressable slot range"
        );

        let slots: Vec<Option<MapObject>> = vec![None; capacity];
        #[allow(clippy::cast_possible_truncation)]
        let free_list: Vec<u16> = (0..capacity).rev().map(|i| i as u16).collect();

        Self {
            slots: slots.into_boxed_slice(),
            free_list,
            used_count: 0,
        }
    }

    /// Returns the number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of used slots.
    #[inline]
    #[must_use]
    pub const fn used_count(&self) -> usize {
        self.used_count
    }

    /// Whether `slot` currently holds a live object.
    #[inline]
    #[must_use]
    pub fn is_used(&self, slot: ObjectSlotId) -> bool {
        self.get(slot).is_some()
    }

    /// Gets a live object.
    #[inline]
    #[must_use]
    pub fn get(&self, slot: ObjectSlotId) -> Option<&MapObject> {
        self.slots.get(slot.index())?.as_ref()
    }

    /// Gets a live object mutably.
    #[inline]
    pub fn get_mut(&mut self, slot: ObjectSlotId) -> Option<&mut MapObject> {
        self.slots.get_mut(slot.index())?.as_mut()
    }

    /// Iterates over all live objects.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectSlotId, &MapObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            #[allow(clippy::cast_possible_truncation)]
            let id = ObjectSlotId::new(index as u16);
            slot.as_ref().map(|object| (id, object))
        })
    }

    /// Stores `object` in the lowest free slot.
    ///
    /// Returns `None` when the table is full.
    pub(crate) fn allocate(&mut self, object: MapObject) -> Option<ObjectSlotId> {
        let index = self.free_list.pop()?;

        self.slots[usize::from(index)] = Some(object);
        self.used_count += 1;

        Some(ObjectSlotId::new(index))
    }

    /// Releases a slot, returning the object it held.
    pub(crate) fn free(&mut self, slot: ObjectSlotId) -> Option<MapObject> {
        let object = self.slots.get_mut(slot.index())?.take()?;

        // Keep the lowest index on top so reuse is deterministic.
        let index = self.free_list.partition_point(|&free| usize::from(free) > slot.index());
        #[allow(clippy::cast_possible_truncation)]
        let raw = slot.index() as u16;
        self.free_list.insert(index, raw);
        self.used_count -= 1;

        Some(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_at(x: i16) -> MapObject {
        MapObject::new(WorldPoint3d::new(x, 0, 0), RegionId::new(0))
    }

    #[test]
    fn test_allocate_and_free() {
        let mut table = ObjectTable::new(4);

        let slot = table.allocate(object_at(5)).unwrap();
        assert_eq!(slot, ObjectSlotId::new(0));
        assert!(table.is_used(slot));
        assert_eq!(table.used_count(), 1);

        let freed = table.free(slot).unwrap();
        assert_eq!(freed.location.x, 5);
        assert!(!table.is_used(slot));
        assert_eq!(table.used_count(), 0);
    }

    #[test]
    fn test_table_full() {
        let mut table = ObjectTable::new(2);

        assert!(table.allocate(object_at(1)).is_some());
        assert!(table.allocate(object_at(2)).is_some());
        assert!(table.allocate(object_at(3)).is_none());
    }

    #[test]
    fn test_lowest_free_slot_is_reused_first() {
        let mut table = ObjectTable::new(4);
        let a = table.allocate(object_at(0)).unwrap();
        let b = table.allocate(object_at(1)).unwrap();
        let _c = table.allocate(object_at(2)).unwrap();

        table.free(b);
        table.free(a);

        assert_eq!(table.allocate(object_at(9)), Some(a));
        assert_eq!(table.allocate(object_at(9)), Some(b));
        assert_eq!(table.allocate(object_at(9)), Some(ObjectSlotId::new(3)));
    }

    #[test]
    fn test_free_unused_slot_is_none() {
        let mut table = ObjectTable::new(2);
        assert!(table.free(ObjectSlotId::new(1)).is_none());
        assert!(table.free(ObjectSlotId::new(40)).is_none());
    }

    #[test]
    fn test_iter_skips_unused() {
        let mut table = ObjectTable::new(3);
        let a = table.allocate(object_at(1)).unwrap();
        let b = table.allocate(object_at(2)).unwrap();
        table.free(a);

        let live: Vec<_> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(live, vec![b]);
    }

    #[test]
    #[should_panic(expected = "Capacity must be greater than zero")]
    fn test_zero_capacity_panics() {
        let _ = ObjectTable::new(0);
    }
}
