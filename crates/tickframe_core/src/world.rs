//! # Game World
//!
//! The authoritative world: object table, region map and live camera.
//!
//! Region object lists are intrusive singly linked lists threaded through
//! the object slots by id:
//!
//! ```text
//! region.first_object ──► slot 7 ──► slot 2 ──► slot 11 ──► None
//!                         (next_in_region)
//! ```
//!
//! Relinking an object changes list membership only; the slot, and with it
//! every id referring to the object, stays put.

use crate::ids::{ObjectSlotId, RegionId};
use crate::object::{MapObject, ObjectTable};
use crate::region::RegionMap;
use crate::units::WorldPoint3d;
use crate::view::ViewState;

/// The authoritative world state.
pub struct GameWorld {
    /// Object slots.
    pub objects: ObjectTable,
    /// Region geometry, object list heads and visibility flags.
    pub map: RegionMap,
    /// The live camera.
    pub view: ViewState,
}

impl GameWorld {
    /// Creates a world over `map` with `object_capacity` empty slots.
    #[must_use]
    pub fn new(map: RegionMap, object_capacity: usize) -> Self {
        Self {
            objects: ObjectTable::new(object_capacity),
            map,
            view: ViewState::default(),
        }
    }

    /// Spawns an object at `location` and links it into the region that
    /// contains it.
    ///
    /// Returns `None` if the location is outside the map or the table is full.
    pub fn spawn_object(&mut self, location: WorldPoint3d) -> Option<ObjectSlotId> {
        let region = self.map.region_containing(location.xy())?;
        self.spawn_object_in(location, region)
    }

    /// Spawns an object at `location` in an explicitly given region.
    ///
    /// Returns `None` if the region does not exist or the table is full.
    pub fn spawn_object_in(&mut self, location: WorldPoint3d, region: RegionId) -> Option<ObjectSlotId> {
        self.map.region(region)?;
        let slot = self.objects.allocate(MapObject::new(location, region))?;
        self.add_object_to_region(slot, region);
        Some(slot)
    }

    /// Unlinks and frees an object. Returns `false` if the slot was unused.
    pub fn despawn_object(&mut self, slot: ObjectSlotId) -> bool {
        if !self.objects.is_used(slot) {
            return false;
        }
        self.remove_object_from_region(slot);
        self.objects.free(slot).is_some()
    }

    /// Moves an object to `location`, relinking it if the containing region
    /// changed. Returns `false` (and leaves the object alone) if `location`
    /// is outside the map or the slot is unused.
    pub fn teleport_object(&mut self, slot: ObjectSlotId, location: WorldPoint3d) -> bool {
        let Some(region) = self.map.region_containing(location.xy()) else {
            return false;
        };
        let Some(object) = self.objects.get_mut(slot) else {
            return false;
        };

        object.location = location;
        if object.region != region {
            self.remove_object_from_region(slot);
            self.add_object_to_region(slot, region);
        }
        true
    }

    /// Pushes `slot` onto the head of `region`'s object list and records
    /// `region` as the object's region.
    pub fn add_object_to_region(&mut self, slot: ObjectSlotId, region: RegionId) {
        let Some(head) = self.map.region_mut(region) else {
            return;
        };
        let Some(object) = self.objects.get_mut(slot) else {
            return;
        };

        object.region = region;
        object.next_in_region = head.first_object;
        head.first_object = Some(slot);
    }

    /// Unlinks `slot` from its region's object list.
    pub fn remove_object_from_region(&mut self, slot: ObjectSlotId) {
        let Some(object) = self.objects.get(slot) else {
            return;
        };
        let (region, next) = (object.region, object.next_in_region);
        let Some(head) = self.map.region_mut(region) else {
            return;
        };

        if head.first_object == Some(slot) {
            head.first_object = next;
        } else {
            let mut cursor = head.first_object;
            loop {
                let Some(current) = cursor else {
                    tracing::warn!("object {} missing from region {} list", slot.index(), region.index());
                    break;
                };
                let Some(entry) = self.objects.get_mut(current) else {
                    break;
                };
                if entry.next_in_region == Some(slot) {
                    entry.next_in_region = next;
                    break;
                }
                cursor = entry.next_in_region;
            }
        }

        if let Some(object) = self.objects.get_mut(slot) {
            object.next_in_region = None;
        }
    }

    /// Iterates over the object list of `region`, head first.
    pub fn region_objects(&self, region: RegionId) -> impl Iterator<Item = ObjectSlotId> + '_ {
        let mut cursor = self.map.region(region).and_then(|r| r.first_object);
        std::iter::from_fn(move || {
            let current = cursor?;
            cursor = self.objects.get(current).and_then(|o| o.next_in_region);
            Some(current)
        })
    }
}
