//! # World Interfaces
//!
//! Traits the authoritative world implements so the engine can read and
//! write it without owning it.
//!
//! ```text
//! tickframe defines:        the world implements:
//! ┌──────────────────┐      ┌──────────────────────────┐
//! │ trait ObjectStore│ ←─── │ impl ObjectStore for ... │
//! │ trait RegionStore│      │ impl RegionStore for ... │
//! │ trait SpatialIndex      │ ...                      │
//! │ trait ViewAccess │      └──────────────────────────┘
//! └──────────────────┘
//! ```
//!
//! [`tickframe_core::GameWorld`] implements all four.

use tickframe_core::{
    EdgeIndex, GameWorld, ObjectSlotId, RegionId, ViewState, WorldPoint2d, WorldPoint3d,
};

/// Per-object spatial fields captured at a tick boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectState {
    /// Object location.
    pub location: WorldPoint3d,
    /// Region the object is linked into.
    pub region: RegionId,
    /// Next object in the same region's list.
    pub next_in_region: Option<ObjectSlotId>,
}

/// Access to the object table.
pub trait ObjectStore {
    /// Number of object slots (used or not).
    fn object_capacity(&self) -> usize;

    /// Spatial fields of a used slot, `None` for an unused one.
    fn object_state(&self, slot: ObjectSlotId) -> Option<ObjectState>;

    /// Overwrites all spatial fields of a used slot verbatim.
    ///
    /// Used to restore a captured tick; list heads are restored separately.
    fn write_object_state(&mut self, slot: ObjectSlotId, state: &ObjectState);

    /// Moves an object without touching its region membership.
    fn set_object_location(&mut self, slot: ObjectSlotId, location: WorldPoint3d);

    /// Unlinks an object from its region list and links it into `region`.
    fn relink_object(&mut self, slot: ObjectSlotId, region: RegionId);
}

/// Access to the region table.
pub trait RegionStore {
    /// Number of regions.
    fn region_count(&self) -> usize;

    /// Head of a region's object list.
    fn region_first_object(&self, region: RegionId) -> Option<ObjectSlotId>;

    /// Replaces the head of a region's object list.
    fn set_region_first_object(&mut self, region: RegionId, first: Option<ObjectSlotId>);

    /// Whether the renderer flagged the region visible this frame.
    fn is_region_visible(&self, region: RegionId) -> bool;
}

/// Geometry queries over the region map.
pub trait SpatialIndex {
    /// The boundary edge of `region` that `p0 -> p1` crosses leaving it.
    fn find_edge_crossed_leaving(
        &self,
        region: RegionId,
        p0: WorldPoint2d,
        p1: WorldPoint2d,
    ) -> Option<EdgeIndex>;

    /// The region across `edge`, `None` for solid wall.
    fn adjacent_region(&self, region: RegionId, edge: EdgeIndex) -> Option<RegionId>;
}

/// Access to the live camera.
pub trait ViewAccess {
    /// The live camera.
    fn view(&self) -> &ViewState;

    /// The live camera, mutably.
    fn view_mut(&mut self) -> &mut ViewState;
}

/// Everything the engine needs from the world.
pub trait WorldAccess: ObjectStore + RegionStore + SpatialIndex + ViewAccess {}

impl<T: ObjectStore + RegionStore + SpatialIndex + ViewAccess> WorldAccess for T {}

impl ObjectStore for GameWorld {
    fn object_capacity(&self) -> usize {
        self.objects.capacity()
    }

    fn object_state(&self, slot: ObjectSlotId) -> Option<ObjectState> {
        self.objects.get(slot).map(|object| ObjectState {
            location: object.location,
            region: object.region,
            next_in_region: object.next_in_region,
        })
    }

    fn write_object_state(&mut self, slot: ObjectSlotId, state: &ObjectState) {
        if let Some(object) = self.objects.get_mut(slot) {
            object.location = state.location;
            object.region = state.region;
            object.next_in_region = state.next_in_region;
        }
    }

    fn set_object_location(&mut self, slot: ObjectSlotId, location: WorldPoint3d) {
        if let Some(object) = self.objects.get_mut(slot) {
            object.location = location;
        }
    }

    fn relink_object(&mut self, slot: ObjectSlotId, region: RegionId) {
        self.remove_object_from_region(slot);
        self.add_object_to_region(slot, region);
    }
}

impl RegionStore for GameWorld {
    fn region_count(&self) -> usize {
        self.map.len()
    }

    fn region_first_object(&self, region: RegionId) -> Option<ObjectSlotId> {
        self.map.region(region)?.first_object
    }

    fn set_region_first_object(&mut self, region: RegionId, first: Option<ObjectSlotId>) {
        if let Some(region) = self.map.region_mut(region) {
            region.first_object = first;
        }
    }

    fn is_region_visible(&self, region: RegionId) -> bool {
        self.map.region(region).is_some_and(|region| region.visible)
    }
}

impl SpatialIndex for GameWorld {
    fn find_edge_crossed_leaving(
        &self,
        region: RegionId,
        p0: WorldPoint2d,
        p1: WorldPoint2d,
    ) -> Option<EdgeIndex> {
        self.map.find_edge_crossed_leaving(region, p0, p1)
    }

    fn adjacent_region(&self, region: RegionId, edge: EdgeIndex) -> Option<RegionId> {
        self.map.adjacent_region(region, edge)
    }
}

impl ViewAccess for GameWorld {
    fn view(&self) -> &ViewState {
        &self.view
    }

    fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }
}
