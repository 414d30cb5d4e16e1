//! # Tick Snapshot Store
//!
//! Double-buffered record of the world at the last two tick boundaries.
//!
//! ```text
//! tick N-1                  tick N
//! ┌──────────────┐          ┌──────────────┐
//! │   previous   │  ──t──►  │   current    │     frames blend between them
//! └──────────────┘          └──────────────┘
//!         ▲                         │
//!         └──────── rotate() ───────┘           previous := current,
//!                                               current  := world
//! ```
//!
//! Rotation swaps the two generations and recaptures `current` in place, so
//! nothing is allocated after [`SnapshotStore::initialize`].
//!
//! The camera is captured separately, on request, because it may be driven
//! between ticks.

use tickframe_core::{
    Angle, Fixed, FixedAngle, ObjectSlotId, RegionId, ViewState, WorldPoint3d,
};

use crate::world::{ObjectState, ObjectStore, RegionStore, ViewAccess};

/// One object slot at a tick boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectSnapshot {
    /// Whether the slot held a live object.
    pub used: bool,
    /// Spatial fields. Meaningless when `used` is false.
    pub state: ObjectState,
}

impl ObjectSnapshot {
    fn capture<W: ObjectStore + ?Sized>(world: &W, slot: ObjectSlotId) -> Self {
        match world.object_state(slot) {
            Some(state) => Self { used: true, state },
            None => Self::default(),
        }
    }
}

/// One region's object list head at a tick boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegionSnapshot {
    /// Head of the region's object list.
    pub first_object: Option<ObjectSlotId>,
}

/// The camera at a capture point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    /// Region the camera origin is in.
    pub origin_region: RegionId,
    /// Horizontal facing.
    pub yaw: Angle,
    /// Vertical facing.
    pub pitch: Angle,
    /// Fine horizontal facing.
    pub virtual_yaw: FixedAngle,
    /// Fine vertical facing.
    pub virtual_pitch: FixedAngle,
    /// Eye position.
    pub origin: WorldPoint3d,
    /// Lighting/fog falloff scalar.
    pub maximum_depth_intensity: Fixed,
}

impl From<&ViewState> for ViewSnapshot {
    fn from(view: &ViewState) -> Self {
        Self {
            origin_region: view.origin_region,
            yaw: view.yaw,
            pitch: view.pitch,
            virtual_yaw: view.virtual_yaw,
            virtual_pitch: view.virtual_pitch,
            origin: view.origin,
            maximum_depth_intensity: view.maximum_depth_intensity,
        }
    }
}

impl ViewSnapshot {
    /// Writes every field back into a live camera.
    pub fn apply_to(&self, view: &mut ViewState) {
        view.origin_region = self.origin_region;
        view.yaw = self.yaw;
        view.pitch = self.pitch;
        view.virtual_yaw = self.virtual_yaw;
        view.virtual_pitch = self.virtual_pitch;
        view.origin = self.origin;
        view.maximum_depth_intensity = self.maximum_depth_intensity;
    }
}

/// What the next view capture does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewCapture {
    /// Nothing pending.
    Idle,
    /// `previous := current`, `current := live`.
    Shift,
    /// `previous := current := live`. Armed by initialization.
    Collapse,
}

/// Both snapshot generations of objects, regions and the camera.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    previous_objects: Vec<ObjectSnapshot>,
    current_objects: Vec<ObjectSnapshot>,
    previous_regions: Vec<RegionSnapshot>,
    current_regions: Vec<RegionSnapshot>,
    previous_view: ViewSnapshot,
    current_view: ViewSnapshot,
    view_capture: ViewCapture,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    /// Creates an empty store. Call [`initialize`](Self::initialize) once the
    /// world is loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            previous_objects: Vec::new(),
            current_objects: Vec::new(),
            previous_regions: Vec::new(),
            current_regions: Vec::new(),
            previous_view: ViewSnapshot::default(),
            current_view: ViewSnapshot::default(),
            view_capture: ViewCapture::Collapse,
        }
    }

    /// Sizes both generations to the world, captures it into `current` and
    /// copies that into `previous`, so the first frame blends nothing.
    pub fn initialize<W: ObjectStore + RegionStore + ?Sized>(&mut self, world: &W) {
        let object_capacity = world.object_capacity();
        let region_count = world.region_count();

        self.current_objects.clear();
        self.current_objects.resize(object_capacity, ObjectSnapshot::default());
        self.current_regions.clear();
        self.current_regions.resize(region_count, RegionSnapshot::default());

        self.capture(world);

        self.previous_objects.clone_from(&self.current_objects);
        self.previous_regions.clone_from(&self.current_regions);

        self.previous_view = ViewSnapshot::default();
        self.current_view = ViewSnapshot::default();
        self.view_capture = ViewCapture::Collapse;

        tracing::debug!(object_capacity, region_count, "snapshot store initialized");
    }

    /// Advances one tick: `previous := current`, then `current := world`.
    pub fn rotate<W: ObjectStore + RegionStore + ?Sized>(&mut self, world: &W) {
        std::mem::swap(&mut self.previous_objects, &mut self.current_objects);
        std::mem::swap(&mut self.previous_regions, &mut self.current_regions);
        self.capture(world);
    }

    /// Writes `current` back into the world and collapses `previous` onto it.
    ///
    /// Afterwards the world is exactly the last captured tick and any blend
    /// in progress is gone. Arms a view capture.
    ///
    /// The camera is written back only when no capture is pending: then
    /// `current_view` is the latest tick's camera and the live one may hold
    /// a blend. With a capture pending, the live camera is newer than any
    /// snapshot and is left alone.
    pub fn restore<W: ObjectStore + RegionStore + ViewAccess + ?Sized>(&mut self, world: &mut W) {
        for (index, snapshot) in self.current_objects.iter().enumerate() {
            if snapshot.used {
                world.write_object_state(slot_id(index), &snapshot.state);
            }
        }

        for (index, snapshot) in self.current_regions.iter().enumerate() {
            world.set_region_first_object(region_id(index), snapshot.first_object);
        }

        if self.view_capture == ViewCapture::Idle {
            self.current_view.apply_to(world.view_mut());
        }

        self.previous_objects.copy_from_slice(&self.current_objects);
        self.previous_regions.copy_from_slice(&self.current_regions);
        self.previous_view = self.current_view;
        self.request_view_capture();
    }

    /// Drops all snapshots.
    pub fn teardown(&mut self) {
        *self = Self::new();
    }

    /// Arms a shifting view capture for the next view interpolation.
    /// Called by [`restore`](Self::restore), and by callers that refresh the
    /// live camera without restoring.
    ///
    /// A pending collapse is kept: it is the stronger request.
    pub fn request_view_capture(&mut self) {
        if self.view_capture == ViewCapture::Idle {
            self.view_capture = ViewCapture::Shift;
        }
    }

    /// Performs a pending view capture from the live camera.
    ///
    /// Returns `true` if a capture happened.
    pub fn capture_view_if_pending(&mut self, live: &ViewState) -> bool {
        let live = ViewSnapshot::from(live);
        match self.view_capture {
            ViewCapture::Idle => return false,
            ViewCapture::Shift => {
                self.previous_view = self.current_view;
                self.current_view = live;
            }
            ViewCapture::Collapse => {
                self.previous_view = live;
                self.current_view = live;
            }
        }
        self.view_capture = ViewCapture::Idle;
        true
    }

    /// Re-reads every object slot and region head into `current`.
    fn capture<W: ObjectStore + RegionStore + ?Sized>(&mut self, world: &W) {
        for (index, snapshot) in self.current_objects.iter_mut().enumerate() {
            *snapshot = ObjectSnapshot::capture(world, slot_id(index));
        }
        for (index, snapshot) in self.current_regions.iter_mut().enumerate() {
            snapshot.first_object = world.region_first_object(region_id(index));
        }
    }

    /// Object slots at the previous tick.
    #[inline]
    #[must_use]
    pub fn previous_objects(&self) -> &[ObjectSnapshot] {
        &self.previous_objects
    }

    /// Object slots at the current tick.
    #[inline]
    #[must_use]
    pub fn current_objects(&self) -> &[ObjectSnapshot] {
        &self.current_objects
    }

    /// Region heads at the previous tick.
    #[inline]
    #[must_use]
    pub fn previous_regions(&self) -> &[RegionSnapshot] {
        &self.previous_regions
    }

    /// Region heads at the current tick.
    #[inline]
    #[must_use]
    pub fn current_regions(&self) -> &[RegionSnapshot] {
        &self.current_regions
    }

    /// Camera at the previous capture.
    #[inline]
    #[must_use]
    pub fn previous_view(&self) -> &ViewSnapshot {
        &self.previous_view
    }

    /// Camera at the latest capture.
    #[inline]
    #[must_use]
    pub fn current_view(&self) -> &ViewSnapshot {
        &self.current_view
    }

    /// The kind of view capture waiting for the next view interpolation.
    #[inline]
    #[must_use]
    pub fn pending_view_capture(&self) -> ViewCapture {
        self.view_capture
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn slot_id(index: usize) -> ObjectSlotId {
    ObjectSlotId::new(index as u16)
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn region_id(index: usize) -> RegionId {
    RegionId::new(index as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickframe_core::{GameWorld, RegionMap, WORLD_ONE};

    fn world() -> GameWorld {
        GameWorld::new(RegionMap::grid(4, 1, WORLD_ONE), 8)
    }

    #[test]
    fn test_initialize_sizes_and_collapses() {
        let mut world = world();
        let slot = world.spawn_object(WorldPoint3d::new(10, 10, 0)).unwrap();

        let mut store = SnapshotStore::new();
        store.initialize(&world);

        assert_eq!(store.current_objects().len(), 8);
        assert_eq!(store.current_regions().len(), 4);
        assert_eq!(store.previous_objects(), store.current_objects());
        assert_eq!(store.previous_regions(), store.current_regions());

        let snap = store.current_objects()[slot.index()];
        assert!(snap.used);
        assert_eq!(snap.state.location, WorldPoint3d::new(10, 10, 0));
        assert!(!store.current_objects()[1].used);
        assert_eq!(store.current_regions()[0].first_object, Some(slot));
        assert_eq!(store.pending_view_capture(), ViewCapture::Collapse);
    }

    #[test]
    fn test_rotate_shifts_generations() {
        let mut world = world();
        let slot = world.spawn_object(WorldPoint3d::new(10, 10, 0)).unwrap();
        let mut store = SnapshotStore::new();
        store.initialize(&world);

        world.teleport_object(slot, WorldPoint3d::new(1500, 10, 0));
        store.rotate(&world);

        assert_eq!(store.previous_objects()[0].state.location.x, 10);
        assert_eq!(store.current_objects()[0].state.location.x, 1500);
        assert_eq!(store.previous_regions()[0].first_object, Some(slot));
        assert_eq!(store.current_regions()[0].first_object, None);
        assert_eq!(store.current_regions()[1].first_object, Some(slot));
    }

    #[test]
    fn test_rotate_twice_without_changes_collapses() {
        let mut world = world();
        let slot = world.spawn_object(WorldPoint3d::new(10, 10, 0)).unwrap();
        let mut store = SnapshotStore::new();
        store.initialize(&world);

        world.teleport_object(slot, WorldPoint3d::new(90, 10, 0));
        store.rotate(&world);
        assert_ne!(store.previous_objects(), store.current_objects());

        store.rotate(&world);
        assert_eq!(store.previous_objects(), store.current_objects());
        assert_eq!(store.previous_regions(), store.current_regions());
    }

    #[test]
    fn test_restore_writes_current_back() {
        let mut world = world();
        let slot = world.spawn_object(WorldPoint3d::new(10, 10, 0)).unwrap();
        let mut store = SnapshotStore::new();
        store.initialize(&world);

        // Scribble over the world the way a frame would.
        world.objects.get_mut(slot).unwrap().location = WorldPoint3d::new(500, 500, 0);
        world.relink_object(slot, RegionId::new(3));

        store.restore(&mut world);

        let object = world.objects.get(slot).unwrap();
        assert_eq!(object.location, WorldPoint3d::new(10, 10, 0));
        assert_eq!(object.region, RegionId::new(0));
        assert_eq!(world.map.region(RegionId::new(0)).unwrap().first_object, Some(slot));
        assert_eq!(world.map.region(RegionId::new(3)).unwrap().first_object, None);
        assert_eq!(store.pending_view_capture(), ViewCapture::Collapse);
    }

    #[test]
    fn test_restore_collapses_previous() {
        let mut world = world();
        let slot = world.spawn_object(WorldPoint3d::new(10, 10, 0)).unwrap();
        let mut store = SnapshotStore::new();
        store.initialize(&world);

        world.teleport_object(slot, WorldPoint3d::new(300, 10, 0));
        store.rotate(&world);
        store.restore(&mut world);

        assert_eq!(store.previous_objects(), store.current_objects());
    }

    #[test]
    fn test_view_capture_modes() {
        let mut store = SnapshotStore::new();
        let mut live = ViewState::default();
        live.look(10, 0);

        // Collapse after construction.
        assert!(store.capture_view_if_pending(&live));
        assert_eq!(store.previous_view().yaw, 10);
        assert_eq!(store.current_view().yaw, 10);

        // Nothing pending.
        live.look(20, 0);
        assert!(!store.capture_view_if_pending(&live));
        assert_eq!(store.current_view().yaw, 10);

        // Explicit re-arm shifts.
        store.request_view_capture();
        assert!(store.capture_view_if_pending(&live));
        assert_eq!(store.previous_view().yaw, 10);
        assert_eq!(store.current_view().yaw, 20);
    }

    #[test]
    fn test_request_does_not_downgrade_collapse() {
        let mut store = SnapshotStore::new();
        store.request_view_capture();
        assert_eq!(store.pending_view_capture(), ViewCapture::Collapse);
    }

    #[test]
    fn test_restore_writes_captured_view_back() {
        let mut world = world();
        let mut store = SnapshotStore::new();
        store.initialize(&world);

        world.view.look(100, 4);
        store.capture_view_if_pending(&world.view);

        world.view.look(7, 7);
        store.restore(&mut world);

        assert_eq!(world.view.yaw, 100);
        assert_eq!(world.view.pitch, 4);
        assert_eq!(store.pending_view_capture(), ViewCapture::Shift);
    }

    #[test]
    fn test_restore_keeps_uncaptured_ticks_of_camera_motion() {
        let mut world = world();
        let mut store = SnapshotStore::new();
        store.initialize(&world);
        store.capture_view_if_pending(&world.view);

        // Two ticks run before the next frame captures the camera.
        for _ in 0..2 {
            store.restore(&mut world);
            let yaw = world.view.yaw + 10;
            world.view.look(yaw, 0);
            store.rotate(&world);
        }

        assert_eq!(world.view.yaw, 20);
        assert_eq!(store.pending_view_capture(), ViewCapture::Shift);

        assert!(store.capture_view_if_pending(&world.view));
        assert_eq!(store.current_view().yaw, 20);
    }

    #[test]
    fn test_teardown_empties_store() {
        let world = world();
        let mut store = SnapshotStore::new();
        store.initialize(&world);
        store.teardown();

        assert!(store.current_objects().is_empty());
        assert!(store.previous_regions().is_empty());
    }
}
