//! # Tick Lifecycle Controller
//!
//! [`WorldInterpolator`] owns the snapshot store and sequences it against
//! the simulation:
//!
//! ```text
//!                 initialize()
//! Uninitialized ───────────────► Initialized ◄──┐ rotate()
//!       ▲                          │    ▲       │
//!       │ teardown()      restore()│    │rotate()
//!       │                          ▼    │
//!       └─────────────────────── Restored ──────┘
//! ```
//!
//! One tick of the steady-state loop:
//!
//! 1. `restore` - undo the last frame's blend before the simulation runs
//! 2. the simulation advances the world
//! 3. `rotate` - capture the new tick
//! 4. `interpolate_objects` / `interpolate_view` every render frame
//!
//! The frame entry points live in [`crate::driver`].

use crate::config::InterpolationConfig;
use crate::snapshot::SnapshotStore;
use crate::world::{ObjectStore, RegionStore, ViewAccess};

/// Lifecycle of a [`WorldInterpolator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    /// No snapshots yet. Rotation and restoration are ignored.
    Uninitialized,
    /// Snapshots track the simulation tick by tick.
    Initialized,
    /// The world was reset to the current snapshot; no blend is pending.
    Restored,
}

/// Owned interpolation context for one loaded world.
#[derive(Debug)]
pub struct WorldInterpolator {
    pub(crate) config: InterpolationConfig,
    pub(crate) store: SnapshotStore,
    state: LifecycleState,
}

impl WorldInterpolator {
    /// Creates an uninitialized interpolator.
    #[must_use]
    pub fn new(config: InterpolationConfig) -> Self {
        Self {
            config,
            store: SnapshotStore::new(),
            state: LifecycleState::Uninitialized,
        }
    }

    /// Captures the freshly loaded world into both snapshot generations.
    ///
    /// Calling it again re-sizes the snapshots for a new world.
    pub fn initialize<W: ObjectStore + RegionStore + ?Sized>(&mut self, world: &W) {
        self.store.initialize(world);
        self.state = LifecycleState::Initialized;
    }

    /// Shifts the snapshots by one tick. Call once per tick, after the
    /// simulation has finished with the world.
    pub fn rotate<W: ObjectStore + RegionStore + ?Sized>(&mut self, world: &W) {
        if self.state == LifecycleState::Uninitialized {
            tracing::warn!("rotate before initialize ignored");
            return;
        }
        self.store.rotate(world);
        self.state = LifecycleState::Initialized;
    }

    /// Writes the current tick back into the world.
    ///
    /// Call before the simulation touches the world, and before any mode
    /// that must not see a partial blend (level change, saved-game load).
    pub fn restore<W: ObjectStore + RegionStore + ViewAccess + ?Sized>(&mut self, world: &mut W) {
        if self.state == LifecycleState::Uninitialized {
            tracing::warn!("restore before initialize ignored");
            return;
        }
        self.store.restore(world);
        self.state = LifecycleState::Restored;
        tracing::debug!("world restored to current tick");
    }

    /// Discards all snapshots. The interpolator can be initialized again for
    /// the next world.
    pub fn teardown(&mut self) {
        self.store.teardown();
        self.state = LifecycleState::Uninitialized;
        tracing::debug!("interpolator torn down");
    }

    /// Marks the live camera as refreshed from authoritative state, so the
    /// next view interpolation captures it.
    pub fn request_view_capture(&mut self) {
        self.store.request_view_capture();
    }

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Whether [`initialize`](Self::initialize) has run since creation or
    /// the last teardown.
    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state != LifecycleState::Uninitialized
    }

    /// Active settings.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &InterpolationConfig {
        &self.config
    }

    /// The snapshot store, for inspection.
    #[inline]
    #[must_use]
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.store
    }
}

impl Default for WorldInterpolator {
    fn default() -> Self {
        Self::new(InterpolationConfig::default())
    }
}
