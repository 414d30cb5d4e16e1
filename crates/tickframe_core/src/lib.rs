//! # Tickframe Core
//!
//! The authoritative world model that the frame interpolation engine
//! blends: object slots, convex regions, and the live camera.
//!
//! ## Architecture Rules
//!
//! 1. **Fixed capacity** - object slots and regions are sized when a map loads
//! 2. **Stable ids** - objects are addressed by slot index, never by pointer
//! 3. **Integer units** - the world uses the simulation's own integer units
//!
//! ## Example
//!
//! ```rust
//! use tickframe_core::{GameWorld, RegionMap, WorldPoint3d, WORLD_ONE};
//!
//! let mut world = GameWorld::new(RegionMap::grid(4, 4, WORLD_ONE), 64);
//! let slot = world.spawn_object(WorldPoint3d::new(100, 100, 0)).unwrap();
//! assert!(world.objects.is_used(slot));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ids;
pub mod object;
pub mod region;
pub mod units;
pub mod view;
pub mod world;

pub use ids::{EdgeIndex, ObjectSlotId, RegionId};
pub use object::{MapObject, ObjectTable, MAXIMUM_OBJECTS_PER_MAP};
pub use region::{Region, RegionMap};
pub use units::{
    guess_distance2d, Angle, Fixed, FixedAngle,
    WorldDistance, WorldPoint2d, WorldPoint3d, FIXED_FULL_CIRCLE, FIXED_ONE, FULL_CIRCLE,
    HALF_CIRCLE, WORLD_ONE, WORLD_ONE_HALF,
};
pub use view::ViewState;
pub use world::GameWorld;
