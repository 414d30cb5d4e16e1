//! # Tickframe
//!
//! Tick/frame interpolation for a fixed-rate simulation under a faster
//! render loop.
//!
//! The simulation advances in whole ticks. Without help every frame shows
//! objects frozen at the last tick, which stutters. This crate snapshots the
//! world at tick boundaries and, every frame, writes a blend of the last two
//! ticks into the world for the renderer to read.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐ rotate/restore ┌───────────────────┐
//! │  Simulation  │ ─────────────► │ WorldInterpolator │
//! └──────────────┘                │  (SnapshotStore)  │
//!        ▲                        └─────────┬─────────┘
//!        │ world traits                     │ interpolate_objects(t)
//!        │                                  │ interpolate_view(t)
//! ┌──────┴───────┐ ◄────────────────────────┘
//! │    World     │ ───────────────────────────────────► Renderer
//! └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tickframe::{InterpolationConfig, WorldInterpolator};
//! use tickframe_core::{GameWorld, RegionMap, WorldPoint3d, WORLD_ONE};
//!
//! let mut world = GameWorld::new(RegionMap::grid(4, 4, WORLD_ONE), 64);
//! world.map.set_all_visible(true);
//! let slot = world.spawn_object(WorldPoint3d::new(100, 100, 0)).unwrap();
//!
//! let mut interpolator = WorldInterpolator::new(InterpolationConfig::default());
//! interpolator.initialize(&world);
//!
//! // One tick.
//! interpolator.restore(&mut world);
//! world.teleport_object(slot, WorldPoint3d::new(200, 100, 0));
//! interpolator.rotate(&world);
//!
//! // A frame halfway to the next tick.
//! interpolator.interpolate_objects(&mut world, 0.5);
//! assert_eq!(world.objects.get(slot).unwrap().location.x, 150);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod interpolator;
pub mod lerp;
pub mod reconcile;
pub mod snapshot;
pub mod world;

pub use clock::{ClockStats, TickClock, MAX_CATCH_UP_TICKS};
pub use config::{InterpolationConfig, DEFAULT_TICK_RATE, MAX_TICK_RATE};
pub use driver::{FrameStats, ViewOutcome};
pub use error::{ConfigError, ConfigResult};
pub use interpolator::{LifecycleState, WorldInterpolator};
pub use lerp::{is_blendable, lerp_angle, lerp_distance, lerp_fixed, lerp_fixed_angle, lerp_point, short_arc_lerp};
pub use reconcile::{find_new_region, Reconciliation};
pub use snapshot::{ObjectSnapshot, RegionSnapshot, SnapshotStore, ViewCapture, ViewSnapshot};
pub use world::{ObjectState, ObjectStore, RegionStore, SpatialIndex, ViewAccess, WorldAccess};
