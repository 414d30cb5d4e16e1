//! # World Units
//!
//! Integer world coordinates and angles shared by the simulation, the
//! renderer and the interpolation engine.
//!
//! ## Precision Levels
//!
//! - `Angle`: one full turn is [`FULL_CIRCLE`] units. Simulation-visible.
//! - `FixedAngle`: one full turn is `FULL_CIRCLE * FIXED_ONE` units. Only the
//!   camera's fine rendering rotation uses it.
//!
//! ## Why Integers?
//!
//! The simulation is deterministic. Positions and facings are stored in the
//! same integer units the tick logic uses, and every blended value is rounded
//! back into them.

/// Distance in world units. [`WORLD_ONE`] units is one world "meter".
pub type WorldDistance = i16;

/// One world unit of length.
pub const WORLD_ONE: WorldDistance = 1024;

/// Half a world unit of length.
pub const WORLD_ONE_HALF: WorldDistance = WORLD_ONE / 2;

/// Integer angle. Wraps every [`FULL_CIRCLE`] units.
pub type Angle = i16;

/// Number of angle units in one full turn.
pub const FULL_CIRCLE: Angle = 512;

/// Number of angle units in half a turn.
pub const HALF_CIRCLE: Angle = FULL_CIRCLE / 2;

/// 16.16 fixed-point scalar.
pub type Fixed = i32;

/// The fixed-point representation of `1.0`.
pub const FIXED_ONE: Fixed = 1 << 16;

/// Fixed-point angle. Wraps every `FULL_CIRCLE * FIXED_ONE` units.
pub type FixedAngle = i32;

/// Number of fixed angle units in one full turn.
pub const FIXED_FULL_CIRCLE: FixedAngle = FULL_CIRCLE as FixedAngle * FIXED_ONE;

/// A point on the map plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorldPoint2d {
    /// X coordinate
    pub x: WorldDistance,
    /// Y coordinate
    pub y: WorldDistance,
}

impl WorldPoint2d {
    /// Creates a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: WorldDistance, y: WorldDistance) -> Self {
        Self { x, y }
    }

    /// The map origin.
    pub const ORIGIN: Self = Self::new(0, 0);
}

/// A point in the world. `z` is height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorldPoint3d {
    /// X coordinate
    pub x: WorldDistance,
    /// Y coordinate
    pub y: WorldDistance,
    /// Z coordinate (height)
    pub z: WorldDistance,
}

impl WorldPoint3d {
    /// Creates a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: WorldDistance, y: WorldDistance, z: WorldDistance) -> Self {
        Self { x, y, z }
    }

    /// The world origin.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Projects onto the map plane.
    #[inline]
    #[must_use]
    pub const fn xy(self) -> WorldPoint2d {
        WorldPoint2d::new(self.x, self.y)
    }
}

/// Cheap planar distance estimate: the longer leg plus half the shorter one.
///
/// Overestimates the true distance by at most ~12%, never underestimates it.
/// Saturates at `i16::MAX`.
#[must_use]
pub fn guess_distance2d(p0: WorldPoint2d, p1: WorldPoint2d) -> i32 {
    let dx = (i32::from(p0.x) - i32::from(p1.x)).abs();
    let dy = (i32::from(p0.y) - i32::from(p1.y)).abs();

    let distance = if dx > dy { dx + (dy >> 1) } else { dy + (dx >> 1) };
    distance.min(i32::from(i16::MAX))
}
