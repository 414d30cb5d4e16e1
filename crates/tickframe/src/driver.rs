//! # Frame Interpolation Driver
//!
//! Per-frame entry points. Call both once per rendered frame, objects
//! first, with `t` = time since the last tick / tick duration:
//!
//! ```text
//! tick N-1                    tick N
//!    │◄──────── 1.0 ────────►│
//!    │        t = 0.4         │
//!    ●──────────●─────────────●       blended = prev + (next - prev) * t
//!  prev      rendered        next
//! ```
//!
//! Neither call blends when `t` is outside `[0, 1]`, when interpolation is
//! disabled, or for motion beyond the speed limit (a teleport is shown at
//! its destination, not smeared across the frame).

use tickframe_core::{guess_distance2d, ObjectSlotId, RegionId, WorldPoint3d};

use crate::interpolator::WorldInterpolator;
use crate::lerp::{is_blendable, lerp_angle, lerp_fixed, lerp_fixed_angle, lerp_point};
use crate::reconcile::{reconcile_object, reconcile_view, Reconciliation};
use crate::world::WorldAccess;

/// What one [`WorldInterpolator::interpolate_objects`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Objects moved to a blended location.
    pub blended: u32,
    /// Slots unused in either generation.
    pub skipped_unused: u32,
    /// Objects in regions not visible in either generation.
    pub skipped_invisible: u32,
    /// Objects moving faster than the speed limit.
    pub skipped_too_fast: u32,
    /// Blended objects relinked into another region.
    pub relinked: u32,
    /// Blended objects snapped to the current tick.
    pub snapped: u32,
}

impl FrameStats {
    /// Slots left untouched for any reason.
    #[inline]
    #[must_use]
    pub fn skipped(&self) -> u32 {
        self.skipped_unused + self.skipped_invisible + self.skipped_too_fast
    }
}

/// What one [`WorldInterpolator::interpolate_view`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewOutcome {
    /// The live camera was left alone.
    Skipped,
    /// Blended within its region.
    Blended,
    /// Blended, and the origin region moved.
    Relinked(RegionId),
    /// The blended origin was unreachable; the current tick's origin was
    /// applied.
    Snapped,
}

impl WorldInterpolator {
    #[inline]
    fn within_speed_limit(&self, previous: WorldPoint3d, next: WorldPoint3d) -> bool {
        guess_distance2d(previous.xy(), next.xy()) <= i32::from(self.config.speed_limit)
    }

    /// Blends every eligible object between the two last ticks.
    pub fn interpolate_objects<W: WorldAccess + ?Sized>(&self, world: &mut W, t: f32) -> FrameStats {
        let mut stats = FrameStats::default();

        if !self.config.enabled || !is_blendable(t) {
            return stats;
        }
        debug_assert!(self.is_initialized(), "interpolate_objects before initialize");

        let previous = self.store.previous_objects();
        let current = self.store.current_objects();

        for (index, (prev, next)) in previous.iter().zip(current).enumerate() {
            // New objects appear at their first tick's location rather than
            // being stretched back over a tick they did not exist in.
            if !prev.used || !next.used {
                stats.skipped_unused += 1;
                continue;
            }

            let (prev, next) = (&prev.state, &next.state);

            if !world.is_region_visible(prev.region) && !world.is_region_visible(next.region) {
                stats.skipped_invisible += 1;
                continue;
            }

            if !self.within_speed_limit(prev.location, next.location) {
                stats.skipped_too_fast += 1;
                continue;
            }

            #[allow(clippy::cast_possible_truncation)]
            let slot = ObjectSlotId::new(index as u16);
            let blended = lerp_point(prev.location, next.location, t);
            world.set_object_location(slot, blended);
            stats.blended += 1;

            if prev.region != next.region {
                match reconcile_object(&mut *world, slot, prev, next, blended) {
                    Reconciliation::Unchanged => {}
                    Reconciliation::Relinked(_) => stats.relinked += 1,
                    Reconciliation::Snapped => stats.snapped += 1,
                }
            }
        }

        tracing::trace!(
            t,
            blended = stats.blended,
            skipped = stats.skipped(),
            relinked = stats.relinked,
            snapped = stats.snapped,
            "objects interpolated"
        );
        stats
    }

    /// Blends the live camera between its two last captures.
    ///
    /// Performs a pending view capture first, even when the frame is
    /// otherwise skipped.
    pub fn interpolate_view<W: WorldAccess + ?Sized>(&mut self, world: &mut W, t: f32) -> ViewOutcome {
        if !self.config.enabled {
            return ViewOutcome::Skipped;
        }
        debug_assert!(self.is_initialized(), "interpolate_view before initialize");

        self.store.capture_view_if_pending(world.view());

        let (prev, next) = (*self.store.previous_view(), *self.store.current_view());

        if !is_blendable(t) || !self.within_speed_limit(prev.origin, next.origin) {
            return ViewOutcome::Skipped;
        }

        let view = world.view_mut();
        view.yaw = lerp_angle(prev.yaw, next.yaw, t);
        view.pitch = lerp_angle(prev.pitch, next.pitch, t);
        view.virtual_yaw = lerp_fixed_angle(prev.virtual_yaw, next.virtual_yaw, t);
        view.virtual_pitch = lerp_fixed_angle(prev.virtual_pitch, next.virtual_pitch, t);
        view.maximum_depth_intensity =
            lerp_fixed(prev.maximum_depth_intensity, next.maximum_depth_intensity, t);
        view.origin = lerp_point(prev.origin, next.origin, t);

        if prev.origin_region == next.origin_region {
            return ViewOutcome::Blended;
        }

        let outcome = match reconcile_view(&mut *world, &prev, &next) {
            Reconciliation::Unchanged => ViewOutcome::Blended,
            Reconciliation::Relinked(region) => ViewOutcome::Relinked(region),
            Reconciliation::Snapped => ViewOutcome::Snapped,
        };
        tracing::trace!(t, ?outcome, "view interpolated");
        outcome
    }
}
