//! # Spatial Reconciliation
//!
//! Keeps region membership honest while positions are blended.
//!
//! A blended position can lie in a region that neither tick recorded for
//! the object. The walk below follows the segment from the last
//! region-valid point to the blended point across region boundaries:
//!
//! ```text
//!  ┌──────┬──────┬──────┐
//!  │  P0 ─┼──────┼─► P1 │     R0 --e1--> R1 --e1--> R2, no edge left: R2
//!  │  R0  │  R1  │  R2  │
//!  └──────┴──────┴──────┘
//! ```
//!
//! Hitting solid wall means the point is not reachable through the map;
//! the caller then snaps to the target tick instead of leaving the object
//! somewhere invalid.

use tickframe_core::{ObjectSlotId, RegionId, WorldPoint2d, WorldPoint3d};

use crate::snapshot::ViewSnapshot;
use crate::world::{ObjectState, ObjectStore, RegionStore, SpatialIndex, ViewAccess};

/// Result of reconciling one object or the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconciliation {
    /// The blended point lies in the region already linked.
    Unchanged,
    /// Moved to the region the walk ended in.
    Relinked(RegionId),
    /// The walk failed; the target tick's position and region were applied.
    Snapped,
}

/// Walks from `start` along `src -> dst` across region boundaries.
///
/// Returns the region containing `dst`, or `None` if the segment runs into
/// solid wall or the walk does not settle within one visit per region.
pub fn find_new_region<W: SpatialIndex + RegionStore + ?Sized>(
    world: &W,
    start: RegionId,
    src: WorldPoint2d,
    dst: WorldPoint2d,
) -> Option<RegionId> {
    let mut region = start;

    for _ in 0..=world.region_count() {
        match world.find_edge_crossed_leaving(region, src, dst) {
            None => return Some(region),
            Some(edge) => region = world.adjacent_region(region, edge)?,
        }
    }

    tracing::warn!(start = start.index(), "region walk did not settle");
    None
}

/// Reconciles an object that was just moved to `blended`.
///
/// `previous` and `next` are the object's two tick-boundary states.
pub fn reconcile_object<W: ObjectStore + RegionStore + SpatialIndex + ?Sized>(
    world: &mut W,
    slot: ObjectSlotId,
    previous: &ObjectState,
    next: &ObjectState,
    blended: WorldPoint3d,
) -> Reconciliation {
    let Some(linked) = world.object_state(slot).map(|state| state.region) else {
        return Reconciliation::Unchanged;
    };

    match find_new_region(world, previous.region, previous.location.xy(), blended.xy()) {
        Some(region) if region == linked => Reconciliation::Unchanged,
        Some(region) => {
            world.relink_object(slot, region);
            tracing::trace!(slot = slot.index(), region = region.index(), "object relinked");
            Reconciliation::Relinked(region)
        }
        None => {
            world.set_object_location(slot, next.location);
            if linked != next.region {
                world.relink_object(slot, next.region);
            }
            tracing::trace!(slot = slot.index(), "object snapped to tick");
            Reconciliation::Snapped
        }
    }
}

/// Reconciles the live camera after its origin was blended.
pub fn reconcile_view<W: SpatialIndex + RegionStore + ViewAccess + ?Sized>(
    world: &mut W,
    previous: &ViewSnapshot,
    next: &ViewSnapshot,
) -> Reconciliation {
    let blended = world.view().origin;

    match find_new_region(world, previous.origin_region, previous.origin.xy(), blended.xy()) {
        Some(region) => {
            let view = world.view_mut();
            if view.origin_region == region {
                Reconciliation::Unchanged
            } else {
                view.origin_region = region;
                Reconciliation::Relinked(region)
            }
        }
        None => {
            let view = world.view_mut();
            view.origin = next.origin;
            view.origin_region = next.origin_region;
            tracing::trace!("view snapped to tick");
            Reconciliation::Snapped
        }
    }
}
