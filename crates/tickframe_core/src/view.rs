//! # View State
//!
//! The live camera record. The simulation sets it from the player each tick;
//! the renderer reads it every frame.

use crate::ids::RegionId;
use crate::units::{Angle, Fixed, FixedAngle, WorldPoint3d, FIXED_ONE};

/// Live camera state read by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    /// Region the camera origin is in.
    pub origin_region: RegionId,
    /// Horizontal facing.
    pub yaw: Angle,
    /// Vertical facing.
    pub pitch: Angle,
    /// Fine horizontal facing used only for drawing.
    pub virtual_yaw: FixedAngle,
    /// Fine vertical facing used only for drawing.
    pub virtual_pitch: FixedAngle,
    /// Eye position.
    pub origin: WorldPoint3d,
    /// Lighting/fog falloff scalar.
    pub maximum_depth_intensity: Fixed,
}

impl ViewState {
    /// A camera at `origin` in `region`, facing angle zero.
    #[must_use]
    pub const fn new(origin: WorldPoint3d, region: RegionId) -> Self {
        Self {
            origin_region: region,
            yaw: 0,
            pitch: 0,
            virtual_yaw: 0,
            virtual_pitch: 0,
            origin,
            maximum_depth_intensity: FIXED_ONE,
        }
    }

    /// Sets yaw and pitch, keeping the virtual facings in step.
    pub fn look(&mut self, yaw: Angle, pitch: Angle) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.virtual_yaw = FixedAngle::from(yaw) * FIXED_ONE;
        self.virtual_pitch = FixedAngle::from(pitch) * FIXED_ONE;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(WorldPoint3d::ORIGIN, RegionId::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_sets_virtual_facings() {
        let mut view = ViewState::default();
        view.look(128, -16);

        assert_eq!(view.yaw, 128);
        assert_eq!(view.pitch, -16);
        assert_eq!(view.virtual_yaw, 128 * FIXED_ONE);
        assert_eq!(view.virtual_pitch, -16 * FIXED_ONE);
    }
}
