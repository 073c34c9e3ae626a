//! Laser beam geometry.
//!
//! The beam runs from Earth's centre to a point well past the asteroid
//! (5× its position) so it reads clearly on screen.

use bevy::math::{DQuat, DVec3};

use crate::types::BEAM_REACH;

/// Beam radius in scene units.
pub const BEAM_RADIUS: f32 = 0.25;

/// A straight beam segment starting at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeamSegment {
    /// Far end of the beam.
    pub end: DVec3,
}

impl BeamSegment {
    /// Beam aimed through `asteroid_position`.
    pub fn toward(asteroid_position: DVec3) -> Self {
        Self {
            end: asteroid_position * BEAM_REACH,
        }
    }

    /// Beam length.
    pub fn length(&self) -> f64 {
        self.end.length()
    }

    /// Centre point, where a cylinder mesh is placed.
    pub fn midpoint(&self) -> DVec3 {
        self.end * 0.5
    }

    /// Rotation taking a +Y aligned cylinder onto the beam.
    pub fn rotation(&self) -> DQuat {
        let direction = self.end.normalize_or_zero();
        if direction == DVec3::ZERO {
            return DQuat::IDENTITY;
        }
        DQuat::from_rotation_arc(DVec3::Y, direction)
    }
}
