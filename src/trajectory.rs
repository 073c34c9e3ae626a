//! Straight-line approach planning.
//!
//! The asteroid starts on the ray through the target location and travels
//! radially toward Earth's centre at a constant per-tick displacement.
//! Faster asteroids start farther out so travel time stays comparable.

use bevy::math::DVec3;

use crate::types::{
    CAMERA_OFFSET_PER_SIZE, DISTANCE_PER_SPEED, EARTH_RADIUS, LASER_CAMERA_OFFSET_PER_SIZE,
    MitigationMode,
};

/// Initial conditions derived from the submitted parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectoryPlan {
    /// Asteroid start position.
    pub initial_position: DVec3,
    /// Constant per-tick displacement (before mitigation).
    pub velocity: DVec3,
    /// Camera start position; the camera looks at the origin.
    pub camera_position: DVec3,
}

/// Starting distance above the surface for a given speed.
pub fn approach_distance(velocity_scale: f64) -> f64 {
    velocity_scale * DISTANCE_PER_SPEED
}

/// Plan the approach along `direction` (a unit vector).
pub fn plan_trajectory(
    direction: DVec3,
    velocity_scale: f64,
    size_scale: f64,
    mitigation: MitigationMode,
) -> TrajectoryPlan {
    let initial_position = direction * (EARTH_RADIUS + approach_distance(velocity_scale));
    let velocity = -direction * velocity_scale;

    let mut camera_offset = CAMERA_OFFSET_PER_SIZE * size_scale;
    // Pull back so the incoming beam stays in frame.
    if mitigation == MitigationMode::Laser {
        camera_offset += LASER_CAMERA_OFFSET_PER_SIZE * size_scale;
    }

    TrajectoryPlan {
        initial_position,
        velocity,
        camera_position: initial_position + direction * camera_offset,
    }
}
