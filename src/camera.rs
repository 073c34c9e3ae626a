//! Camera setup for the impact visualizer.
//!
//! The camera is placed and aimed by the simulation each tick; this module
//! only spawns it with the perspective the scene expects.

use bevy::prelude::*;

/// Vertical field of view (degrees).
pub const FOV_DEGREES: f32 = 45.0;

/// Near clipping plane.
pub const NEAR_PLANE: f32 = 0.1;

/// Far clipping plane. Large enough to see the Sun from the escape boundary.
pub const FAR_PLANE: f32 = 1_000_000.0;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Plugin providing the camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

/// Spawn the main camera with a perspective projection.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        // Replaced by the session's preview framing on the first tick.
        Transform::from_xyz(0.0, 0.0, 1520.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}
