//! Impact explosion effect.
//!
//! An orange fireball is spawned at the impact point and animated on
//! wall-clock time, independent of the simulation: it grows and fades over
//! 700 ms, then despawns itself.

use bevy::prelude::*;

use crate::simulation::SpawnExplosion;

/// Lifetime of the explosion (seconds).
pub const EXPLOSION_DURATION_SECS: f32 = 0.7;

/// Opacity before the first animation frame.
pub const EXPLOSION_INITIAL_OPACITY: f32 = 0.8;

/// Fireball colour (#ff6600).
const EXPLOSION_RGB: (f32, f32, f32) = (1.0, 0.4, 0.0);

/// Component for an animated explosion.
#[derive(Component)]
pub struct ExplosionEffect {
    /// Real time when the effect started (seconds since startup).
    pub start_time: f32,
}

/// One sampled frame of the explosion animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionFrame {
    /// Uniform scale applied on top of the base radius.
    pub scale: f32,
    /// Material opacity.
    pub opacity: f32,
}

impl ExplosionFrame {
    /// Sample the animation `elapsed` seconds after spawn.
    ///
    /// Returns `None` once the effect has finished.
    pub fn at(elapsed: f32) -> Option<Self> {
        if !(0.0..EXPLOSION_DURATION_SECS).contains(&elapsed) {
            return None;
        }
        Some(Self {
            scale: 1.0 + elapsed,
            opacity: 1.0 - elapsed / EXPLOSION_DURATION_SECS,
        })
    }
}

fn explosion_color(opacity: f32) -> Color {
    let (r, g, b) = EXPLOSION_RGB;
    Color::srgba(r, g, b, opacity)
}

/// Spawn explosions from messages.
pub fn spawn_explosions(
    mut commands: Commands,
    mut messages: MessageReader<SpawnExplosion>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    time: Res<Time<Real>>,
) {
    for message in messages.read() {
        let mesh = meshes.add(Sphere::new(message.radius as f32).mesh().uv(32, 32));
        let material = materials.add(StandardMaterial {
            base_color: explosion_color(EXPLOSION_INITIAL_OPACITY),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });

        commands.spawn((
            ExplosionEffect {
                start_time: time.elapsed_secs(),
            },
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(message.position.as_vec3()),
        ));

        info!(
            "Explosion at ({:.1}, {:.1}, {:.1}) radius {:.2}",
            message.position.x, message.position.y, message.position.z, message.radius
        );
    }
}

/// Animate explosions and despawn finished ones.
pub fn animate_explosions(
    mut commands: Commands,
    mut effects: Query<(
        Entity,
        &ExplosionEffect,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    time: Res<Time<Real>>,
) {
    for (entity, effect, mut transform, material) in effects.iter_mut() {
        let elapsed = time.elapsed_secs() - effect.start_time;

        let Some(frame) = ExplosionFrame::at(elapsed) else {
            commands.entity(entity).despawn();
            continue;
        };

        transform.scale = Vec3::splat(frame.scale);
        if let Some(mut material) = materials.get_mut(&material.0) {
            material.base_color = explosion_color(frame.opacity);
        }
    }
}
