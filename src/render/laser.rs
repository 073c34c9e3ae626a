//! Laser beam visual.
//!
//! A single unit-height cylinder stretched along the beam segment. The
//! entity is spawned on the first update, moved on later ones and removed
//! when the beam retires.

use bevy::prelude::*;

use crate::mitigation::beam::{BEAM_RADIUS, BeamSegment};
use crate::simulation::LaserBeamChanged;

/// Marker component for the beam entity.
#[derive(Component)]
pub struct LaserBeam;

/// Transform placing a unit cylinder along `segment`.
pub fn beam_transform(segment: &BeamSegment) -> Transform {
    Transform {
        translation: segment.midpoint().as_vec3(),
        rotation: segment.rotation().as_quat(),
        scale: Vec3::new(1.0, segment.length() as f32, 1.0),
    }
}

/// Apply the latest beam change of this frame.
pub fn update_laser_beam(
    mut commands: Commands,
    mut changes: MessageReader<LaserBeamChanged>,
    mut beams: Query<(Entity, &mut Transform), With<LaserBeam>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(LaserBeamChanged(change)) = changes.read().last().copied() else {
        return;
    };

    match change {
        Some(segment) => {
            if let Ok((_, mut transform)) = beams.single_mut() {
                *transform = beam_transform(&segment);
                return;
            }

            commands.spawn((
                LaserBeam,
                Mesh3d(meshes.add(Cylinder::new(BEAM_RADIUS, 1.0))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(1.0, 0.0, 0.0),
                    unlit: true,
                    ..default()
                })),
                beam_transform(&segment),
            ));
            debug!("Laser beam engaged");
        }
        None => {
            for (entity, _) in beams.iter() {
                commands.entity(entity).despawn();
                debug!("Laser beam retired");
            }
        }
    }
}
