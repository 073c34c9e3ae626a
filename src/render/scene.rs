//! Static scene: Earth, the Sun, a starfield and lighting.

use bevy::prelude::*;
use rand::Rng;

use crate::types::EARTH_RADIUS;

/// Sun position on the x axis.
pub const SUN_X: f32 = -10_000.0;

/// Sun radius (scene units).
pub const SUN_RADIUS: f32 = 150.0;

/// Number of background stars.
pub const STAR_COUNT: usize = 1500;

/// Radius of the shell the stars sit on. Beyond the escape boundary and
/// well inside the far plane.
pub const STARFIELD_RADIUS: f32 = 100_000.0;

/// Component marking Earth.
#[derive(Component)]
pub struct Earth;

/// Component marking the Sun.
#[derive(Component)]
pub struct Sun;

/// Plugin spawning the static scene.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (spawn_bodies, spawn_starfield, spawn_lighting));
    }
}

fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    let earth_material = materials.add(StandardMaterial {
        base_color_texture: Some(asset_server.load("textures/earth.jpg")),
        perceptual_roughness: 0.9,
        ..default()
    });
    commands.spawn((
        Earth,
        Name::new("Earth"),
        Mesh3d(meshes.add(Sphere::new(EARTH_RADIUS as f32).mesh().uv(200, 200))),
        MeshMaterial3d(earth_material),
        Transform::IDENTITY,
    ));

    let sun_material = materials.add(StandardMaterial {
        base_color_texture: Some(asset_server.load("textures/sun.jpeg")),
        emissive: LinearRgba::rgb(1.0, 0.9, 0.6) * 4.0,
        unlit: true,
        ..default()
    });
    commands.spawn((
        Sun,
        Name::new("Sun"),
        Mesh3d(meshes.add(Sphere::new(SUN_RADIUS).mesh().uv(64, 64))),
        MeshMaterial3d(sun_material),
        Transform::from_xyz(SUN_X, 0.0, 0.0),
    ));

    info!("Spawned Earth and Sun");
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_star_direction(rng: &mut impl Rng) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let theta: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let ring = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(ring * theta.cos(), ring * theta.sin(), z)
}

/// Spawn a starfield of small emissive spheres around the whole scene.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 0.5,
        unlit: true,
        ..default()
    });
    let star_mesh = meshes.add(Sphere::new(60.0));

    let mut rng = rand::thread_rng();
    for _ in 0..STAR_COUNT {
        let position = random_star_direction(&mut rng) * STARFIELD_RADIUS;
        let scale = rng.gen_range(0.5..1.5);

        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::from_translation(position).with_scale(Vec3::splat(scale)),
        ));
    }

    info!("Spawned {STAR_COUNT} background stars");
}

/// Faint fill plus sunlight from the Sun's direction.
fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 80.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(SUN_X, 0.0, 0.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
