//! Bevy adapter driving the impact session.
//!
//! Runs the session once per rendered frame in `Update` and turns its
//! intents into entity mutations and messages:
//! - Asteroid and camera transforms are written directly
//! - Explosions, beam changes and reset availability become messages for
//!   the render and UI plugins
//! - Despawn requests remove the asteroid entity
//!
//! Nothing here needs a GPU, so the plugin works under `MinimalPlugins`.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::asteroid::{Asteroid, AsteroidModel, spawn_asteroid};
use crate::camera::MainCamera;
use crate::mitigation::BeamSegment;
use crate::session::{ImpactSession, SessionIntent, SubmitOutcome};
use crate::types::{SimulationConfig, SimulationParameters};

/// Request to start a run with the given parameters.
#[derive(Message, Clone, Debug)]
pub struct SubmitSimulation(pub SimulationParameters);

/// Request to return to the idle state.
#[derive(Message, Clone, Debug)]
pub struct ResetSimulation;

/// Explosion to spawn at impact.
#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnExplosion {
    /// Impact point (scene units).
    pub position: DVec3,
    /// Base radius of the fireball.
    pub radius: f64,
}

/// Laser beam changed: `Some` to draw or move it, `None` to remove it.
#[derive(Message, Clone, Copy, Debug)]
pub struct LaserBeamChanged(pub Option<BeamSegment>);

/// The run has been over long enough to offer a reset.
#[derive(Message, Clone, Copy, Debug)]
pub struct ResetAvailable;

/// System set for ordering simulation systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Submission and reset requests.
    Requests,
    /// The per-frame tick and intent dispatch.
    Tick,
}

/// Plugin providing the impact simulation.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>()
            .add_message::<SubmitSimulation>()
            .add_message::<ResetSimulation>()
            .add_message::<SpawnExplosion>()
            .add_message::<LaserBeamChanged>()
            .add_message::<ResetAvailable>()
            .add_systems(PreStartup, init_session)
            .configure_sets(Update, (SimulationSet::Requests, SimulationSet::Tick).chain())
            .add_systems(
                Update,
                (handle_reset, handle_submissions)
                    .chain()
                    .in_set(SimulationSet::Requests),
            )
            .add_systems(Update, tick_session.in_set(SimulationSet::Tick));
    }
}

/// Create the session from the configured thresholds.
fn init_session(mut commands: Commands, config: Res<SimulationConfig>) {
    commands.insert_resource(ImpactSession::new(config.clone()));
}

/// Freeze submitted parameters into the session.
fn handle_submissions(
    mut requests: MessageReader<SubmitSimulation>,
    mut session: ResMut<ImpactSession>,
) {
    for SubmitSimulation(parameters) in requests.read() {
        match session.submit(parameters.clone()) {
            SubmitOutcome::Started => info!("Simulation started"),
            SubmitOutcome::Deferred => info!("Simulation queued until the asteroid loads"),
            SubmitOutcome::Ignored => debug!("Duplicate submission ignored"),
            SubmitOutcome::Rejected(err) => warn!("Submission rejected: {err}"),
        }
    }
}

/// Handle reset requests.
///
/// Despawns any leftover asteroid, resets the session and spawns a fresh
/// asteroid entity when the model handle is available.
fn handle_reset(
    mut commands: Commands,
    mut requests: MessageReader<ResetSimulation>,
    mut session: ResMut<ImpactSession>,
    mut beams: MessageWriter<LaserBeamChanged>,
    asteroids: Query<Entity, With<Asteroid>>,
    model: Option<Res<AsteroidModel>>,
) {
    // Only process if there's a reset request
    if requests.read().next().is_none() {
        return;
    }
    requests.clear();

    for entity in asteroids.iter() {
        commands.entity(entity).despawn();
    }
    beams.write(LaserBeamChanged(None));
    session.reset();

    if let Some(model) = model {
        spawn_asteroid(&mut commands, &model);
    } else {
        warn!("No asteroid model loaded; reset leaves the scene empty");
    }
}

/// Advance the session one frame and apply its intents.
fn tick_session(
    mut commands: Commands,
    time: Res<Time>,
    mut session: ResMut<ImpactSession>,
    mut asteroids: Query<(Entity, &mut Transform), (With<Asteroid>, Without<MainCamera>)>,
    mut cameras: Query<&mut Transform, (With<MainCamera>, Without<Asteroid>)>,
    mut explosions: MessageWriter<SpawnExplosion>,
    mut beams: MessageWriter<LaserBeamChanged>,
    mut resets: MessageWriter<ResetAvailable>,
) {
    for intent in session.tick(time.delta_secs_f64()) {
        match intent {
            SessionIntent::AsteroidTransform {
                position,
                scale,
                rotation,
            } => {
                for (_, mut transform) in asteroids.iter_mut() {
                    transform.translation = position.as_vec3();
                    transform.scale = Vec3::splat(scale as f32);
                    transform.rotation = Quat::from_euler(
                        EulerRot::XYZ,
                        rotation.x as f32,
                        rotation.y as f32,
                        rotation.z as f32,
                    );
                }
            }
            SessionIntent::CameraTransform { position, target } => {
                let Ok(mut transform) = cameras.single_mut() else {
                    warn!("No main camera to place");
                    continue;
                };
                *transform = Transform::from_translation(position.as_vec3())
                    .looking_at(target.as_vec3(), Vec3::Y);
            }
            SessionIntent::BeamUpdated(segment) => {
                beams.write(LaserBeamChanged(Some(segment)));
            }
            SessionIntent::BeamRetired => {
                beams.write(LaserBeamChanged(None));
            }
            SessionIntent::SpawnExplosion { position, radius } => {
                explosions.write(SpawnExplosion { position, radius });
            }
            SessionIntent::DespawnAsteroid => {
                for (entity, _) in asteroids.iter() {
                    commands.entity(entity).despawn();
                }
            }
            SessionIntent::ResetAvailable => {
                resets.write(ResetAvailable);
            }
        }
    }
}
