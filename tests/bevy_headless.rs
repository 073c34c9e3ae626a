//! Headless Bevy integration tests.
//!
//! These tests verify the simulation plugin drives entities and messages
//! correctly without a GPU.

mod common;

use bevy::prelude::*;
use common::{asteroid_count, headless_app, params};
use impactor::asteroid::Asteroid;
use impactor::camera::MainCamera;
use impactor::session::{ImpactSession, Resolution, SimulationPhase};
use impactor::simulation::{
    LaserBeamChanged, ResetAvailable, ResetSimulation, SimulationSet, SpawnExplosion,
    SubmitSimulation,
};
use impactor::types::{MitigationMode, SimulationConfig};

/// Messages observed by the test recorder system.
#[derive(Resource, Default)]
struct Recorded {
    explosions: Vec<SpawnExplosion>,
    beam_updates: usize,
    beam_clears: usize,
    resets_available: usize,
}

fn record_messages(
    mut explosions: MessageReader<SpawnExplosion>,
    mut beams: MessageReader<LaserBeamChanged>,
    mut resets: MessageReader<ResetAvailable>,
    mut recorded: ResMut<Recorded>,
) {
    recorded.explosions.extend(explosions.read().copied());
    for LaserBeamChanged(segment) in beams.read() {
        if segment.is_some() {
            recorded.beam_updates += 1;
        } else {
            recorded.beam_clears += 1;
        }
    }
    recorded.resets_available += resets.read().count();
}

fn recording_app() -> App {
    let mut app = headless_app();
    app.init_resource::<Recorded>()
        .add_systems(Update, record_messages.after(SimulationSet::Tick));
    app
}

fn submit(app: &mut App, mitigation: MitigationMode) {
    app.world_mut()
        .write_message(SubmitSimulation(params("New York", 1.0, 1.0, mitigation)));
}

fn phase(app: &App) -> SimulationPhase {
    app.world().resource::<ImpactSession>().phase()
}

fn run_until_resolved(app: &mut App, max_updates: usize) {
    for _ in 0..max_updates {
        app.update();
        if matches!(phase(app), SimulationPhase::Resolved(_)) {
            return;
        }
    }
    panic!("App did not resolve within {max_updates} updates");
}

#[test]
fn test_session_resource_initializes_idle() {
    let app = headless_app();
    let session = app.world().resource::<ImpactSession>();
    assert_eq!(session.phase(), SimulationPhase::Idle);
    assert!(!session.is_asset_ready());
    assert!(app.world().contains_resource::<SimulationConfig>());
}

#[test]
fn test_submit_waits_for_asset() {
    let mut app = headless_app();
    submit(&mut app, MitigationMode::None);
    app.update();
    assert_eq!(phase(&app), SimulationPhase::AwaitingAsset);

    let before = app.world().resource::<ImpactSession>().asteroid().position;
    for _ in 0..5 {
        app.update();
    }
    let after = app.world().resource::<ImpactSession>().asteroid().position;
    assert_eq!(before, after, "Asteroid must not move before the model loads");
}

#[test]
fn test_unmitigated_run_explodes_once_and_despawns() {
    let mut app = recording_app();
    app.world_mut()
        .resource_mut::<ImpactSession>()
        .mark_asset_ready();
    submit(&mut app, MitigationMode::None);

    run_until_resolved(&mut app, 1000);
    // Flush the despawn command and the recorder.
    app.update();

    assert_eq!(phase(&app), SimulationPhase::Resolved(Resolution::Impact));
    assert_eq!(asteroid_count(&mut app), 0);

    let recorded = app.world().resource::<Recorded>();
    assert_eq!(recorded.explosions.len(), 1);
    let explosion = recorded.explosions[0];
    assert!((explosion.radius - 1.0).abs() < 1e-9);
    assert!(explosion.position.length() <= 1020.0 + 1e-9);
    assert_eq!(recorded.beam_updates, 0);
}

#[test]
fn test_asteroid_and_camera_follow_session() {
    let mut app = headless_app();
    app.world_mut()
        .resource_mut::<ImpactSession>()
        .mark_asset_ready();
    submit(&mut app, MitigationMode::None);
    for _ in 0..10 {
        app.update();
    }

    let session_position = app
        .world()
        .resource::<ImpactSession>()
        .asteroid()
        .position
        .as_vec3();
    let asteroid = app
        .world_mut()
        .query_filtered::<&Transform, With<Asteroid>>()
        .single(app.world())
        .expect("asteroid entity")
        .translation;
    assert!((asteroid - session_position).length() < 1e-3);
    assert!(asteroid.length() < 1500.0);

    let camera = *app
        .world_mut()
        .query_filtered::<&Transform, With<MainCamera>>()
        .single(app.world())
        .expect("camera entity");
    let to_asteroid = (asteroid - camera.translation).normalize();
    assert!(camera.forward().dot(to_asteroid) > 0.999);
}

#[test]
fn test_duplicate_submission_is_ignored() {
    let mut app = headless_app();
    app.world_mut()
        .resource_mut::<ImpactSession>()
        .mark_asset_ready();
    submit(&mut app, MitigationMode::None);
    app.update();
    app.update();

    submit(&mut app, MitigationMode::Laser);
    app.update();

    let session = app.world().resource::<ImpactSession>();
    assert_eq!(session.phase(), SimulationPhase::Running);
    let parameters = session.parameters().expect("run parameters");
    assert_eq!(parameters.mitigation, MitigationMode::None);
    assert_eq!(session.ticks_run(), 3);
}

#[test]
fn test_laser_run_draws_and_clears_beam() {
    let mut app = recording_app();
    app.world_mut()
        .resource_mut::<ImpactSession>()
        .mark_asset_ready();
    submit(&mut app, MitigationMode::Laser);

    run_until_resolved(&mut app, 1000);
    app.update();

    assert_eq!(phase(&app), SimulationPhase::Resolved(Resolution::Neutralized));
    let recorded = app.world().resource::<Recorded>();
    assert!(recorded.explosions.is_empty());
    // Scale reaches the cutoff on tick 161.
    assert_eq!(recorded.beam_updates, 160);
    assert_eq!(recorded.beam_clears, 1);
}

#[test]
fn test_reset_available_then_reset_returns_to_idle() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(SimulationConfig {
            reset_delay_secs: 0.0,
            ..Default::default()
        })
        .add_plugins(impactor::simulation::SimulationPlugin)
        .init_resource::<Recorded>()
        .add_systems(Update, record_messages.after(SimulationSet::Tick));
    app.world_mut().spawn((Asteroid, Transform::default()));
    app.update();

    app.world_mut()
        .resource_mut::<ImpactSession>()
        .mark_asset_ready();
    submit(&mut app, MitigationMode::None);
    run_until_resolved(&mut app, 1000);
    app.update();

    assert!(app.world().resource::<ImpactSession>().reset_available());
    assert_eq!(app.world().resource::<Recorded>().resets_available, 1);

    app.world_mut().write_message(ResetSimulation);
    app.update();

    let session = app.world().resource::<ImpactSession>();
    assert_eq!(session.phase(), SimulationPhase::Idle);
    assert!(session.parameters().is_none());
    assert!(session.accepts_submission());
    // Reset always clears a leftover beam.
    assert_eq!(app.world().resource::<Recorded>().beam_clears, 1);
}
