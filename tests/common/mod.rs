//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::prelude::*;
use impactor::asteroid::Asteroid;
use impactor::camera::MainCamera;
use impactor::session::{ImpactSession, SessionIntent, SimulationPhase};
use impactor::simulation::SimulationPlugin;
use impactor::types::{MitigationMode, SimulationParameters};

/// Frame time for driving a session directly.
pub const FRAME_SECS: f64 = 1.0 / 60.0;

/// Build validated parameters.
pub fn params(
    location: &str,
    velocity_scale: f64,
    size_scale: f64,
    mitigation: MitigationMode,
) -> SimulationParameters {
    SimulationParameters::new(location, velocity_scale, size_scale, mitigation)
        .expect("test parameters must be valid")
}

/// Session with the asteroid model already loaded.
pub fn ready_session() -> ImpactSession {
    let mut session = ImpactSession::default();
    session.mark_asset_ready();
    session
}

/// Tick until resolved; returns the intents and the number of ticks taken.
pub fn run_to_resolution(
    session: &mut ImpactSession,
    max_ticks: usize,
) -> (Vec<SessionIntent>, usize) {
    let mut intents = Vec::new();
    for tick in 1..=max_ticks {
        intents.extend(session.tick(FRAME_SECS));
        if matches!(session.phase(), SimulationPhase::Resolved(_)) {
            return (intents, tick);
        }
    }
    panic!("Session did not resolve within {max_ticks} ticks");
}

/// Count explosion intents.
pub fn explosion_count(intents: &[SessionIntent]) -> usize {
    intents
        .iter()
        .filter(|i| matches!(i, SessionIntent::SpawnExplosion { .. }))
        .count()
}

/// Headless app with the simulation plugin, an asteroid and a camera.
///
/// The app has already run its startup schedules.
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(SimulationPlugin);
    app.world_mut().spawn((Asteroid, Transform::default()));
    app.world_mut().spawn((MainCamera, Transform::default()));
    app.update();
    app
}

/// Number of asteroid entities in the world.
pub fn asteroid_count(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<Entity, With<Asteroid>>()
        .iter(app.world())
        .count()
}
