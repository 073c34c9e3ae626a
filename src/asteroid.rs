//! Asteroid entity definition, model loading and spawning.
//!
//! The asteroid is a glTF scene loaded asynchronously. The entity exists
//! from start-up; the session only starts integrating once the model has
//! finished loading, which `watch_asteroid_load` reports by polling the
//! asset server.

use bevy::prelude::*;

use crate::session::ImpactSession;

/// Asset path of the asteroid model.
pub const ASTEROID_MODEL_PATH: &str = "models/meteorModel.glb";

/// Marker component identifying the simulated asteroid.
#[derive(Component, Default)]
pub struct Asteroid;

/// Handle to the asteroid scene, kept so the asteroid can be respawned.
#[derive(Resource, Clone, Debug)]
pub struct AsteroidModel(pub Handle<Scene>);

/// Plugin loading the asteroid model and reporting load completion.
pub struct AsteroidPlugin;

impl Plugin for AsteroidPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_asteroid_model)
            .add_systems(Update, watch_asteroid_load);
    }
}

/// Spawn the asteroid entity from the loaded model.
///
/// The transform is left at identity; the session places it on the next
/// tick.
pub fn spawn_asteroid(commands: &mut Commands, model: &AsteroidModel) -> Entity {
    commands
        .spawn((
            Asteroid,
            Name::new("Asteroid"),
            SceneRoot(model.0.clone()),
            Transform::default(),
        ))
        .id()
}

/// Startup system: start loading the model and spawn the entity.
fn load_asteroid_model(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load(GltfAssetLabel::Scene(0).from_asset(ASTEROID_MODEL_PATH));
    let model = AsteroidModel(handle);

    spawn_asteroid(&mut commands, &model);
    commands.insert_resource(model);

    info!("Loading asteroid model from {ASTEROID_MODEL_PATH}");
}

/// Mark the session's asset as ready once the scene and its dependencies
/// have loaded.
fn watch_asteroid_load(
    asset_server: Res<AssetServer>,
    model: Option<Res<AsteroidModel>>,
    mut session: ResMut<ImpactSession>,
) {
    if session.is_asset_ready() {
        return;
    }
    let Some(model) = model else {
        return;
    };

    if asset_server.is_loaded_with_dependencies(model.0.id()) {
        info!("Asteroid model ready");
        session.mark_asset_ready();
    }
}
