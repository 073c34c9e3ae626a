//! Impactor - Asteroid Impact Visualizer
//!
//! A desktop application that flies a single asteroid at a chosen city and
//! shows what the selected mitigation does to it.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use impactor::asteroid::AsteroidPlugin;
use impactor::camera::CameraPlugin;
use impactor::render::RenderPlugin;
use impactor::simulation::SimulationPlugin;
use impactor::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Impactor".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Simulation first: the other plugins order themselves after its sets
        .add_plugins((
            SimulationPlugin,
            AsteroidPlugin,
            CameraPlugin,
            RenderPlugin,
            UiPlugin,
        ))
        .run();
}
