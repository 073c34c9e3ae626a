//! Rendering systems for the impact visualizer.
//!
//! This module provides the static scene and the transient visuals the
//! simulation asks for (explosion, laser beam).

pub mod effects;
pub mod laser;
mod scene;

use bevy::prelude::*;

use self::effects::{animate_explosions, spawn_explosions};
use self::laser::update_laser_beam;
use self::scene::ScenePlugin;
use crate::simulation::SimulationSet;

pub use self::scene::{Earth, Sun};

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ScenePlugin).add_systems(
            Update,
            (spawn_explosions, animate_explosions, update_laser_beam)
                .chain()
                .after(SimulationSet::Tick),
        );
    }
}
