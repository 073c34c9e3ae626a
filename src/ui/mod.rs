//! UI module providing the egui-based launch menu and reset button.

pub mod icons;
pub mod launch_menu;
pub mod reset_button;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub use launch_menu::LaunchMenuState;
pub use reset_button::ResetButtonState;

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LaunchMenuState>()
            .init_resource::<ResetButtonState>()
            .init_resource::<icons::FontsInitialized>()
            // Message bookkeeping doesn't need the egui context
            .add_systems(Update, reset_button::track_reset_availability)
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    launch_menu::launch_menu_system,
                    reset_button::reset_button_system,
                )
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}
