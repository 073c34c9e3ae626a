//! Reset button shown once a run has resolved.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::simulation::{ResetAvailable, ResetSimulation};

use super::icons;
use super::launch_menu::LaunchMenuState;

/// Whether the reset button is shown.
#[derive(Resource, Default)]
pub struct ResetButtonState {
    pub visible: bool,
}

/// Show the button when the session reports that a reset is available.
pub fn track_reset_availability(
    mut available: MessageReader<ResetAvailable>,
    mut button: ResMut<ResetButtonState>,
) {
    if available.read().next().is_some() {
        button.visible = true;
    }
}

/// System to render the reset button.
pub fn reset_button_system(
    mut contexts: EguiContexts,
    mut button: ResMut<ResetButtonState>,
    mut menu: ResMut<LaunchMenuState>,
    mut resets: MessageWriter<ResetSimulation>,
) {
    if !button.visible {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut clicked = false;
    egui::Area::new(egui::Id::new("reset_button"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -40.0))
        .show(ctx, |ui| {
            let restart = egui::Button::new(
                egui::RichText::new(format!("{} Run again", icons::RESET)).size(20.0),
            )
            .min_size(egui::vec2(160.0, 44.0));
            clicked = ui.add(restart).clicked();
        });

    if clicked {
        resets.write(ResetSimulation);
        button.visible = false;
        menu.visible = true;
    }
}
