//! Launch menu.
//!
//! Lets the user pick a target, speed, size and mitigation, then submits a
//! frozen parameter snapshot. The menu hides once a run is submitted and
//! comes back after a reset.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::geo::{DEFAULT_LOCATION, LOCATIONS};
use crate::simulation::SubmitSimulation;
use crate::types::{
    MitigationMode, ParameterError, SIZE_RANGE, SimulationParameters, VELOCITY_RANGE,
};

use super::icons;

/// Slider step for the velocity scale.
pub const VELOCITY_STEP: f64 = 1.0;

/// Slider step for the size scale.
pub const SIZE_STEP: f64 = 0.5;

/// Editable menu state. Edits never reach a running simulation; only the
/// snapshot taken on submit does.
#[derive(Resource, Clone, Debug)]
pub struct LaunchMenuState {
    /// Index into [`LOCATIONS`].
    pub location_index: usize,
    pub velocity_scale: f64,
    pub size_scale: f64,
    pub mitigation: MitigationMode,
    /// Whether the menu is shown.
    pub visible: bool,
}

impl Default for LaunchMenuState {
    fn default() -> Self {
        let defaults = SimulationParameters::default();
        Self {
            location_index: LOCATIONS
                .iter()
                .position(|loc| loc.name == DEFAULT_LOCATION)
                .unwrap_or(0),
            velocity_scale: defaults.velocity_scale,
            size_scale: defaults.size_scale,
            mitigation: defaults.mitigation,
            visible: true,
        }
    }
}

impl LaunchMenuState {
    /// Name of the selected location.
    pub fn location_name(&self) -> &'static str {
        LOCATIONS
            .get(self.location_index)
            .map(|loc| loc.name)
            .unwrap_or(DEFAULT_LOCATION)
    }

    /// Freeze the current selection into parameters.
    pub fn snapshot(&self) -> Result<SimulationParameters, ParameterError> {
        SimulationParameters::new(
            self.location_name(),
            self.velocity_scale,
            self.size_scale,
            self.mitigation,
        )
    }
}

/// System to render the launch menu.
pub fn launch_menu_system(
    mut contexts: EguiContexts,
    mut menu: ResMut<LaunchMenuState>,
    mut submissions: MessageWriter<SubmitSimulation>,
) {
    if !menu.visible {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let state = &mut *menu;
    let mut submit_clicked = false;

    egui::Window::new("Main menu")
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
        .resizable(false)
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 8.0;

            egui::ComboBox::from_label(format!("{} Impact Location", icons::TARGET))
                .selected_text(state.location_name())
                .show_ui(ui, |ui| {
                    for (idx, location) in LOCATIONS.iter().enumerate() {
                        ui.selectable_value(&mut state.location_index, idx, location.name);
                    }
                });

            ui.add(
                egui::Slider::new(&mut state.velocity_scale, VELOCITY_RANGE)
                    .step_by(VELOCITY_STEP)
                    .text("Velocity"),
            );
            ui.add(
                egui::Slider::new(&mut state.size_scale, SIZE_RANGE)
                    .step_by(SIZE_STEP)
                    .text("Size"),
            );

            let previous = state.mitigation;
            egui::ComboBox::from_label("Prevention")
                .selected_text(format!(
                    "{} {}",
                    icons::mitigation_icon(state.mitigation),
                    state.mitigation.label()
                ))
                .show_ui(ui, |ui| {
                    for mode in MitigationMode::ALL {
                        ui.selectable_value(
                            &mut state.mitigation,
                            mode,
                            format!("{} {}", icons::mitigation_icon(mode), mode.label()),
                        );
                    }
                });
            if state.mitigation != previous {
                debug!("Mitigation changed to {}", state.mitigation.label());
            }

            ui.label(format!("{} {}", icons::INFO, state.mitigation.info()));

            ui.add_space(4.0);
            let button = egui::Button::new(
                egui::RichText::new(format!("{} Submit", icons::LAUNCH)).size(16.0),
            );
            if ui.add(button).clicked() {
                submit_clicked = true;
            }
        });

    if submit_clicked {
        match state.snapshot() {
            Ok(parameters) => {
                submissions.write(SubmitSimulation(parameters));
                state.visible = false;
            }
            Err(err) => warn!("Cannot submit: {err}"),
        }
    }
}
