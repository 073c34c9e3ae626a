//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

/// Launch/submit icon
pub const LAUNCH: &str = egui_phosphor::regular::SHOOTING_STAR;
/// Reset/reload icon (circular arrow)
pub const RESET: &str = egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE;
/// Target location icon
pub const TARGET: &str = egui_phosphor::regular::GLOBE;
/// Info icon for the mitigation description
pub const INFO: &str = egui_phosphor::regular::INFO;

/// Icon for a mitigation mode.
pub fn mitigation_icon(mode: crate::types::MitigationMode) -> &'static str {
    use crate::types::MitigationMode;
    match mode {
        MitigationMode::None => egui_phosphor::regular::WARNING,
        MitigationMode::Kinetic => egui_phosphor::regular::ROCKET,
        MitigationMode::Laser => egui_phosphor::regular::CROSSHAIR,
    }
}
