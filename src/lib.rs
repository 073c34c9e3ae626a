//! Impactor - Asteroid Impact Visualizer
//!
//! A library crate providing the impact simulation state machine and the
//! Bevy plugins that present it.

pub mod asteroid;
pub mod camera;
pub mod geo;
pub mod mitigation;
pub mod render;
pub mod session;
pub mod simulation;
pub mod trajectory;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
