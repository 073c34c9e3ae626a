//! Per-tick mitigation policies.
//!
//! Each mode perturbs the asteroid a little every tick instead of
//! recomputing the trajectory:
//!
//! - **None**: nothing happens
//! - **Kinetic**: a constant, uncapped nudge to the velocity
//! - **Laser**: exponential shrink of the asteroid's scale while a beam
//!   tracks it from Earth

pub mod beam;

pub use beam::BeamSegment;

use crate::session::AsteroidState;
use crate::types::{MitigationMode, SimulationConfig};

/// Visual side effect of one mitigation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MitigationEffect {
    /// Nothing to show.
    Nothing,
    /// Beam should be (re)drawn along this segment.
    BeamActive(BeamSegment),
    /// Beam should be removed.
    BeamRetired,
}

impl MitigationMode {
    /// Description shown when the mode is selected.
    pub fn info(&self) -> &'static str {
        match self {
            MitigationMode::None => {
                "No prevention applied. The asteroid will impact the selected location."
            }
            MitigationMode::Kinetic => {
                "Kinetic: Slightly alters the asteroid trajectory to avoid impact."
            }
            MitigationMode::Laser => {
                "Laser: Gradually shrinks the asteroid with a laser beam from Earth."
            }
        }
    }

    /// Apply one tick of this mitigation to `state`.
    pub fn apply(&self, state: &mut AsteroidState, config: &SimulationConfig) -> MitigationEffect {
        match self {
            MitigationMode::None => MitigationEffect::Nothing,
            MitigationMode::Kinetic => {
                state.velocity.x += config.kinetic_delta;
                state.velocity.y += config.kinetic_delta;
                state.velocity.z -= config.kinetic_delta;
                MitigationEffect::Nothing
            }
            MitigationMode::Laser => {
                state.scale *= config.laser_decay;
                if state.scale > config.laser_cutoff_scale {
                    MitigationEffect::BeamActive(BeamSegment::toward(state.position))
                } else {
                    MitigationEffect::BeamRetired
                }
            }
        }
    }
}
