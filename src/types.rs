//! Core simulation types and constants for the impact visualizer.

use bevy::prelude::*;
use thiserror::Error;

use crate::geo::{DEFAULT_LOCATION, find_location};

/// Scene constants (scene units)

/// Earth's nominal surface radius.
pub const EARTH_RADIUS: f64 = 1000.0;

/// Margin above the surface at which the asteroid counts as arrived.
pub const ARRIVAL_MARGIN: f64 = 20.0;

/// Radial distance at which the asteroid has left the interaction volume.
pub const ESCAPE_RADIUS: f64 = 20_000.0;

/// Extra starting distance per unit of velocity scale.
pub const DISTANCE_PER_SPEED: f64 = 500.0;

/// Camera offset behind the asteroid per unit of size scale.
pub const CAMERA_OFFSET_PER_SIZE: f64 = 20.0;

/// Additional camera offset per unit of size scale in laser mode.
pub const LASER_CAMERA_OFFSET_PER_SIZE: f64 = 10.0;

/// Per-tick velocity nudge applied by the kinetic impactor.
pub const KINETIC_DELTA: f64 = 0.0025;

/// Per-tick scale multiplier applied by the laser.
pub const LASER_DECAY: f64 = 0.99;

/// Scale at or below which the laser beam is retired.
pub const LASER_CUTOFF_SCALE: f64 = 0.2;

/// How far past the asteroid the beam is drawn, as a multiple of its position.
pub const BEAM_REACH: f64 = 5.0;

/// Spin increment per tick, multiplied by the per-run rotation rate.
pub const SPIN_STEP: f64 = 0.01;

/// Delay between a run resolving and the reset affordance appearing (seconds).
pub const RESET_DELAY_SECS: f64 = 2.0;

/// Valid range for the velocity scale.
pub const VELOCITY_RANGE: std::ops::RangeInclusive<f64> = 1.0..=20.0;

/// Valid range for the size scale.
pub const SIZE_RANGE: std::ops::RangeInclusive<f64> = 0.5..=20.0;

/// Tunable thresholds for the impact simulation.
///
/// Defaults mirror the module constants; tests and the app both use
/// `SimulationConfig::default()`.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Surface radius plus arrival margin.
    pub arrival_radius: f64,
    /// Escape boundary.
    pub escape_radius: f64,
    /// Per-tick kinetic velocity nudge.
    pub kinetic_delta: f64,
    /// Per-tick laser scale multiplier.
    pub laser_decay: f64,
    /// Scale at or below which the beam is retired.
    pub laser_cutoff_scale: f64,
    /// Delay before the reset affordance appears (seconds).
    pub reset_delay_secs: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arrival_radius: EARTH_RADIUS + ARRIVAL_MARGIN,
            escape_radius: ESCAPE_RADIUS,
            kinetic_delta: KINETIC_DELTA,
            laser_decay: LASER_DECAY,
            laser_cutoff_scale: LASER_CUTOFF_SCALE,
            reset_delay_secs: RESET_DELAY_SECS,
        }
    }
}

/// Mitigation strategy chosen by the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MitigationMode {
    /// Let the asteroid hit.
    #[default]
    None,
    /// Kinetic impactor nudging the velocity every tick.
    Kinetic,
    /// Ground-based laser shrinking the asteroid every tick.
    Laser,
}

impl MitigationMode {
    /// All modes in menu order.
    pub const ALL: [MitigationMode; 3] = [
        MitigationMode::None,
        MitigationMode::Kinetic,
        MitigationMode::Laser,
    ];

    /// Short display label.
    pub fn label(&self) -> &'static str {
        match self {
            MitigationMode::None => "None",
            MitigationMode::Kinetic => "Kinetic",
            MitigationMode::Laser => "Laser",
        }
    }

    /// Whether an arrival in this mode ends in an explosion.
    pub fn explodes_on_arrival(&self) -> bool {
        !matches!(self, MitigationMode::Laser)
    }
}

/// Errors from constructing simulation parameters outside the menu.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("unknown target location: {0}")]
    UnknownLocation(String),

    #[error("velocity scale {0} outside [1, 20]")]
    VelocityOutOfRange(f64),

    #[error("size scale {0} outside [0.5, 20]")]
    SizeOutOfRange(f64),
}

/// Snapshot of the user's choices, frozen at submission time.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParameters {
    /// Name of the target location (a key of the location table).
    pub location: &'static str,
    /// Approach speed scalar in [1, 20].
    pub velocity_scale: f64,
    /// Asteroid size scalar in [0.5, 20].
    pub size_scale: f64,
    /// Selected mitigation strategy.
    pub mitigation: MitigationMode,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION,
            velocity_scale: 1.0,
            size_scale: 1.0,
            mitigation: MitigationMode::None,
        }
    }
}

impl SimulationParameters {
    /// Validate and build a parameter snapshot.
    ///
    /// Out-of-range or non-finite scales are rejected rather than clamped.
    pub fn new(
        location: &str,
        velocity_scale: f64,
        size_scale: f64,
        mitigation: MitigationMode,
    ) -> Result<Self, ParameterError> {
        let location = find_location(location)
            .ok_or_else(|| ParameterError::UnknownLocation(location.to_string()))?
            .name;

        if !velocity_scale.is_finite() || !VELOCITY_RANGE.contains(&velocity_scale) {
            return Err(ParameterError::VelocityOutOfRange(velocity_scale));
        }
        if !size_scale.is_finite() || !SIZE_RANGE.contains(&size_scale) {
            return Err(ParameterError::SizeOutOfRange(size_scale));
        }

        Ok(Self {
            location,
            velocity_scale,
            size_scale,
            mitigation,
        })
    }

    /// Re-run the checks of [`new`](Self::new) on an existing snapshot.
    pub fn validated(&self) -> Result<Self, ParameterError> {
        Self::new(
            self.location,
            self.velocity_scale,
            self.size_scale,
            self.mitigation,
        )
    }
}
