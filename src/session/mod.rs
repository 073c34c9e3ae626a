//! Impact simulation state machine.
//!
//! `ImpactSession` owns everything about a single run: the frozen
//! parameters, the asteroid's state, the camera framing and the lifecycle
//! phase. It never touches the ECS directly. Every tick returns a list of
//! [`SessionIntent`]s that the Bevy adapter in `crate::simulation` applies
//! to entities, which keeps the whole state machine testable without an app.
//!
//! Phases:
//!
//! ```text
//!   Idle ──submit──▶ AwaitingAsset ──asset ready──▶ Running ──arrival/escape──▶ Resolved
//!     │                                                ▲
//!     └──────────submit (asset already ready)──────────┘
//! ```
//!
//! `Resolved` is terminal until [`ImpactSession::reset`].

#[cfg(test)]
mod proptest_session;

use bevy::math::DVec3;
use bevy::prelude::*;
use rand::Rng;

use crate::geo::find_location;
use crate::mitigation::{BeamSegment, MitigationEffect};
use crate::trajectory::plan_trajectory;
use crate::types::{
    MitigationMode, ParameterError, SPIN_STEP, SimulationConfig, SimulationParameters,
};

/// Mutable physical state of the asteroid.
#[derive(Clone, Debug, PartialEq)]
pub struct AsteroidState {
    /// Position in scene units, Earth at the origin.
    pub position: DVec3,
    /// Per-tick displacement.
    pub velocity: DVec3,
    /// Uniform scale of the model.
    pub scale: f64,
    /// Accumulated Euler rotation (radians, XYZ).
    pub rotation: DVec3,
    /// Spin rate per axis, fixed for the run.
    pub rotation_rate: DVec3,
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Reached the surface and exploded.
    Impact,
    /// Reached the surface in laser mode; no explosion.
    Neutralized,
    /// Left the interaction volume.
    Escaped,
}

/// Lifecycle phase of the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimulationPhase {
    /// Waiting for the user to submit.
    #[default]
    Idle,
    /// Submitted, but the asteroid model has not finished loading.
    AwaitingAsset,
    /// Advancing once per tick.
    Running,
    /// Finished; only a reset leaves this phase.
    Resolved(Resolution),
}

/// Result of a submission attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Simulation is running from the next tick.
    Started,
    /// Initial conditions are set; integration starts once the asset loads.
    Deferred,
    /// A run is already in progress or resolved; nothing changed.
    Ignored,
    /// The parameters failed validation; the session stays idle.
    Rejected(ParameterError),
}

/// Presentation request emitted by the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionIntent {
    /// Place the asteroid entity.
    AsteroidTransform {
        position: DVec3,
        scale: f64,
        rotation: DVec3,
    },
    /// Place the camera and aim it.
    CameraTransform { position: DVec3, target: DVec3 },
    /// Draw (or move) the laser beam.
    BeamUpdated(BeamSegment),
    /// Remove the laser beam.
    BeamRetired,
    /// Spawn the impact explosion.
    SpawnExplosion { position: DVec3, radius: f64 },
    /// Remove the asteroid entity.
    DespawnAsteroid,
    /// Show the reset affordance.
    ResetAvailable,
}

/// Explosion radius for an impact: `scale · cbrt(v²)`.
pub fn explosion_radius(scale: f64, velocity_scale: f64) -> f64 {
    scale * (velocity_scale * velocity_scale).cbrt()
}

/// The simulation session. One per app.
#[derive(Resource, Debug)]
pub struct ImpactSession {
    config: SimulationConfig,
    phase: SimulationPhase,
    parameters: Option<SimulationParameters>,
    asteroid: AsteroidState,
    camera_position: DVec3,
    camera_target: DVec3,
    asset_ready: bool,
    beam_active: bool,
    explosions: u32,
    ticks: u64,
    /// Seconds left before the reset affordance appears.
    reset_countdown: Option<f64>,
    reset_available: bool,
    outbox: Vec<SessionIntent>,
}

impl Default for ImpactSession {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl ImpactSession {
    /// Create an idle session showing the default preview placement.
    pub fn new(config: SimulationConfig) -> Self {
        let mut session = Self {
            config,
            phase: SimulationPhase::Idle,
            parameters: None,
            asteroid: AsteroidState {
                position: DVec3::ZERO,
                velocity: DVec3::ZERO,
                scale: 1.0,
                rotation: DVec3::ZERO,
                rotation_rate: DVec3::ZERO,
            },
            camera_position: DVec3::ZERO,
            camera_target: DVec3::ZERO,
            asset_ready: false,
            beam_active: false,
            explosions: 0,
            ticks: 0,
            reset_countdown: None,
            reset_available: false,
            outbox: Vec::new(),
        };
        session.place_preview();
        session
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    /// Parameters of the current run, if one was submitted.
    pub fn parameters(&self) -> Option<&SimulationParameters> {
        self.parameters.as_ref()
    }

    pub fn asteroid(&self) -> &AsteroidState {
        &self.asteroid
    }

    pub fn camera_position(&self) -> DVec3 {
        self.camera_position
    }

    pub fn camera_target(&self) -> DVec3 {
        self.camera_target
    }

    pub fn is_asset_ready(&self) -> bool {
        self.asset_ready
    }

    pub fn is_beam_active(&self) -> bool {
        self.beam_active
    }

    /// Number of explosions spawned this run (0 or 1).
    pub fn explosion_count(&self) -> u32 {
        self.explosions
    }

    /// Ticks spent in `Running`, including the resolving tick.
    pub fn ticks_run(&self) -> u64 {
        self.ticks
    }

    pub fn reset_available(&self) -> bool {
        self.reset_available
    }

    /// Whether the user may still submit.
    pub fn accepts_submission(&self) -> bool {
        self.phase == SimulationPhase::Idle
    }

    /// Freeze `parameters` and compute the initial conditions.
    ///
    /// Only the first submission after start-up or reset is accepted.
    pub fn submit(&mut self, parameters: SimulationParameters) -> SubmitOutcome {
        let mut rng = rand::thread_rng();
        let spin = DVec3::new(
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
        );
        self.submit_with_spin(parameters, spin)
    }

    /// Like [`submit`](Self::submit) with an explicit spin rate.
    pub fn submit_with_spin(
        &mut self,
        parameters: SimulationParameters,
        rotation_rate: DVec3,
    ) -> SubmitOutcome {
        if !self.accepts_submission() {
            debug!("Ignoring submission while {:?}", self.phase);
            return SubmitOutcome::Ignored;
        }

        // Snapshots can be built field by field, so check them again here.
        let parameters = match parameters.validated() {
            Ok(parameters) => parameters,
            Err(err) => {
                warn!("Rejecting submission: {err}");
                return SubmitOutcome::Rejected(err);
            }
        };
        let Some(target) = find_location(parameters.location) else {
            return SubmitOutcome::Rejected(ParameterError::UnknownLocation(
                parameters.location.to_string(),
            ));
        };
        let location = target.unit_direction();
        let plan = plan_trajectory(
            location,
            parameters.velocity_scale,
            parameters.size_scale,
            parameters.mitigation,
        );

        self.asteroid = AsteroidState {
            position: plan.initial_position,
            velocity: plan.velocity,
            scale: parameters.size_scale,
            rotation: DVec3::ZERO,
            rotation_rate,
        };
        self.camera_position = plan.camera_position;
        self.camera_target = DVec3::ZERO;
        self.explosions = 0;
        self.ticks = 0;

        info!(
            "Launching asteroid at {} (speed {}, size {}, mitigation {})",
            parameters.location,
            parameters.velocity_scale,
            parameters.size_scale,
            parameters.mitigation.label(),
        );
        self.parameters = Some(parameters);
        self.push_placement();

        if self.asset_ready {
            self.phase = SimulationPhase::Running;
            SubmitOutcome::Started
        } else {
            info!("Asteroid model still loading, deferring start");
            self.phase = SimulationPhase::AwaitingAsset;
            SubmitOutcome::Deferred
        }
    }

    /// Record that the asteroid model finished loading.
    pub fn mark_asset_ready(&mut self) {
        if self.asset_ready {
            return;
        }
        self.asset_ready = true;
        // Re-place in case the model arrived after its transform was set.
        self.push_placement();
        if self.phase == SimulationPhase::AwaitingAsset {
            info!("Asteroid model loaded, starting deferred run");
            self.phase = SimulationPhase::Running;
        }
    }

    /// Advance one frame. `delta_secs` is wall-clock frame time and only
    /// drives the reset delay; motion advances a fixed step per tick.
    pub fn tick(&mut self, delta_secs: f64) -> Vec<SessionIntent> {
        match self.phase {
            SimulationPhase::Running => self.step(),
            SimulationPhase::Resolved(_) => self.count_down_reset(delta_secs),
            SimulationPhase::Idle | SimulationPhase::AwaitingAsset => {}
        }
        std::mem::take(&mut self.outbox)
    }

    /// Return to `Idle` with the preview placement, ready for a new run.
    pub fn reset(&mut self) {
        info!("Resetting impact session");
        self.phase = SimulationPhase::Idle;
        self.parameters = None;
        self.beam_active = false;
        self.explosions = 0;
        self.ticks = 0;
        self.reset_countdown = None;
        self.reset_available = false;
        self.outbox.clear();
        self.place_preview();
    }

    fn place_preview(&mut self) {
        let defaults = SimulationParameters::default();
        let direction = find_location(defaults.location)
            .map(|loc| loc.unit_direction())
            .unwrap_or(DVec3::Z);
        let plan = plan_trajectory(
            direction,
            defaults.velocity_scale,
            defaults.size_scale,
            defaults.mitigation,
        );
        self.asteroid = AsteroidState {
            position: plan.initial_position,
            velocity: plan.velocity,
            scale: defaults.size_scale,
            rotation: DVec3::ZERO,
            rotation_rate: DVec3::ZERO,
        };
        self.camera_position = plan.camera_position;
        self.camera_target = DVec3::ZERO;
        self.push_placement();
    }

    fn push_placement(&mut self) {
        self.outbox.push(SessionIntent::AsteroidTransform {
            position: self.asteroid.position,
            scale: self.asteroid.scale,
            rotation: self.asteroid.rotation,
        });
        self.outbox.push(SessionIntent::CameraTransform {
            position: self.camera_position,
            target: self.camera_target,
        });
    }

    fn step(&mut self) {
        let mitigation = self.mitigation();
        self.ticks += 1;

        match mitigation.apply(&mut self.asteroid, &self.config) {
            MitigationEffect::Nothing => {}
            MitigationEffect::BeamActive(segment) => {
                self.beam_active = true;
                self.outbox.push(SessionIntent::BeamUpdated(segment));
            }
            MitigationEffect::BeamRetired => self.retire_beam(),
        }

        let r = self.asteroid.position.length();
        if r <= self.config.arrival_radius {
            self.arrive(mitigation);
        } else if r >= self.config.escape_radius {
            info!("Asteroid escaped at r = {r:.1}");
            self.resolve(Resolution::Escaped);
        } else {
            self.integrate();
        }
    }

    fn arrive(&mut self, mitigation: MitigationMode) {
        let resolution = if mitigation.explodes_on_arrival() {
            let velocity_scale = self
                .parameters
                .as_ref()
                .map(|p| p.velocity_scale)
                .unwrap_or(1.0);
            let radius = explosion_radius(self.asteroid.scale, velocity_scale);
            self.explosions += 1;
            self.outbox.push(SessionIntent::SpawnExplosion {
                position: self.asteroid.position,
                radius,
            });
            info!("IMPACT! explosion radius {radius:.2} after {} ticks", self.ticks);
            Resolution::Impact
        } else {
            info!(
                "Asteroid reached the surface at scale {:.3}, no explosion",
                self.asteroid.scale
            );
            Resolution::Neutralized
        };

        self.outbox.push(SessionIntent::DespawnAsteroid);
        self.resolve(resolution);
    }

    fn resolve(&mut self, resolution: Resolution) {
        self.retire_beam();
        self.phase = SimulationPhase::Resolved(resolution);
        self.reset_countdown = Some(self.config.reset_delay_secs);
    }

    fn retire_beam(&mut self) {
        if self.beam_active {
            self.beam_active = false;
            self.outbox.push(SessionIntent::BeamRetired);
        }
    }

    fn integrate(&mut self) {
        let velocity = self.asteroid.velocity;
        self.asteroid.position += velocity;
        self.asteroid.rotation += self.asteroid.rotation_rate * SPIN_STEP;
        self.camera_position += velocity;
        self.camera_target = self.asteroid.position;
        self.push_placement();
    }

    fn count_down_reset(&mut self, delta_secs: f64) {
        let Some(remaining) = self.reset_countdown.as_mut() else {
            return;
        };
        *remaining -= delta_secs;
        if *remaining <= 0.0 {
            self.reset_countdown = None;
            self.reset_available = true;
            self.outbox.push(SessionIntent::ResetAvailable);
            debug!("Reset now available");
        }
    }

    fn mitigation(&self) -> MitigationMode {
        self.parameters
            .as_ref()
            .map(|p| p.mitigation)
            .unwrap_or_default()
    }
}
