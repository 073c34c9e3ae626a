//! Test utilities for impact simulation tests.
//!
//! Provides fixtures for building sessions and parameter snapshots, and
//! helpers for driving a session to completion.

use crate::session::{ImpactSession, SessionIntent, SimulationPhase};
use crate::types::{MitigationMode, SimulationParameters};

/// Frame time used when a test does not care about wall-clock time.
pub const FRAME_SECS: f64 = 1.0 / 60.0;

/// Fixtures for creating sessions and parameters.
pub mod fixtures {
    use super::*;

    /// Build validated parameters, panicking on invalid input.
    pub fn params(
        location: &str,
        velocity_scale: f64,
        size_scale: f64,
        mitigation: MitigationMode,
    ) -> SimulationParameters {
        SimulationParameters::new(location, velocity_scale, size_scale, mitigation)
            .expect("test parameters must be valid")
    }

    /// Idle session whose asteroid model is already loaded.
    pub fn ready_session() -> ImpactSession {
        let mut session = ImpactSession::default();
        session.mark_asset_ready();
        session
    }

    /// Tick until the session leaves `Running`, collecting every intent.
    ///
    /// # Panics
    /// Panics if the run is still going after `max_ticks`.
    pub fn run_until_resolved(
        session: &mut ImpactSession,
        max_ticks: usize,
    ) -> Vec<SessionIntent> {
        let mut intents = Vec::new();
        for _ in 0..max_ticks {
            intents.extend(session.tick(FRAME_SECS));
            if matches!(session.phase(), SimulationPhase::Resolved(_)) {
                return intents;
            }
        }
        panic!(
            "Session did not resolve within {max_ticks} ticks (phase {:?}, r = {:.1})",
            session.phase(),
            session.asteroid().position.length()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_session_is_idle_and_loaded() {
        let session = fixtures::ready_session();
        assert!(session.is_asset_ready());
        assert_eq!(session.phase(), SimulationPhase::Idle);
    }

    #[test]
    fn test_run_until_resolved_stops_at_resolution() {
        let mut session = fixtures::ready_session();
        session.submit(fixtures::params("Paris", 1.0, 1.0, MitigationMode::None));
        fixtures::run_until_resolved(&mut session, 1_000);
        assert!(matches!(session.phase(), SimulationPhase::Resolved(_)));
    }
}
