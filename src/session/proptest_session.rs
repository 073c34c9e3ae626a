//! Property-based tests for the impact session using proptest.
//!
//! These tests check the per-tick invariants across the full parameter
//! space the menu allows.

use approx::relative_eq;
use bevy::math::DVec3;
use proptest::prelude::*;

use super::{ImpactSession, Resolution, SessionIntent, SimulationPhase};
use crate::geo::LOCATIONS;
use crate::test_utils::{FRAME_SECS, fixtures};
use crate::types::{MitigationMode, SimulationConfig};

fn location() -> impl Strategy<Value = &'static str> {
    (0..LOCATIONS.len()).prop_map(|i| LOCATIONS[i].name)
}

/// Menu values: velocity in whole steps, size in half steps.
fn velocity_scale() -> impl Strategy<Value = f64> {
    (1u32..=20).prop_map(f64::from)
}

fn size_scale() -> impl Strategy<Value = f64> {
    (1u32..=40).prop_map(|half_steps| f64::from(half_steps) * 0.5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The kinetic nudge accumulates linearly on x/y and z.
    #[test]
    fn prop_kinetic_velocity_drift_is_linear(
        loc in location(),
        v in velocity_scale(),
        ticks in 1usize..200,
    ) {
        let mut session = fixtures::ready_session();
        session.submit(fixtures::params(loc, v, 1.0, MitigationMode::Kinetic));
        let initial = session.asteroid().velocity;

        for _ in 0..ticks {
            session.tick(FRAME_SECS);
        }
        prop_assume!(session.phase() == SimulationPhase::Running);

        let drift = session.asteroid().velocity - initial;
        let expected = 0.0025 * ticks as f64;
        prop_assert!(relative_eq!(drift.x, expected, epsilon = 1e-9));
        prop_assert!(relative_eq!(drift.y, expected, epsilon = 1e-9));
        prop_assert!(relative_eq!(drift.z, -expected, epsilon = 1e-9));
    }

    /// Laser scale decays geometrically and the beam is live iff scale > 0.2.
    #[test]
    fn prop_laser_scale_decays_geometrically(
        loc in location(),
        size in size_scale(),
        ticks in 1usize..400,
    ) {
        let mut session = fixtures::ready_session();
        session.submit(fixtures::params(loc, 1.0, size, MitigationMode::Laser));
        let initial_velocity = session.asteroid().velocity;

        for _ in 0..ticks {
            session.tick(FRAME_SECS);
        }
        prop_assume!(session.phase() == SimulationPhase::Running);

        let scale = session.asteroid().scale;
        let expected = size * 0.99f64.powi(ticks as i32);
        prop_assert!(relative_eq!(scale, expected, max_relative = 1e-9));
        prop_assert_eq!(session.is_beam_active(), scale > 0.2);
        prop_assert_eq!(session.asteroid().velocity, initial_velocity);
    }

    /// Unmitigated runs always end in exactly one explosion.
    #[test]
    fn prop_unmitigated_run_explodes_once(
        loc in location(),
        v in velocity_scale(),
        size in size_scale(),
    ) {
        let mut session = fixtures::ready_session();
        session.submit(fixtures::params(loc, v, size, MitigationMode::None));
        let intents = fixtures::run_until_resolved(&mut session, 2_000);

        prop_assert_eq!(session.phase(), SimulationPhase::Resolved(Resolution::Impact));
        let explosions = intents
            .iter()
            .filter(|i| matches!(i, SessionIntent::SpawnExplosion { .. }))
            .count();
        prop_assert_eq!(explosions, 1);
        prop_assert!(session.asteroid().position.length() <= 1020.0);
    }

    /// Resolution happens exactly at the first tick that starts inside a
    /// boundary, arrival taking priority over escape.
    #[test]
    fn prop_resolution_matches_radius(
        start in 500.0f64..25_000.0,
    ) {
        let config = SimulationConfig::default();
        let mut session = fixtures::ready_session();
        session.submit(fixtures::params("Paris", 1.0, 1.0, MitigationMode::None));
        session.asteroid.position = DVec3::new(0.0, start, 0.0);
        session.tick(FRAME_SECS);

        let phase = session.phase();
        if start <= config.arrival_radius {
            prop_assert_eq!(phase, SimulationPhase::Resolved(Resolution::Impact));
        } else if start >= config.escape_radius {
            prop_assert_eq!(phase, SimulationPhase::Resolved(Resolution::Escaped));
        } else {
            prop_assert_eq!(phase, SimulationPhase::Running);
        }
    }

    /// A second submission never changes a running session.
    #[test]
    fn prop_duplicate_submission_is_noop(
        first in location(),
        second in location(),
        v in velocity_scale(),
        ticks in 0usize..100,
    ) {
        let mut session = ImpactSession::default();
        session.mark_asset_ready();
        session.submit(fixtures::params(first, v, 1.0, MitigationMode::Kinetic));
        for _ in 0..ticks {
            session.tick(FRAME_SECS);
        }
        let before = session.asteroid().clone();
        let phase = session.phase();

        session.submit(fixtures::params(second, 20.0, 20.0, MitigationMode::Laser));
        prop_assert_eq!(session.asteroid(), &before);
        prop_assert_eq!(session.phase(), phase);
    }
}
