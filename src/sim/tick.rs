//! Simulation tick
//!
//! Advances every body by one step of semi-implicit Euler. Pairs are visited
//! in increasing `(i, j)` order with `i < j`.

use super::body::gravity_force;
use super::state::{PairUpdate, PhysicsParams, SimState};
use super::vector::Vector2D;

/// Advance the state by `dt` and return each body's displacement.
///
/// The returned vector is parallel to `state.bodies`; the anchor's entry is
/// always zero. A negative or non-finite `dt` leaves positions untouched.
pub fn tick(state: &mut SimState, params: &PhysicsParams, dt: f32) -> Vec<Vector2D> {
    let n = state.bodies.len();
    let mut displacement = vec![Vector2D::ZERO; n];

    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Ignoring invalid time step {dt}");
        state.ticks += 1;
        return displacement;
    }

    match params.pair_update {
        PairUpdate::Snapshot => snapshot_step(state, params, dt, &mut displacement),
        PairUpdate::Sequential => sequential_step(state, params, dt, &mut displacement),
    }

    state.pin_anchor();
    state.time += dt as f64;
    state.ticks += 1;

    displacement
}

/// All forces from tick-start positions, then `v += a*dt; x += v*dt` once per body
fn snapshot_step(
    state: &mut SimState,
    params: &PhysicsParams,
    dt: f32,
    displacement: &mut [Vector2D],
) {
    let n = state.bodies.len();
    let mut accel = vec![Vector2D::ZERO; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (&state.bodies[i], &state.bodies[j]);
            let force = gravity_force(a, b, params);
            accel[i] += force / a.mass;
            accel[j] -= force / b.mass;
        }
    }

    for (i, body) in state.bodies.iter_mut().enumerate() {
        body.velocity += accel[i] * dt;
    }
    state.pin_anchor();

    for (body, delta) in state.bodies.iter_mut().zip(displacement.iter_mut()) {
        let step = body.velocity * dt;
        body.position += step;
        *delta = step;
    }
}

/// Fold over pairs with immediately visible mutation: later pairs in the same
/// sweep read positions already moved by earlier pairs.
fn sequential_step(
    state: &mut SimState,
    params: &PhysicsParams,
    dt: f32,
    displacement: &mut [Vector2D],
) {
    let n = state.bodies.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let force = gravity_force(&state.bodies[i], &state.bodies[j], params);

            let (head, tail) = state.bodies.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);
            a.velocity += force / a.mass * dt;
            b.velocity -= force / b.mass * dt;

            for (k, body) in [(i, a), (j, b)] {
                if state.anchor == Some(k) {
                    body.velocity = Vector2D::ZERO;
                }
                let step = body.velocity * dt;
                body.position += step;
                displacement[k] += step;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Body;
    use proptest::prelude::*;

    fn two_body() -> SimState {
        SimState::new(vec![
            Body::new("sun", 1000.0, Vector2D::new(0.0, 0.0)),
            Body::new("planet", 10.0, Vector2D::new(400.0, 0.0))
                .with_velocity(Vector2D::new(0.0, 0.15)),
        ])
    }

    fn three_body() -> SimState {
        SimState::new(vec![
            Body::new("a", 500.0, Vector2D::new(0.0, 0.0)),
            Body::new("b", 50.0, Vector2D::new(120.0, 0.0)),
            Body::new("c", 80.0, Vector2D::new(-60.0, 90.0)),
        ])
        .with_anchor(None)
    }

    #[test]
    fn test_anchor_stays_put() {
        let mut state = two_body();
        let params = PhysicsParams::default();
        for _ in 0..100 {
            let delta = tick(&mut state, &params, 1.0);
            assert_eq!(delta[0], Vector2D::ZERO);
        }
        assert_eq!(state.bodies[0].velocity, Vector2D::ZERO);
        assert_eq!(state.bodies[0].position, Vector2D::ZERO);
        assert_eq!(state.ticks, 100);
        assert!((state.time - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_stays_put_sequential() {
        let mut state = two_body();
        let params = PhysicsParams {
            pair_update: PairUpdate::Sequential,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &params, 1.0);
        }
        assert_eq!(state.bodies[0].velocity, Vector2D::ZERO);
        assert_eq!(state.bodies[0].position, Vector2D::ZERO);
    }

    #[test]
    fn test_light_body_falls_toward_heavy() {
        let mut state = SimState::new(vec![
            Body::new("sun", 1000.0, Vector2D::new(0.0, 0.0)),
            Body::new("rock", 10.0, Vector2D::new(100.0, 0.0)),
        ]);
        let params = PhysicsParams::default();
        tick(&mut state, &params, 1.0);

        // a = G * M / r^2 = 1e-2 * 1000 / 1e4
        let rock = &state.bodies[1];
        assert!((rock.velocity.x + 1e-3).abs() < 1e-7);
        // Semi-implicit: the new velocity moves the position in the same tick
        assert!((rock.position.x - (100.0 - 1e-3)).abs() < 1e-4);
    }

    #[test]
    fn test_displacement_matches_position_change() {
        let mut state = three_body();
        for mode in [PairUpdate::Snapshot, PairUpdate::Sequential] {
            let params = PhysicsParams {
                pair_update: mode,
                ..Default::default()
            };
            let before: Vec<_> = state.bodies.iter().map(|b| b.position).collect();
            let delta = tick(&mut state, &params, 2.0);
            for (i, body) in state.bodies.iter().enumerate() {
                let moved = body.position - before[i];
                assert!((moved - delta[i]).magnitude() < 1e-4, "{mode:?} body {i}");
            }
        }
    }

    #[test]
    fn test_modes_agree_for_two_bodies() {
        let mut snap = two_body().with_anchor(None);
        let mut seq = snap.clone();
        let snap_params = PhysicsParams::default();
        let seq_params = PhysicsParams {
            pair_update: PairUpdate::Sequential,
            ..Default::default()
        };
        for _ in 0..50 {
            tick(&mut snap, &snap_params, 1.0);
            tick(&mut seq, &seq_params, 1.0);
        }
        for (a, b) in snap.bodies.iter().zip(&seq.bodies) {
            assert!((a.position - b.position).magnitude() < 1e-3);
            assert!((a.velocity - b.velocity).magnitude() < 1e-5);
        }
    }

    #[test]
    fn test_modes_diverge_for_three_bodies() {
        let mut snap = three_body();
        let mut seq = snap.clone();
        let seq_params = PhysicsParams {
            pair_update: PairUpdate::Sequential,
            ..Default::default()
        };
        tick(&mut snap, &PhysicsParams::default(), 5.0);
        tick(&mut seq, &seq_params, 5.0);

        // Sequential moves body 0 once per pair it takes part in
        assert_ne!(snap.bodies[0].position, seq.bodies[0].position);
    }

    #[test]
    fn test_momentum_conserved_without_anchor() {
        let mut state = three_body();
        let params = PhysicsParams::default();
        let before = state.total_momentum();
        for _ in 0..200 {
            tick(&mut state, &params, 1.0);
        }
        let after = state.total_momentum();
        assert!((after - before).magnitude() < 1e-2);
    }

    #[test]
    fn test_zero_dt_changes_nothing() {
        let mut state = two_body();
        let snapshot = state.clone();
        let delta = tick(&mut state, &PhysicsParams::default(), 0.0);
        assert!(delta.iter().all(|d| *d == Vector2D::ZERO));
        assert_eq!(state.bodies, snapshot.bodies);
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut state = two_body();
        let snapshot = state.clone();
        tick(&mut state, &PhysicsParams::default(), f32::NAN);
        tick(&mut state, &PhysicsParams::default(), -1.0);
        assert_eq!(state.bodies, snapshot.bodies);
        assert_eq!(state.time, 0.0);
        assert_eq!(state.ticks, 2);
    }

    #[test]
    fn test_empty_and_single_body() {
        let mut empty = SimState::new(Vec::new());
        assert!(tick(&mut empty, &PhysicsParams::default(), 1.0).is_empty());

        let mut lone = SimState::new(vec![
            Body::new("lone", 1.0, Vector2D::ZERO).with_velocity(Vector2D::new(1.0, 0.0)),
        ])
        .with_anchor(None);
        let delta = tick(&mut lone, &PhysicsParams::default(), 2.0);
        assert_eq!(delta[0], Vector2D::new(2.0, 0.0));
    }

    #[test]
    fn test_coincident_bodies_stay_finite_without_threshold() {
        for pair_update in [PairUpdate::Snapshot, PairUpdate::Sequential] {
            let mut state = SimState::new(vec![
                Body::new("a", 50.0, Vector2D::new(10.0, 10.0)),
                Body::new("b", 50.0, Vector2D::new(10.0, 10.0)),
                Body::new("c", 20.0, Vector2D::new(100.0, 5.0)),
            ])
            .with_anchor(None);
            let params = PhysicsParams {
                min_distance: 0.0,
                pair_update,
                ..Default::default()
            };

            let delta = tick(&mut state, &params, 1.0);
            assert!(delta.iter().all(|d| d.is_finite()));
            assert!(state.bodies.iter().all(|b| b.position.is_finite()));
            assert!(state.bodies.iter().all(|b| b.velocity.is_finite()));
            // Third body still feels the pair
            assert!(state.bodies[2].position.x < 100.0);
        }
    }

    proptest! {
        #[test]
        fn anchor_velocity_zero_after_sweep(
            seq in any::<bool>(),
            positions in prop::collection::vec(
                (-400.0f32..400.0, -400.0f32..400.0, 1.0f32..2000.0),
                2..8,
            ),
            dt in 0.0f32..5.0,
        ) {
            let bodies = positions
                .iter()
                .enumerate()
                .map(|(i, &(x, y, m))| Body::new(format!("b{i}"), m, Vector2D::new(x, y)))
                .collect();
            let mut state = SimState::new(bodies);
            let params = PhysicsParams {
                pair_update: if seq { PairUpdate::Sequential } else { PairUpdate::Snapshot },
                ..Default::default()
            };
            let start = state.bodies[0].position;
            for _ in 0..3 {
                tick(&mut state, &params, dt);
            }
            prop_assert_eq!(state.bodies[0].velocity, Vector2D::ZERO);
            prop_assert_eq!(state.bodies[0].position, start);
        }
    }
}
