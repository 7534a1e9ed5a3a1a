//! Simulation state and tunable physics parameters
//!
//! Everything needed to reproduce a run lives here and is serializable.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::vector::Vector2D;
use crate::consts::{G_CONST, MIN_DISTANCE_THRESHOLD};

/// Order in which pairwise interactions are applied within one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PairUpdate {
    /// Forces from tick-start positions, then one symplectic Euler step per body
    #[default]
    Snapshot,
    /// Fold over pairs; each pair moves both bodies before the next pair is read
    Sequential,
}

impl PairUpdate {
    pub fn as_str(&self) -> &'static str {
        match self {
            PairUpdate::Snapshot => "snapshot",
            PairUpdate::Sequential => "sequential",
        }
    }
}

/// Force law and integration parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Gravitational constant (tuned for visuals, not SI)
    pub gravity: f32,
    /// Separations below this produce no force
    pub min_distance: f32,
    pub pair_update: PairUpdate,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: G_CONST,
            min_distance: MIN_DISTANCE_THRESHOLD,
            pair_update: PairUpdate::default(),
        }
    }
}

/// Complete physics state for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Fixed for the lifetime of the run
    pub bodies: Vec<Body>,
    /// Body pinned in place (velocity forced to zero every tick)
    pub anchor: Option<usize>,
    /// Accumulated simulation time
    pub time: f64,
    /// Ticks run so far
    pub ticks: u64,
}

impl SimState {
    /// New state with body 0 as the anchor
    pub fn new(bodies: Vec<Body>) -> Self {
        let anchor = if bodies.is_empty() { None } else { Some(0) };
        Self {
            bodies,
            anchor,
            time: 0.0,
            ticks: 0,
        }
    }

    /// Replace the anchor; out-of-range indices clear it with a warning
    pub fn with_anchor(mut self, anchor: Option<usize>) -> Self {
        self.anchor = match anchor {
            Some(i) if i >= self.bodies.len() => {
                log::warn!(
                    "Anchor {i} out of range for {} bodies, running unanchored",
                    self.bodies.len()
                );
                None
            }
            other => other,
        };
        self
    }

    #[inline]
    pub fn is_anchor(&self, index: usize) -> bool {
        self.anchor == Some(index)
    }

    /// Zero the anchor's velocity
    pub fn pin_anchor(&mut self) {
        if let Some(body) = self.anchor.and_then(|i| self.bodies.get_mut(i)) {
            body.velocity = Vector2D::ZERO;
        }
    }

    pub fn total_mass(&self) -> f32 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Mass-weighted mean position
    pub fn center_of_mass(&self) -> Vector2D {
        let total = self.total_mass();
        if total <= 0.0 {
            return Vector2D::ZERO;
        }
        let weighted = self
            .bodies
            .iter()
            .fold(Vector2D::ZERO, |acc, b| acc + b.position * b.mass);
        weighted / total
    }

    pub fn total_momentum(&self) -> Vector2D {
        self.bodies
            .iter()
            .fold(Vector2D::ZERO, |acc, b| acc + b.velocity * b.mass)
    }

    /// Kinetic plus softened potential energy.
    ///
    /// Pairs closer than `min_distance` contribute no potential, matching the
    /// force cutoff.
    pub fn total_energy(&self, params: &PhysicsParams) -> f32 {
        let kinetic: f32 = self
            .bodies
            .iter()
            .map(|b| 0.5 * b.mass * b.velocity.magnitude_squared())
            .sum();

        let mut potential = 0.0;
        for (i, a) in self.bodies.iter().enumerate() {
            for b in &self.bodies[i + 1..] {
                let distance = a.position.distance(b.position);
                if distance >= params.min_distance && distance > 0.0 {
                    potential -= params.gravity * a.mass * b.mass / distance;
                }
            }
        }

        kinetic + potential
    }
}
