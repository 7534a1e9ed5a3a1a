//! Point-mass bodies and the softened gravity law

use serde::{Deserialize, Serialize};

use super::state::PhysicsParams;
use super::vector::Vector2D;

/// A point mass taking part in the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    /// Always > 0
    pub mass: f32,
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl Body {
    /// Body at rest at `position`
    pub fn new(name: impl Into<String>, mass: f32, position: Vector2D) -> Self {
        Self {
            name: name.into(),
            mass,
            position,
            velocity: Vector2D::ZERO,
        }
    }

    pub fn with_velocity(mut self, velocity: Vector2D) -> Self {
        self.velocity = velocity;
        self
    }

    /// Force exerted on `self` by `other`
    #[inline]
    pub fn gravity_force(&self, other: &Body, params: &PhysicsParams) -> Vector2D {
        gravity_force(self, other, params)
    }
}

/// Gravitational pull of `b` on `a`.
///
/// Zero when the bodies are closer than `params.min_distance` or coincide.
pub fn gravity_force(a: &Body, b: &Body, params: &PhysicsParams) -> Vector2D {
    let r = b.position - a.position;
    let distance = r.magnitude();

    // min_distance may be configured to 0, so check before dividing
    if distance < params.min_distance || distance == 0.0 {
        return Vector2D::ZERO;
    }

    let magnitude = params.gravity * a.mass * b.mass / (distance * distance);
    r / distance * magnitude
}
