//! Planet Sim - a 2D gravity playground
//!
//! Core modules:
//! - `sim`: Softened N-body physics (vectors, bodies, integration tick)
//! - `geometry`: Mesh generation and per-shape transforms
//! - `renderer`: Camera context, shape arena and the graphics backend seam
//! - `scene`: Links bodies to shapes and drives one frame at a time
//! - `settings`: Scenario configuration and presets

pub mod error;
pub mod geometry;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, DegenerateVectorError, InvalidGeometryError, SceneError};
pub use scene::Scene;
pub use settings::{Preset, ScenarioConfig, SimConfig};

/// Simulation configuration constants
pub mod consts {
    /// Gravitational constant, tuned for visually pleasing motion
    pub const G_CONST: f32 = 1e-2;
    /// Below this separation the force is clamped to zero
    pub const MIN_DISTANCE_THRESHOLD: f32 = 20.0;

    /// World extent mapped onto the unit display
    pub const SIM_SIZE: f32 = 1000.0;
    pub const DEFAULT_SCALE_FACTOR: f32 = 1.0 / SIM_SIZE;
    /// Shape coordinates must lie within ±this (normalized device units)
    pub const DISPLAY_EXTENT: f32 = 1.0;
    pub const CIRCLE_SEGMENTS: u32 = 64;

    /// Simulation time units per wall-clock second
    pub const DEFAULT_SPEED: f32 = 60.0;
    /// Longest frame time fed to the integrator (seconds), to survive hitches
    pub const MAX_FRAME_TIME: f32 = 0.1;
}
