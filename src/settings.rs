//! Scenario and simulation configuration
//!
//! Loaded from JSON files or built from named presets.

use std::f32::consts::TAU;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::geometry::{Rgb, colors};
use crate::sim::{Body, PhysicsParams, SimState, Vector2D};

/// Frame-to-simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub physics: PhysicsParams,
    /// Simulation time units per wall-clock second
    pub speed: f32,
    /// Wall-clock frame time is clamped to this many seconds before scaling
    pub max_frame_time: f32,
    /// World units to screen units
    pub scale_factor: f32,
    /// Rim segments for each body's circle
    pub circle_segments: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsParams::default(),
            speed: DEFAULT_SPEED,
            max_frame_time: MAX_FRAME_TIME,
            scale_factor: DEFAULT_SCALE_FACTOR,
            circle_segments: CIRCLE_SEGMENTS,
        }
    }
}

/// Initial state of one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f32,
    pub position: [f32; 2],
    #[serde(default)]
    pub velocity: [f32; 2],
    #[serde(default)]
    pub color: Rgb,
}

impl BodyConfig {
    pub fn to_body(&self) -> Body {
        Body::new(self.name.clone(), self.mass, self.position.into())
            .with_velocity(self.velocity.into())
    }
}

fn default_anchor() -> Option<usize> {
    Some(0)
}

/// A complete scenario: settings, anchor choice and bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub sim: SimConfig,
    /// Pinned body index; `null` disables pinning
    #[serde(default = "default_anchor")]
    pub anchor: Option<usize>,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scenario = Self::from_json_str(&json)?;
        log::info!(
            "Loaded scenario from {} ({} bodies)",
            path.display(),
            scenario.bodies.len()
        );
        Ok(scenario)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bodies.is_empty() {
            return Err(ConfigError::Invalid("scenario has no bodies".into()));
        }
        for (i, b) in self.bodies.iter().enumerate() {
            if !b.mass.is_finite() || b.mass <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "body {i} ({}) has mass {}",
                    b.name, b.mass
                )));
            }
            let finite = b.position.iter().chain(&b.velocity).all(|v| v.is_finite());
            if !finite {
                return Err(ConfigError::Invalid(format!(
                    "body {i} ({}) has a non-finite position or velocity",
                    b.name
                )));
            }
        }
        if let Some(anchor) = self.anchor {
            if anchor >= self.bodies.len() {
                return Err(ConfigError::Invalid(format!(
                    "anchor {anchor} out of range for {} bodies",
                    self.bodies.len()
                )));
            }
        }

        let sim = &self.sim;
        let positive = [sim.speed, sim.max_frame_time, sim.scale_factor];
        if positive.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(ConfigError::Invalid(
                "speed, max_frame_time and scale_factor must be positive".into(),
            ));
        }
        if !sim.physics.gravity.is_finite() || !sim.physics.min_distance.is_finite() {
            return Err(ConfigError::Invalid("physics parameters must be finite".into()));
        }
        if sim.physics.min_distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_distance must not be negative, got {}",
                sim.physics.min_distance
            )));
        }
        Ok(())
    }

    pub fn to_state(&self) -> SimState {
        SimState::new(self.bodies.iter().map(BodyConfig::to_body).collect())
            .with_anchor(self.anchor)
    }
}

/// Speed of a circular orbit of radius `r` around a pinned mass
pub fn circular_speed(gravity: f32, central_mass: f32, r: f32) -> f32 {
    (gravity * central_mass / r).sqrt()
}

/// Built-in scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Heavy anchor with one light body in a circular orbit
    TwoBody,
    /// Sun and four planets on circular orbits
    SolarSystem,
    /// Randomly placed satellites around an anchor
    Ring { count: usize, seed: u64 },
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::TwoBody => "two-body",
            Preset::SolarSystem => "solar",
            Preset::Ring { .. } => "ring",
        }
    }

    /// Parse a preset name; `ring` uses 8 satellites and seed 0
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "two-body" | "twobody" | "two" => Some(Preset::TwoBody),
            "solar" | "solar-system" => Some(Preset::SolarSystem),
            "ring" => Some(Preset::Ring { count: 8, seed: 0 }),
            _ => None,
        }
    }

    pub fn scenario(&self) -> ScenarioConfig {
        match *self {
            Preset::TwoBody => two_body(),
            Preset::SolarSystem => solar_system(),
            Preset::Ring { count, seed } => ring(count, seed),
        }
    }
}

fn orbiting(name: &str, mass: f32, radius: f32, central_mass: f32, color: Rgb) -> BodyConfig {
    let speed = circular_speed(G_CONST, central_mass, radius);
    BodyConfig {
        name: name.into(),
        mass,
        position: [radius, 0.0],
        velocity: [0.0, speed],
        color,
    }
}

fn sun(mass: f32) -> BodyConfig {
    BodyConfig {
        name: "sun".into(),
        mass,
        position: [0.0, 0.0],
        velocity: [0.0, 0.0],
        color: colors::SUN,
    }
}

fn two_body() -> ScenarioConfig {
    ScenarioConfig {
        sim: SimConfig::default(),
        anchor: Some(0),
        bodies: vec![sun(1000.0), orbiting("planet", 10.0, 400.0, 1000.0, colors::EARTH)],
    }
}

fn solar_system() -> ScenarioConfig {
    let m = 5000.0;
    ScenarioConfig {
        sim: SimConfig::default(),
        anchor: Some(0),
        bodies: vec![
            sun(m),
            orbiting("mercury", 2.0, 150.0, m, colors::MERCURY),
            orbiting("venus", 8.0, 300.0, m, colors::VENUS),
            orbiting("earth", 10.0, 500.0, m, colors::EARTH),
            orbiting("mars", 5.0, 750.0, m, colors::MARS),
        ],
    }
}

fn ring(count: usize, seed: u64) -> ScenarioConfig {
    let mut rng = Pcg32::seed_from_u64(seed);
    let m = 2000.0;
    let mut bodies = vec![sun(m)];

    for i in 0..count {
        let radius = rng.random_range(100.0..SIM_SIZE * 0.8);
        let theta = rng.random_range(0.0..TAU);
        let mass = rng.random_range(1.0..20.0);
        let pos = Vector2D::new(radius * theta.cos(), radius * theta.sin());
        // Counter-clockwise tangent
        let tangent = Vector2D::new(-theta.sin(), theta.cos());
        let vel = tangent * circular_speed(G_CONST, m, radius);
        bodies.push(BodyConfig {
            name: format!("satellite-{i}"),
            mass,
            position: [pos.x, pos.y],
            velocity: [vel.x, vel.y],
            color: colors::SATELLITES[i % colors::SATELLITES.len()],
        });
    }

    ScenarioConfig {
        sim: SimConfig::default(),
        anchor: Some(0),
        bodies,
    }
}
