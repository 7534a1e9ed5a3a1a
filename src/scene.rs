//! Scene: bodies, their shapes, and the camera
//!
//! Bodies and shapes are linked by index: `links[i]` is the shape of
//! `state.bodies[i]`. Shapes live in the arena, never inside a body.

use glam::Vec2;

use crate::error::SceneError;
use crate::geometry::Shape;
use crate::renderer::{self, RenderBackend, ShapeArena, ShapeHandle, ViewContext};
use crate::settings::{ScenarioConfig, SimConfig};
use crate::sim::{SimState, tick};

pub struct Scene {
    pub state: SimState,
    config: SimConfig,
    view: ViewContext,
    arena: ShapeArena,
    links: Vec<ShapeHandle>,
    initial_energy: f32,
}

impl Scene {
    /// Create the physics state and upload one circle per body
    pub fn build(
        scenario: &ScenarioConfig,
        backend: &mut dyn RenderBackend,
    ) -> Result<Self, SceneError> {
        scenario.validate()?;

        let config = scenario.sim.clone();
        let state = scenario.to_state();
        let view = ViewContext::new(config.scale_factor);
        let scale = view.scale_factor();
        let mut arena = ShapeArena::new();
        let mut links = Vec::with_capacity(state.bodies.len());

        for (index, (body, body_cfg)) in state.bodies.iter().zip(&scenario.bodies).enumerate() {
            let center = Vec2::from(body.position) * scale;
            let radius = body.mass.sqrt() * scale;
            let circle = Shape::circle(center, radius, config.circle_segments, body_cfg.color);
            let shape = match circle {
                Ok(shape) => shape,
                Err(source) => {
                    // Release what was already uploaded
                    arena.clear(backend);
                    return Err(SceneError::Geometry { index, source });
                }
            };
            links.push(arena.insert(shape, backend));
        }

        let initial_energy = state.total_energy(&config.physics);
        log::info!(
            "Scene built: {} bodies, anchor {:?}, {} pair update, energy {:.4}",
            state.bodies.len(),
            state.anchor,
            config.physics.pair_update.as_str(),
            initial_energy
        );

        Ok(Self {
            state,
            config,
            view,
            arena,
            links,
            initial_energy,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewContext {
        &self.view
    }

    /// Pan the camera; shape placement is unaffected
    pub fn move_camera(&mut self, dx: f32, dy: f32) {
        self.view.move_camera(dx, dy);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.view.zoom(factor);
    }

    /// Simulation step for a frame that took `elapsed` wall-clock seconds
    pub fn step_size(&self, elapsed: f32) -> f32 {
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return 0.0;
        }
        let clamped = elapsed.min(self.config.max_frame_time);
        if clamped < elapsed {
            log::warn!(
                "Frame took {:.3}s, clamping to {:.3}s",
                elapsed,
                self.config.max_frame_time
            );
        }
        clamped * self.config.speed
    }

    /// Run one physics tick and move each body's shape by its displacement.
    ///
    /// Returns the simulation `dt` that was applied.
    pub fn advance(&mut self, elapsed: f32) -> f32 {
        let dt = self.step_size(elapsed);
        let displacement = tick(&mut self.state, &self.config.physics, dt);
        let scale = self.view.scale_factor();

        for (delta, handle) in displacement.iter().zip(&self.links) {
            if let Some(shape) = self.arena.get_mut(*handle) {
                shape.move_by(delta.x * scale, delta.y * scale);
            }
        }

        if self.state.ticks % 600 == 0 {
            log::debug!(
                "tick {}: t={:.1}, energy drift {:.3e}",
                self.state.ticks,
                self.state.time,
                self.energy_drift()
            );
        }
        dt
    }

    pub fn render(&self, backend: &mut dyn RenderBackend) {
        renderer::render(&self.arena, &self.view, backend);
    }

    /// Reset every shape transform to identity
    pub fn reset_shapes(&mut self) {
        for shape in self.arena.iter_mut() {
            shape.reset();
        }
    }

    /// Shape linked to body `index`
    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.links.get(index).and_then(|h| self.arena.get(*h))
    }

    pub fn shape_count(&self) -> usize {
        self.arena.len()
    }

    /// Relative change in total energy since the scene was built
    pub fn energy_drift(&self) -> f32 {
        let now = self.state.total_energy(&self.config.physics);
        if self.initial_energy == 0.0 {
            return now;
        }
        (now - self.initial_energy) / self.initial_energy.abs()
    }

    /// Release all GPU buffers; call before the backend is torn down
    pub fn teardown(mut self, backend: &mut dyn RenderBackend) -> SimState {
        self.arena.clear(backend);
        log::info!("Scene torn down after {} ticks", self.state.ticks);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidGeometryError;
    use crate::renderer::HeadlessBackend;
    use crate::settings::{BodyConfig, Preset};

    #[test]
    fn test_build_links_one_circle_per_body() {
        let mut backend = HeadlessBackend::new();
        let scene = Scene::build(&Preset::SolarSystem.scenario(), &mut backend).unwrap();
        assert_eq!(scene.shape_count(), 5);
        assert_eq!(backend.uploads, 5);

        // Earth at 500 world units -> 0.5 screen units, radius sqrt(10) * 0.001
        let earth = scene.shape(3).unwrap();
        let center = earth.mesh.vertices[0];
        assert!((center.x() - 0.5).abs() < 1e-6);
        let rim = earth.mesh.vertices[1];
        assert!((rim.x() - center.x() - 10f32.sqrt() * 1e-3).abs() < 1e-6);
        assert_eq!(earth.mesh.index_count(), 3 * 64);

        scene.teardown(&mut backend);
        assert_eq!(backend.live_meshes(), 0);
    }

    #[test]
    fn test_shape_follows_body() {
        let mut backend = HeadlessBackend::new();
        let mut scene = Scene::build(&Preset::TwoBody.scenario(), &mut backend).unwrap();
        let start = scene.state.bodies[1].position;

        for _ in 0..120 {
            scene.advance(1.0 / 60.0);
        }

        let moved = scene.state.bodies[1].position - start;
        let offset = scene.shape(1).unwrap().offset();
        let scale = scene.config().scale_factor;
        assert!((offset.x - moved.x * scale).abs() < 1e-5);
        assert!((offset.y - moved.y * scale).abs() < 1e-5);
        // Anchor shape never moves
        assert_eq!(scene.shape(0).unwrap().offset(), Vec2::ZERO);

        scene.teardown(&mut backend);
    }

    #[test]
    fn test_custom_scale_keeps_shapes_on_bodies() {
        let mut scenario = Preset::TwoBody.scenario();
        scenario.sim.scale_factor = 0.002;

        let mut backend = HeadlessBackend::new();
        let mut scene = Scene::build(&scenario, &mut backend).unwrap();
        assert_eq!(scene.view().scale_factor(), 0.002);

        // Camera changes must not affect placement
        scene.move_camera(0.3, -0.2);
        scene.zoom(1.5);
        assert_eq!(scene.view().eye(), Vec2::new(0.3, -0.2));

        for _ in 0..600 {
            scene.advance(1.0 / 60.0);
        }

        let body = scene.state.bodies[1].position;
        let shape = scene.shape(1).unwrap();
        let center = shape.mesh.vertices[0];
        let drawn = shape.offset() + Vec2::new(center.x(), center.y());
        assert!(drawn.distance(Vec2::from(body) * 0.002) < 1e-4);
        assert_eq!(scene.view().scale_factor(), scene.config().scale_factor);

        scene.teardown(&mut backend);
    }

    #[test]
    fn test_frame_hitch_is_clamped() {
        let mut backend = HeadlessBackend::new();
        let mut scene = Scene::build(&Preset::TwoBody.scenario(), &mut backend).unwrap();
        let cfg = scene.config().clone();

        assert_eq!(scene.step_size(5.0), cfg.max_frame_time * cfg.speed);
        assert_eq!(scene.step_size(0.01), 0.01 * cfg.speed);
        assert_eq!(scene.step_size(-1.0), 0.0);
        assert_eq!(scene.step_size(f32::NAN), 0.0);

        let dt = scene.advance(10.0);
        assert_eq!(dt, cfg.max_frame_time * cfg.speed);
        assert!((scene.state.time - dt as f64).abs() < 1e-9);

        scene.teardown(&mut backend);
    }

    #[test]
    fn test_reset_shapes_and_render() {
        let mut backend = HeadlessBackend::new();
        let mut scene = Scene::build(&Preset::TwoBody.scenario(), &mut backend).unwrap();
        for _ in 0..10 {
            scene.advance(1.0 / 60.0);
        }
        assert_ne!(scene.shape(1).unwrap().transform(), glam::Mat4::IDENTITY);

        scene.reset_shapes();
        assert_eq!(scene.shape(1).unwrap().transform(), glam::Mat4::IDENTITY);

        scene.render(&mut backend);
        assert_eq!(backend.draws, 2);

        scene.teardown(&mut backend);
    }

    #[test]
    fn test_out_of_range_body_fails_fast() {
        let mut scenario = Preset::TwoBody.scenario();
        scenario.bodies.push(BodyConfig {
            name: "far".into(),
            mass: 1.0,
            position: [5000.0, 0.0],
            velocity: [0.0, 0.0],
            color: Default::default(),
        });

        let mut backend = HeadlessBackend::new();
        let err = Scene::build(&scenario, &mut backend).err().unwrap();
        assert!(matches!(
            err,
            SceneError::Geometry {
                index: 2,
                source: InvalidGeometryError::OutOfRange { .. }
            }
        ));
        // Shapes created before the failure were released
        assert_eq!(backend.live_meshes(), 0);
    }

    #[test]
    fn test_energy_drift_small_for_circular_orbit() {
        let mut backend = HeadlessBackend::new();
        let mut scene = Scene::build(&Preset::TwoBody.scenario(), &mut backend).unwrap();
        for _ in 0..600 {
            scene.advance(1.0 / 60.0);
        }
        assert!(scene.energy_drift().abs() < 1e-2);
        scene.teardown(&mut backend);
    }
}
