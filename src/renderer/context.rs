//! Camera and view state
//!
//! Owned by the scene for the lifetime of the render loop; passed explicitly
//! to whatever needs the current view-projection or scale factor.

use glam::{Mat4, Vec2, Vec3};

use crate::consts::{DEFAULT_SCALE_FACTOR, DISPLAY_EXTENT};

/// Orthographic projection bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrthoBounds {
    fn default() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
            near: -1.0,
            far: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewContext {
    /// Camera offset, clamped to the display extent on each axis
    eye: Vec2,
    ortho: OrthoBounds,
    /// World units to screen units, fixed once shapes are placed
    scale_factor: f32,
    view_projection: Mat4,
    dirty: bool,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE_FACTOR)
    }
}

impl ViewContext {
    pub fn new(scale_factor: f32) -> Self {
        let mut ctx = Self {
            eye: Vec2::ZERO,
            ortho: OrthoBounds::default(),
            scale_factor,
            view_projection: Mat4::IDENTITY,
            dirty: false,
        };
        ctx.update();
        ctx
    }

    #[inline]
    pub fn eye(&self) -> Vec2 {
        self.eye
    }

    #[inline]
    pub fn ortho(&self) -> OrthoBounds {
        self.ortho
    }

    #[inline]
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    /// Pan the camera; each axis stays within the display extent
    pub fn move_camera(&mut self, dx: f32, dy: f32) {
        self.eye.x = (self.eye.x + dx).clamp(-DISPLAY_EXTENT, DISPLAY_EXTENT);
        self.eye.y = (self.eye.y + dy).clamp(-DISPLAY_EXTENT, DISPLAY_EXTENT);
        self.dirty = true;
        self.update();
    }

    /// Scale the visible region; `factor > 1` zooms out.
    ///
    /// Non-finite or non-positive factors are ignored.
    pub fn zoom(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("Ignoring zoom factor {factor}");
            return;
        }
        self.ortho.left *= factor;
        self.ortho.right *= factor;
        self.ortho.top *= factor;
        self.ortho.bottom *= factor;
        self.dirty = true;
        self.update();
    }

    /// Returns whether the camera changed since the last call
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn update(&mut self) {
        let o = self.ortho;
        let projection = Mat4::orthographic_rh_gl(o.left, o.right, o.bottom, o.top, o.near, o.far);
        let view = Mat4::from_translation(Vec3::new(self.eye.x, self.eye.y, 0.0));
        self.view_projection = projection * view;
    }
}
