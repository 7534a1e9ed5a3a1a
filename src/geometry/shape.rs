//! A renderable shape: generated mesh, color and a cumulative transform

use glam::{Mat4, Vec2, Vec3};

use super::shapes::{self, Mesh, ShapeKind};
use super::vertex::{Rgb, ShapeUniforms};
use crate::error::InvalidGeometryError;

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub mesh: Mesh,
    pub color: Rgb,
    /// Applied at draw time on top of the base geometry
    transform: Mat4,
}

impl Shape {
    pub fn new(kind: ShapeKind, mesh: Mesh, color: Rgb) -> Self {
        Self {
            kind,
            mesh,
            color,
            transform: Mat4::IDENTITY,
        }
    }

    pub fn square(position: Vec2, side: f32, color: Rgb) -> Result<Self, InvalidGeometryError> {
        Ok(Self::new(ShapeKind::Square, shapes::square(position, side)?, color))
    }

    pub fn triangle(position: Vec2, side: f32, color: Rgb) -> Result<Self, InvalidGeometryError> {
        Ok(Self::new(
            ShapeKind::Triangle,
            shapes::triangle(position, side)?,
            color,
        ))
    }

    pub fn circle(
        position: Vec2,
        radius: f32,
        segments: u32,
        color: Rgb,
    ) -> Result<Self, InvalidGeometryError> {
        Ok(Self::new(
            ShapeKind::Circle { segments },
            shapes::circle(position, radius, segments)?,
            color,
        ))
    }

    #[inline]
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Compose a translation onto the current transform (cumulative)
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.transform *= Mat4::from_translation(Vec3::new(dx, dy, 0.0));
    }

    /// Back to the identity transform
    pub fn reset(&mut self) {
        self.transform = Mat4::IDENTITY;
    }

    /// Net translation accumulated by `move_by`
    pub fn offset(&self) -> Vec2 {
        self.transform.w_axis.truncate().truncate()
    }

    pub fn model_view_projection(&self, view_projection: Mat4) -> Mat4 {
        view_projection * self.transform
    }

    pub fn uniforms(&self, view_projection: Mat4) -> ShapeUniforms {
        ShapeUniforms {
            color: self.color.to_rgba(),
            transform: self.model_view_projection(view_projection).to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vertex::colors;

    fn circle() -> Shape {
        Shape::circle(Vec2::new(0.1, 0.2), 0.05, 32, colors::EARTH).unwrap()
    }

    #[test]
    fn test_new_shape_has_identity_transform() {
        let s = circle();
        assert_eq!(s.transform(), Mat4::IDENTITY);
        assert_eq!(s.kind, ShapeKind::Circle { segments: 32 });
    }

    #[test]
    fn test_move_is_cumulative() {
        let mut s = circle();
        s.move_by(0.1, 0.0);
        s.move_by(0.0, -0.25);
        s.move_by(0.05, 0.05);
        let offset = s.offset();
        assert!((offset.x - 0.15).abs() < 1e-6);
        assert!((offset.y + 0.2).abs() < 1e-6);

        let moved = s.transform().transform_point3(Vec3::new(0.1, 0.2, 0.0));
        assert!((moved.x - 0.25).abs() < 1e-6);
        assert!((moved.y - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset_restores_exact_identity() {
        let mut s = circle();
        for i in 0..10 {
            s.move_by(0.013 * i as f32, -0.007);
        }
        assert_ne!(s.transform(), Mat4::IDENTITY);
        s.reset();
        assert_eq!(s.transform(), Mat4::IDENTITY);
    }

    #[test]
    fn test_uniforms_apply_view_projection() {
        let mut s = Shape::square(Vec2::ZERO, 0.5, colors::ORANGE).unwrap();
        s.move_by(0.5, 0.0);
        let vp = Mat4::from_scale(Vec3::new(2.0, 2.0, 1.0));
        let u = s.uniforms(vp);
        assert_eq!(u.color, [1.0, 0.5, 0.2, 1.0]);

        let mvp = Mat4::from_cols_array_2d(&u.transform);
        let p = mvp.transform_point3(Vec3::ZERO);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert_eq!(mvp, vp * s.transform());
    }

    #[test]
    fn test_constructor_rejects_bad_geometry() {
        assert!(Shape::triangle(Vec2::new(0.0, 3.0), 0.2, colors::WHITE).is_err());
        assert!(Shape::circle(Vec2::ZERO, 0.2, 1, colors::WHITE).is_err());
    }
}
