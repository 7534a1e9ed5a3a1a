//! Mesh generation for 2D primitives
//!
//! Every generator is deterministic in its inputs and validates them first.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vertex::Vertex;
use crate::consts::DISPLAY_EXTENT;
use crate::error::InvalidGeometryError;

/// Vertex and index buffers for one indexed triangle list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Flat `x, y, z` float stream
    pub fn vertex_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Which generator built a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Square,
    Triangle,
    Circle { segments: u32 },
}

fn check_position(position: Vec2) -> Result<(), InvalidGeometryError> {
    if !position.is_finite() {
        return Err(InvalidGeometryError::NonFinite);
    }
    if position.x.abs() > DISPLAY_EXTENT || position.y.abs() > DISPLAY_EXTENT {
        return Err(InvalidGeometryError::OutOfRange {
            x: position.x,
            y: position.y,
            extent: DISPLAY_EXTENT,
        });
    }
    Ok(())
}

fn check_size(size: f32) -> Result<(), InvalidGeometryError> {
    if !size.is_finite() {
        return Err(InvalidGeometryError::NonFinite);
    }
    let max = 2.0 * DISPLAY_EXTENT;
    if size <= 0.0 || size > max {
        return Err(InvalidGeometryError::BadSize { size, max });
    }
    Ok(())
}

/// Axis-aligned square centered at `position`
pub fn square(position: Vec2, side: f32) -> Result<Mesh, InvalidGeometryError> {
    check_position(position)?;
    check_size(side)?;

    let h = side / 2.0;
    let vertices = vec![
        Vertex::new(position.x + h, position.y + h), // top right
        Vertex::new(position.x + h, position.y - h), // bottom right
        Vertex::new(position.x - h, position.y - h), // bottom left
        Vertex::new(position.x - h, position.y + h), // top left
    ];

    Ok(Mesh {
        vertices,
        indices: vec![0, 1, 3, 1, 2, 3],
    })
}

/// Upright triangle: base on `y - side/2`, apex at `y + side/2`
pub fn triangle(position: Vec2, side: f32) -> Result<Mesh, InvalidGeometryError> {
    check_position(position)?;
    check_size(side)?;

    let h = side / 2.0;
    let vertices = vec![
        Vertex::new(position.x - h, position.y - h),
        Vertex::new(position.x + h, position.y - h),
        Vertex::new(position.x, position.y + h),
    ];

    Ok(Mesh {
        vertices,
        indices: vec![0, 2, 1],
    })
}

/// Regular polygon fan: center vertex plus `segments` rim vertices
pub fn circle(position: Vec2, radius: f32, segments: u32) -> Result<Mesh, InvalidGeometryError> {
    check_position(position)?;
    check_size(radius)?;
    if segments < 3 {
        return Err(InvalidGeometryError::TooFewSegments { segments });
    }

    let mut vertices = Vec::with_capacity(segments as usize + 1);
    vertices.push(Vertex::new(position.x, position.y));
    for i in 0..segments {
        let theta = (i as f32 / segments as f32) * TAU;
        vertices.push(Vertex::new(
            position.x + radius * theta.cos(),
            position.y + radius * theta.sin(),
        ));
    }

    let mut indices = Vec::with_capacity(segments as usize * 3);
    for i in 0..segments {
        // Last triangle wraps back to rim vertex 1
        indices.extend_from_slice(&[0, i + 1, (i + 1) % segments + 1]);
    }

    Ok(Mesh { vertices, indices })
}
