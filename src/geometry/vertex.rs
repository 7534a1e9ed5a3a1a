//! Vertex, color and uniform types shared with the render collaborator

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Components per vertex (x, y, z)
pub const VERTEX_COMPONENTS: usize = 3;

/// 2D vertex stored with a zero z component
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            position: [x, y, 0.0],
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position[1]
    }

    /// Buffer layout for a render pipeline: one `Float32x3` position at
    /// shader location 0
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Opaque RGB color, components in 0..=1
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// RGBA with alpha fixed at 1
    pub const fn to_rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        colors::WHITE
    }
}

/// Per-draw uniform block: shape color and its model-view-projection matrix
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ShapeUniforms {
    pub color: [f32; 4],
    /// Column-major
    pub transform: [[f32; 4]; 4],
}

/// Palette for bodies and demo shapes
pub mod colors {
    use super::Rgb;

    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const SUN: Rgb = Rgb::new(1.0, 0.8, 0.2);
    pub const MERCURY: Rgb = Rgb::new(0.6, 0.6, 0.6);
    pub const VENUS: Rgb = Rgb::new(0.9, 0.7, 0.4);
    pub const EARTH: Rgb = Rgb::new(0.2, 0.5, 1.0);
    pub const MARS: Rgb = Rgb::new(0.9, 0.3, 0.2);
    pub const ORANGE: Rgb = Rgb::new(1.0, 0.5, 0.2);
    pub const BACKGROUND: Rgb = Rgb::new(0.2, 0.3, 0.3);

    /// Cycled through for generated satellites
    pub const SATELLITES: [Rgb; 4] = [MERCURY, VENUS, EARTH, MARS];
}
