//! Geometry engine
//!
//! Shapes are plain data: a mesh built by a per-kind generator function plus
//! a color and a transform. There is no per-kind type hierarchy.

pub mod shape;
pub mod shapes;
pub mod vertex;

pub use shape::Shape;
pub use shapes::{Mesh, ShapeKind, circle, square, triangle};
pub use vertex::{Rgb, ShapeUniforms, Vertex, colors};
