//! Rendering seam
//!
//! The graphics context itself is an external collaborator reached through
//! [`RenderBackend`]. This module owns the camera state and the shape arena
//! that ties shapes to their GPU buffers.

pub mod arena;
pub mod backend;
pub mod context;

pub use arena::{ShapeArena, ShapeHandle};
pub use backend::{DrawCall, GpuMesh, HeadlessBackend, RenderBackend};
pub use context::{OrthoBounds, ViewContext};

/// Draw every live shape with the context's current view-projection
pub fn render(arena: &ShapeArena, view: &ViewContext, backend: &mut dyn RenderBackend) {
    arena.render(view.view_projection(), backend);
}
