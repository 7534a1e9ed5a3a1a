//! Shape storage tied to GPU buffer lifetime
//!
//! Shapes are addressed by generational handles, so a stale handle never
//! aliases a shape inserted later into the same slot.

use super::backend::{DrawCall, GpuMesh, RenderBackend};
use crate::geometry::Shape;
use glam::Mat4;

/// Stable reference to a shape in a [`ShapeArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeHandle {
    index: u32,
    generation: u32,
}

struct Slot {
    generation: u32,
    entry: Option<(Shape, GpuMesh)>,
}

#[derive(Default)]
pub struct ShapeArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl ShapeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Upload the shape's mesh and take ownership of both
    pub fn insert(&mut self, shape: Shape, backend: &mut dyn RenderBackend) -> ShapeHandle {
        let gpu = backend.upload(&shape.mesh);
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Some((shape, gpu));
            return ShapeHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entry: Some((shape, gpu)),
        });
        ShapeHandle {
            index,
            generation: 0,
        }
    }

    pub fn get(&self, handle: ShapeHandle) -> Option<&Shape> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.entry.as_ref())
            .map(|(shape, _)| shape)
    }

    pub fn get_mut(&mut self, handle: ShapeHandle) -> Option<&mut Shape> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.entry.as_mut())
            .map(|(shape, _)| shape)
    }

    /// Release the shape's buffers and return it
    pub fn remove(
        &mut self,
        handle: ShapeHandle,
        backend: &mut dyn RenderBackend,
    ) -> Option<Shape> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let (shape, gpu) = slot.entry.take()?;
        backend.release(gpu);
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(shape)
    }

    /// Release every shape. Must run before the backend is torn down.
    pub fn clear(&mut self, backend: &mut dyn RenderBackend) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Some((_, gpu)) = slot.entry.take() {
                backend.release(gpu);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.len = 0;
    }

    /// Live shapes in slot order
    pub fn iter(&self) -> impl Iterator<Item = (ShapeHandle, &Shape)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entry.as_ref().map(|(shape, _)| {
                (
                    ShapeHandle {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    shape,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Shape> {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.entry.as_mut().map(|(shape, _)| shape))
    }

    /// Issue one draw call per live shape
    pub fn render(&self, view_projection: Mat4, backend: &mut dyn RenderBackend) {
        for (shape, gpu) in self.slots.iter().filter_map(|s| s.entry.as_ref()) {
            backend.draw(&DrawCall {
                mesh: *gpu,
                uniforms: shape.uniforms(view_projection),
            });
        }
    }
}

impl Drop for ShapeArena {
    fn drop(&mut self) {
        if self.len > 0 {
            log::warn!("ShapeArena dropped with {} live shapes; GPU buffers leaked", self.len);
        }
    }
}
