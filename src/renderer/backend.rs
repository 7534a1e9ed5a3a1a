//! Seam to the graphics collaborator

use crate::geometry::{Mesh, ShapeUniforms, Vertex};

/// Buffer handles for one uploaded mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuMesh {
    pub vertex_buffer: u32,
    pub index_buffer: u32,
    pub index_count: u32,
}

/// One indexed triangle-list draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: GpuMesh,
    pub uniforms: ShapeUniforms,
}

/// Buffer upload and draw primitives supplied by the graphics context
pub trait RenderBackend {
    fn upload(&mut self, mesh: &Mesh) -> GpuMesh;
    fn draw(&mut self, call: &DrawCall);
    fn release(&mut self, mesh: GpuMesh);
}

/// Backend with no GPU: hands out buffer ids and records statistics
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_buffer: u32,
    live_buffers: usize,
    pub uploads: usize,
    pub draws: usize,
    pub releases: usize,
    /// Bytes that would have been sent to the GPU
    pub bytes_uploaded: usize,
    /// Uniform bytes written by draw calls
    pub uniform_bytes: usize,
    /// Most recent draw call
    pub last_draw: Option<DrawCall>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Meshes uploaded and not yet released
    pub fn live_meshes(&self) -> usize {
        self.live_buffers
    }

    fn alloc(&mut self) -> u32 {
        self.next_buffer += 1;
        self.next_buffer
    }
}

impl RenderBackend for HeadlessBackend {
    fn upload(&mut self, mesh: &Mesh) -> GpuMesh {
        let gpu = GpuMesh {
            vertex_buffer: self.alloc(),
            index_buffer: self.alloc(),
            index_count: mesh.index_count() as u32,
        };
        self.uploads += 1;
        self.live_buffers += 1;
        let vertex_bytes = std::mem::size_of_val(mesh.vertex_data());
        // Must match the layout a GPU pipeline binds the buffer with
        debug_assert_eq!(
            vertex_bytes,
            Vertex::desc().array_stride as usize * mesh.vertex_count()
        );
        self.bytes_uploaded += vertex_bytes + std::mem::size_of_val(mesh.indices.as_slice());
        log::trace!(
            "upload: {} vertices, {} indices -> {:?}",
            mesh.vertex_count(),
            mesh.index_count(),
            gpu
        );
        gpu
    }

    fn draw(&mut self, call: &DrawCall) {
        self.draws += 1;
        self.uniform_bytes += bytemuck::bytes_of(&call.uniforms).len();
        log::trace!(
            "draw: vbo={} ebo={} count={}",
            call.mesh.vertex_buffer,
            call.mesh.index_buffer,
            call.mesh.index_count
        );
        self.last_draw = Some(*call);
    }

    fn release(&mut self, mesh: GpuMesh) {
        self.releases += 1;
        self.live_buffers = self.live_buffers.saturating_sub(1);
        log::trace!("release: {:?}", mesh);
    }
}
