//! Drawable primitives and the GPU seams they are uploaded and drawn through.
//!
//! The web frontend implements [`BufferAllocator`] and [`DrawTarget`] on top of
//! wgpu; host tests implement them with counting fakes. A primitive owns the
//! buffers it was given until [`Primitive::destroy`] hands them back.

use crate::color::Color;
use crate::geometry::{Mesh, Vertex};
use glam::{Mat4, Vec2, Vec3};

/// Creates and releases GPU-side buffers.
pub trait BufferAllocator {
    type Buffer;

    fn create_vertex_buffer(&mut self, vertices: &[Vertex]) -> Self::Buffer;
    fn create_index_buffer(&mut self, indices: &[u16]) -> Self::Buffer;
    fn release(&mut self, buffer: Self::Buffer);
}

/// Records draw calls against the bound scene shader.
pub trait DrawTarget {
    type Buffer;

    fn set_view_projection(&mut self, view_projection: &Mat4);
    fn draw_indexed(&mut self, vertices: &Self::Buffer, indices: &Self::Buffer, index_count: u32);
}

#[derive(Debug)]
struct MeshBuffers<B> {
    vertices: B,
    indices: B,
}

/// One rectangle or cuboid together with its uploaded buffers.
#[derive(Debug)]
pub struct Primitive<B> {
    mesh: Mesh,
    buffers: Option<MeshBuffers<B>>,
}

impl<B> Primitive<B> {
    pub fn rectangle(position: Vec2, size: Vec2, bottom: Color, top: Color) -> Self {
        Self::from_mesh(Mesh::rectangle(position, size, bottom, top))
    }

    pub fn cuboid(position: Vec3, size: Vec3, bottom: Color, top: Color) -> Self {
        Self::from_mesh(Mesh::cuboid(position, size, bottom, top))
    }

    pub fn from_mesh(mesh: Mesh) -> Self {
        Self {
            mesh,
            buffers: None,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn is_initialized(&self) -> bool {
        self.buffers.is_some()
    }

    /// Upload vertex and index data. Buffers from an earlier `init` are
    /// released first.
    pub fn init<A>(&mut self, allocator: &mut A)
    where
        A: BufferAllocator<Buffer = B>,
    {
        self.destroy(allocator);
        let vertices = allocator.create_vertex_buffer(self.mesh.vertices());
        let indices = allocator.create_index_buffer(self.mesh.indices());
        self.buffers = Some(MeshBuffers { vertices, indices });
    }

    /// Issue one indexed triangle draw. Draws nothing before `init` or after
    /// `destroy`.
    pub fn draw<T>(&self, target: &mut T)
    where
        T: DrawTarget<Buffer = B>,
    {
        if let Some(buffers) = &self.buffers {
            target.draw_indexed(&buffers.vertices, &buffers.indices, self.mesh.index_count());
        }
    }

    /// Hand both buffers back to the allocator. Safe to call repeatedly.
    pub fn destroy<A>(&mut self, allocator: &mut A)
    where
        A: BufferAllocator<Buffer = B>,
    {
        if let Some(MeshBuffers { vertices, indices }) = self.buffers.take() {
            allocator.release(vertices);
            allocator.release(indices);
        }
    }
}
