use crate::color::Color;
use glam::{Vec2, Vec3};

/// Interleaved vertex as uploaded to the GPU: position then color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    #[inline]
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }
}

// Triangle lists, counter-clockwise as seen from outside each face.
const RECTANGLE_INDICES: [u16; 6] = [
    0, 1, 2, 2, 3, 0, //
];

const CUBOID_INDICES: [u16; 36] = [
    0, 1, 2, 2, 3, 0, // front
    1, 4, 7, 7, 2, 1, // right
    4, 5, 6, 6, 7, 4, // back
    5, 0, 3, 3, 6, 5, // left
    3, 2, 7, 7, 6, 3, // top
    5, 4, 1, 1, 0, 5, // bottom
];

/// CPU-side vertex and index data for one drawable shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

impl Mesh {
    /// Flat quad in the z = 0 plane. `position` is the bottom-left corner.
    pub fn rectangle(position: Vec2, size: Vec2, bottom: Color, top: Color) -> Self {
        let left = position.x;
        let bottom_y = position.y;
        let right = left + size.x;
        let top_y = bottom_y + size.y;
        let vertices = vec![
            Vertex::new(Vec3::new(left, bottom_y, 0.0), bottom),
            Vertex::new(Vec3::new(right, bottom_y, 0.0), bottom),
            Vertex::new(Vec3::new(right, top_y, 0.0), top),
            Vertex::new(Vec3::new(left, top_y, 0.0), top),
        ];
        Self {
            vertices,
            indices: RECTANGLE_INDICES.to_vec(),
        }
    }

    /// Box extruded away from the viewer. `position` is the left-bottom-front
    /// corner; the back face sits at `position.z - size.z`.
    pub fn cuboid(position: Vec3, size: Vec3, bottom: Color, top: Color) -> Self {
        let left = position.x;
        let bottom_y = position.y;
        let front = position.z;
        let right = left + size.x;
        let top_y = bottom_y + size.y;
        let back = front - size.z;
        // Back face is mirrored so it is counter-clockwise when seen from behind.
        let vertices = vec![
            Vertex::new(Vec3::new(left, bottom_y, front), bottom),
            Vertex::new(Vec3::new(right, bottom_y, front), bottom),
            Vertex::new(Vec3::new(right, top_y, front), top),
            Vertex::new(Vec3::new(left, top_y, front), top),
            Vertex::new(Vec3::new(right, bottom_y, back), bottom),
            Vertex::new(Vec3::new(left, bottom_y, back), bottom),
            Vertex::new(Vec3::new(left, top_y, back), top),
            Vertex::new(Vec3::new(right, top_y, back), top),
        ];
        Self {
            vertices,
            indices: CUBOID_INDICES.to_vec(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
