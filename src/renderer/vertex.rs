//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Vertex with position and color
///
/// Meshes are flat (z = 0) but positions stay 3D so they feed a standard
/// `mvp * vec4(position, 1)` vertex shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 3]) -> Self {
        Self {
            position: [x, y, 0.0],
            color,
        }
    }
}

/// One interleaved attribute of `Vertex`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub shader_location: u32,
    /// Byte offset within a vertex
    pub offset: usize,
    /// Number of f32 components
    pub components: usize,
}

/// Interleaved layout for GPU upload: location 0 position, location 1 color
pub const VERTEX_STRIDE: usize = std::mem::size_of::<Vertex>();
pub const VERTEX_ATTRIBUTES: [VertexAttribute; 2] = [
    VertexAttribute {
        shader_location: 0,
        offset: 0,
        components: 3,
    },
    VertexAttribute {
        shader_location: 1,
        offset: std::mem::size_of::<[f32; 3]>(),
        components: 3,
    },
];

/// Colors for game elements
pub mod colors {
    pub const SHOOTER: [f32; 3] = [0.4, 0.0, 0.8];
    pub const STAND: [f32; 3] = [0.8, 0.4, 1.0];
    pub const PROJECTILE: [f32; 3] = [0.8, 0.4, 1.0];
    pub const RED: [f32; 3] = [1.0, 0.0, 0.0];
    pub const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
    pub const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
    pub const MIRROR: [f32; 3] = [0.6, 0.8, 1.0];
    pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 0.8, 1.0]; // Pale yellow
}
