//! Mesh catalog
//!
//! Every drawable is one of a fixed set of meshes built once at startup. Draw
//! submission refers to them by handle.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{BRICK_HALF_HEIGHT, BRICK_HALF_WIDTH};
use crate::sim::{BrickClass, Lean};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshHandle {
    Shooter,
    Stand,
    RedBasket,
    GreenBasket,
    RedBrick,
    GreenBrick,
    BlackBrick,
    MirrorRising,
    MirrorFalling,
    Projectile,
}

impl MeshHandle {
    pub const ALL: [MeshHandle; 10] = [
        MeshHandle::Shooter,
        MeshHandle::Stand,
        MeshHandle::RedBasket,
        MeshHandle::GreenBasket,
        MeshHandle::RedBrick,
        MeshHandle::GreenBrick,
        MeshHandle::BlackBrick,
        MeshHandle::MirrorRising,
        MeshHandle::MirrorFalling,
        MeshHandle::Projectile,
    ];

    pub fn brick(class: BrickClass) -> Self {
        match class {
            BrickClass::Red => MeshHandle::RedBrick,
            BrickClass::Green => MeshHandle::GreenBrick,
            BrickClass::Black => MeshHandle::BlackBrick,
        }
    }

    pub fn mirror(lean: Lean) -> Self {
        match lean {
            Lean::Rising => MeshHandle::MirrorRising,
            Lean::Falling => MeshHandle::MirrorFalling,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Immutable triangle list
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Raw interleaved bytes for a vertex buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Build the mesh for `handle` in its local frame
    pub fn build(handle: MeshHandle) -> Self {
        let vertices = match handle {
            // Points along +X so rotation by the aim angle aims it
            MeshHandle::Shooter => shapes::triangle(
                Vec2::new(0.0, 0.25),
                Vec2::new(0.0, -0.25),
                Vec2::new(0.5, 0.0),
                colors::SHOOTER,
            ),
            MeshHandle::Stand => shapes::rect(0.125, 0.125, colors::STAND),
            MeshHandle::RedBasket => shapes::rect(0.5, 0.6, colors::RED),
            MeshHandle::GreenBasket => shapes::rect(0.5, 0.6, colors::GREEN),
            MeshHandle::RedBrick => shapes::rect(BRICK_HALF_WIDTH, BRICK_HALF_HEIGHT, colors::RED),
            MeshHandle::GreenBrick => {
                shapes::rect(BRICK_HALF_WIDTH, BRICK_HALF_HEIGHT, colors::GREEN)
            }
            MeshHandle::BlackBrick => {
                shapes::rect(BRICK_HALF_WIDTH, BRICK_HALF_HEIGHT, colors::BLACK)
            }
            MeshHandle::MirrorRising => {
                shapes::strip(0.3, (-0.3, -0.24), (0.24, 0.3), colors::MIRROR)
            }
            MeshHandle::MirrorFalling => {
                shapes::strip(0.3, (0.24, 0.3), (-0.3, -0.24), colors::MIRROR)
            }
            MeshHandle::Projectile => shapes::rect(0.15, 0.03, colors::PROJECTILE),
        };
        Self::new(vertices)
    }
}

/// All meshes, indexed by handle
#[derive(Debug, Clone)]
pub struct MeshCatalog {
    meshes: Vec<Mesh>,
}

impl Default for MeshCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshCatalog {
    pub fn new() -> Self {
        Self {
            meshes: MeshHandle::ALL.iter().map(|&h| Mesh::build(h)).collect(),
        }
    }

    pub fn get(&self, handle: MeshHandle) -> &Mesh {
        &self.meshes[handle.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshHandle, &Mesh)> {
        MeshHandle::ALL.iter().copied().zip(self.meshes.iter())
    }

    /// Total vertex bytes across the catalog
    pub fn byte_len(&self) -> usize {
        self.meshes.iter().map(|m| m.as_bytes().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::VERTEX_STRIDE;

    #[test]
    fn test_catalog_indexing_matches_handles() {
        let catalog = MeshCatalog::new();
        for (handle, mesh) in catalog.iter() {
            assert_eq!(mesh, &Mesh::build(handle));
            assert_eq!(catalog.get(handle), mesh);
        }
    }

    #[test]
    fn test_vertex_counts_and_bytes() {
        let catalog = MeshCatalog::new();
        assert_eq!(catalog.get(MeshHandle::Shooter).vertex_count(), 3);
        for handle in &MeshHandle::ALL[1..] {
            assert_eq!(catalog.get(*handle).vertex_count(), 6, "{:?}", handle);
        }
        assert_eq!(VERTEX_STRIDE, 24);
        assert_eq!(catalog.get(MeshHandle::Stand).as_bytes().len(), 6 * VERTEX_STRIDE);
        assert_eq!(catalog.byte_len(), (3 + 9 * 6) * VERTEX_STRIDE);
    }

    #[test]
    fn test_brick_mesh_matches_hit_box() {
        let mesh = Mesh::build(MeshHandle::brick(BrickClass::Black));
        let max_x = mesh
            .vertices()
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        let max_y = mesh
            .vertices()
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_x, BRICK_HALF_WIDTH);
        assert_eq!(max_y, BRICK_HALF_HEIGHT);
        assert!(mesh.vertices().iter().all(|v| v.color == colors::BLACK));
    }

    #[test]
    fn test_mirror_meshes_lean_opposite_ways() {
        let rising = Mesh::build(MeshHandle::mirror(Lean::Rising));
        let falling = Mesh::build(MeshHandle::mirror(Lean::Falling));
        // Top-right corner belongs to the rising strip only
        let has = |m: &Mesh, p: [f32; 3]| m.vertices().iter().any(|v| v.position == p);
        assert!(has(&rising, [0.3, 0.3, 0.0]));
        assert!(!has(&falling, [0.3, 0.3, 0.0]));
        assert!(has(&falling, [0.3, -0.3, 0.0]));
    }
}
