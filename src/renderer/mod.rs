//! Rendering module
//!
//! Builds the mesh catalog and submits one draw per visible object each
//! frame. Backend-agnostic: a host uploads `MeshCatalog` once and implements
//! `DrawSink`.

pub mod mesh;
pub mod shapes;
pub mod submit;
pub mod vertex;

pub use mesh::{Mesh, MeshCatalog, MeshHandle};
pub use submit::{DrawCall, DrawList, DrawSink, render_frame};
pub use vertex::Vertex;
