//! WebGPU rendering module
//!
//! Every entity is a flat-color rectangle built as two triangles in canvas
//! pixel space, converted to NDC at upload time.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, canvas_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
