//! WebGPU rendering module
//!
//! The scene is rebuilt as a flat triangle list every frame; shapes are
//! generated on the CPU in viewport pixels and mapped to NDC on upload.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
