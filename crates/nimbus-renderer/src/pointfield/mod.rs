//! The morphing point field: per-point static data, deterministic layout
//! generation, and the wgpu pipeline that transforms every point on the GPU
//! each frame.
//!
//! Per-point work (ripple, sphere↔wave blend, formation rotation) lives in
//! the vertex shader; points are mutually independent, so the field scales
//! to thousands of points inside one frame's budget.

mod layout;
mod pipeline;
mod types;

pub use layout::*;
pub use pipeline::*;
pub use types::*;
