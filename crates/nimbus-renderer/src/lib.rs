//! GPU point-field renderer for the Nimbus presence visual.
//!
//! A fixed set of points morphs between two deterministic formations, a
//! sphere (idle) and a set of wavy horizontal lines (busy), under a
//! spring-damped blend factor, while the whole formation slowly rotates.
//! Per-point work runs in the vertex shader; the CPU only rewrites a small
//! uniform block each frame.

pub mod gpu;
pub mod matrix;
pub mod pointfield;
pub mod scene;
pub mod scheduler;
pub mod spring;

pub use gpu::{GpuContext, RendererError};
pub use scene::SceneRenderer;
pub use scheduler::{FrameClock, FrameInputs, FrameScheduler, FrameTimer};
pub use spring::{MorphSpring, SpringParams};
