//! Horizon engine crate.
//!
//! A dedicated render thread that owns the graphics context and drains two work
//! queues: per-frame draw lists and one-off GPU tasks submitted from other
//! threads.

pub mod coords;
pub mod core;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod thread;
pub mod time;
pub mod window;

#[cfg(test)]
mod test_support;

pub use crate::core::{Backend, FrameStatus};
pub use render::{WgpuBackend, WgpuConfig};
pub use scene::{DrawCommand, DrawList, MaterialId, MeshId};
pub use thread::{RenderConfig, RenderThread, Submitter};
