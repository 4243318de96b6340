//! wgpu implementation of the render thread backend.
//!
//! Frame layout: a clear pass (color + depth), the demo triangle pass, then the
//! draw-list extension point. All of it runs on the render thread.

mod backend;
mod clear;
mod list;
mod triangle;

pub use backend::{WgpuBackend, WgpuConfig};
pub use list::ListRenderer;
pub use triangle::TriangleDemo;
