//! Contract between the render loop and the platform/GPU layer.
//!
//! The loop in [`crate::thread`] is generic over [`Backend`]; the production
//! implementation lives in [`crate::render::WgpuBackend`].

mod backend;

pub use backend::{Backend, FrameStatus};
