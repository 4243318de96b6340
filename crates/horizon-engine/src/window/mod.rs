//! Window + event loop owned by the render thread.

mod host;

pub(crate) use host::SurfaceHost;
pub use host::WindowConfig;
