//! Geometry types used by the frame presenter.

mod viewport;

pub use viewport::Viewport;
