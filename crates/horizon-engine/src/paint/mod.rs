//! Color types shared by the frame presenter and backends.

mod color;

pub use color::Color;
