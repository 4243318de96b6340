//! Draw-list types handed from producer threads to the render thread.
//!
//! Mesh and material ids are opaque keys; they are carried through untouched and
//! resolved (or rejected) by the resource system, not here.

mod cmd;
mod list;

pub use cmd::{DrawCommand, MaterialId, MeshId};
pub use list::DrawList;
