//! The render thread: work queues, frame loop and lifecycle.
//!
//! Exactly one thread talks to the graphics context. Producers hand it draw
//! lists and GPU tasks through [`RenderThread`] or a [`Submitter`]; the thread
//! wakes on new work or after a short timeout, runs every queued task, takes at
//! most one draw list, and presents a frame.

mod config;
mod controller;
mod presenter;
mod queue;
mod render_loop;
mod state;
mod stats;
mod task;

pub use config::RenderConfig;
pub use controller::{RenderThread, Submitter};
pub use queue::PendingWork;
pub use state::RenderPhase;
pub use stats::StatsSnapshot;
pub use task::{GpuTask, TaskOutcome};
