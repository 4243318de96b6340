use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use super::queue::WorkQueues;
use super::stats::RenderStats;

/// Where the render thread is in its lifetime.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderPhase {
    /// Not started yet, or starting and still creating the context.
    Uninitialized,
    /// Context is up and the frame loop is cycling.
    Running,
    /// The loop exited (or startup failed) and teardown finished.
    Stopped,
}

impl RenderPhase {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => RenderPhase::Running,
            2 => RenderPhase::Stopped,
            _ => RenderPhase::Uninitialized,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            RenderPhase::Uninitialized => 0,
            RenderPhase::Running => 1,
            RenderPhase::Stopped => 2,
        }
    }
}

/// State shared between the controller, submitters and the render thread.
pub(crate) struct Shared<B> {
    pub(crate) queues: WorkQueues<B>,
    pub(crate) running: AtomicBool,
    pub(crate) stats: RenderStats,
    phase: AtomicU8,
}

impl<B> Shared<B> {
    pub(crate) fn new() -> Self {
        Self {
            queues: WorkQueues::new(),
            running: AtomicBool::new(false),
            stats: RenderStats::default(),
            phase: AtomicU8::new(RenderPhase::Uninitialized.as_u8()),
        }
    }

    #[inline]
    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub(crate) fn phase(&self) -> RenderPhase {
        RenderPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub(crate) fn set_phase(&self, phase: RenderPhase) {
        self.phase.store(phase.as_u8(), Ordering::Release);
    }
}
