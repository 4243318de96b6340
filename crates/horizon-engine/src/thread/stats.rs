use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by the render thread, readable from any thread.
#[derive(Debug, Default)]
pub(crate) struct RenderStats {
    frames_presented: AtomicU64,
    batches_consumed: AtomicU64,
    batches_dropped: AtomicU64,
    tasks_completed: AtomicU64,
    tasks_failed: AtomicU64,
}

/// Point-in-time copy of the render thread counters.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct StatsSnapshot {
    pub frames_presented: u64,
    /// Draw lists dispatched to a presented frame.
    pub batches_consumed: u64,
    /// Draw lists taken off the queue for a frame that could not be drawn.
    pub batches_dropped: u64,
    pub tasks_completed: u64,
    pub tasks_failed: u64,
}

impl RenderStats {
    pub(crate) fn frame_presented(&self) {
        self.frames_presented.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn batch_consumed(&self) {
        self.batches_consumed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn batch_dropped(&self) {
        self.batches_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn task_completed(&self) {
        self.tasks_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn task_failed(&self) {
        self.tasks_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames_presented: self.frames_presented.load(Ordering::Relaxed),
            batches_consumed: self.batches_consumed.load(Ordering::Relaxed),
            batches_dropped: self.batches_dropped.load(Ordering::Relaxed),
            tasks_completed: self.tasks_completed.load(Ordering::Relaxed),
            tasks_failed: self.tasks_failed.load(Ordering::Relaxed),
        }
    }
}
