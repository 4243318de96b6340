use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use super::task::GpuTask;
use crate::scene::DrawList;

struct Pending<B> {
    draws: VecDeque<DrawList>,
    tasks: VecDeque<GpuTask<B>>,
}

impl<B> Pending<B> {
    fn is_empty(&self) -> bool {
        self.draws.is_empty() && self.tasks.is_empty()
    }
}

/// Work taken off the queues for one render cycle.
pub(crate) struct Drained<B> {
    /// Oldest queued draw list, if any. At most one per cycle.
    pub batch: Option<DrawList>,
    /// Every task that was queued when the cycle drained, in submission order.
    pub tasks: VecDeque<GpuTask<B>>,
}

/// Queue depths at a point in time.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PendingWork {
    pub draw_lists: usize,
    pub gpu_tasks: usize,
}

/// Draw-list and GPU-task FIFOs behind one mutex/condvar pair.
///
/// The lock covers only the two containers. Producers hold it for a push; the
/// render thread holds it while waiting and while moving work out, never while
/// running tasks or issuing graphics calls.
pub(crate) struct WorkQueues<B> {
    pending: Mutex<Pending<B>>,
    wake: Condvar,
}

impl<B> WorkQueues<B> {
    pub(crate) fn new() -> Self {
        Self {
            pending: Mutex::new(Pending {
                draws: VecDeque::new(),
                tasks: VecDeque::new(),
            }),
            wake: Condvar::new(),
        }
    }

    pub(crate) fn push_draw_list(&self, list: DrawList) {
        self.pending.lock().draws.push_back(list);
        self.wake.notify_one();
    }

    pub(crate) fn push_task(&self, task: GpuTask<B>) {
        self.pending.lock().tasks.push_back(task);
        self.wake.notify_one();
    }

    /// Wakes every waiter, e.g. after the running flag was cleared.
    pub(crate) fn wake_all(&self) {
        // Taking the lock orders this wake after any in-progress predicate check.
        drop(self.pending.lock());
        self.wake.notify_all();
    }

    /// Blocks until work arrives, `running` turns false, or `timeout` elapses,
    /// then takes at most one draw list and all queued tasks.
    pub(crate) fn wait_and_drain(&self, timeout: Duration, running: &AtomicBool) -> Drained<B> {
        let mut pending = self.pending.lock();
        let _ = self.wake.wait_while_for(
            &mut pending,
            |p| p.is_empty() && running.load(Ordering::Acquire),
            timeout,
        );

        Drained {
            batch: pending.draws.pop_front(),
            tasks: std::mem::take(&mut pending.tasks),
        }
    }

    pub(crate) fn pending(&self) -> PendingWork {
        let pending = self.pending.lock();
        PendingWork {
            draw_lists: pending.draws.len(),
            gpu_tasks: pending.tasks.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    use glam::Mat4;

    use super::*;
    use crate::scene::{DrawCommand, MaterialId, MeshId};

    struct Nothing;

    fn list(mesh: u64) -> DrawList {
        DrawList::from(vec![DrawCommand::new(MeshId(mesh), MaterialId(0), Mat4::IDENTITY)])
    }

    fn first_mesh(list: &DrawList) -> u64 {
        list.commands()[0].mesh().0
    }

    #[test]
    fn one_draw_list_per_drain_in_fifo_order() {
        let q = WorkQueues::<Nothing>::new();
        let running = AtomicBool::new(true);
        q.push_draw_list(list(1));
        q.push_draw_list(list(2));
        q.push_draw_list(list(3));

        let mut seen = Vec::new();
        for _ in 0..3 {
            let d = q.wait_and_drain(Duration::from_millis(1), &running);
            seen.push(first_mesh(&d.batch.unwrap()));
        }
        assert_eq!(seen, vec![1, 2, 3]);

        let d = q.wait_and_drain(Duration::from_millis(1), &running);
        assert!(d.batch.is_none());
    }

    #[test]
    fn all_tasks_drain_together() {
        let q = WorkQueues::<Nothing>::new();
        let running = AtomicBool::new(true);
        for _ in 0..4 {
            q.push_task(Box::new(|_| Ok(())));
        }
        q.push_draw_list(list(1));
        q.push_draw_list(list(2));

        let d = q.wait_and_drain(Duration::from_millis(1), &running);
        assert_eq!(d.tasks.len(), 4);
        assert!(d.batch.is_some());
        assert_eq!(q.pending(), PendingWork { draw_lists: 1, gpu_tasks: 0 });
    }

    #[test]
    fn drained_tasks_keep_submission_order() {
        let q = WorkQueues::<Vec<u32>>::new();
        let running = AtomicBool::new(true);
        for i in 0..5u32 {
            q.push_task(Box::new(move |v: &mut Vec<u32>| {
                v.push(i);
                Ok(())
            }));
        }

        let d = q.wait_and_drain(Duration::from_millis(1), &running);
        let mut out = Vec::new();
        for t in d.tasks {
            t(&mut out).unwrap();
        }
        assert_eq!(out, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn empty_wait_times_out() {
        let q = WorkQueues::<Nothing>::new();
        let running = AtomicBool::new(true);
        let start = Instant::now();
        let d = q.wait_and_drain(Duration::from_millis(20), &running);
        assert!(start.elapsed() >= Duration::from_millis(15));
        assert!(d.batch.is_none());
        assert!(d.tasks.is_empty());
    }

    #[test]
    fn cleared_running_flag_returns_immediately() {
        let q = WorkQueues::<Nothing>::new();
        let running = AtomicBool::new(false);
        let start = Instant::now();
        q.wait_and_drain(Duration::from_secs(5), &running);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn producer_on_another_thread_wakes_waiter() {
        let q = Arc::new(WorkQueues::<Nothing>::new());
        let running = AtomicBool::new(true);

        let producer = {
            let q = Arc::clone(&q);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                q.push_draw_list(list(9));
            })
        };

        let start = Instant::now();
        let d = q.wait_and_drain(Duration::from_secs(5), &running);
        producer.join().unwrap();

        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(first_mesh(&d.batch.unwrap()), 9);
    }

    #[test]
    fn wake_all_releases_waiter_after_flag_cleared() {
        let q = Arc::new(WorkQueues::<Nothing>::new());
        let running = Arc::new(AtomicBool::new(true));

        let stopper = {
            let q = Arc::clone(&q);
            let running = Arc::clone(&running);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                running.store(false, Ordering::Release);
                q.wake_all();
            })
        };

        let start = Instant::now();
        q.wait_and_drain(Duration::from_secs(5), &running);
        stopper.join().unwrap();
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
