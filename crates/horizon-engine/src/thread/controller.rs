use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::thread::{self, JoinHandle};

use super::config::RenderConfig;
use super::queue::PendingWork;
use super::render_loop;
use super::state::{RenderPhase, Shared};
use super::stats::StatsSnapshot;
use crate::core::Backend;
use crate::scene::DrawList;

/// Owner of the render thread.
///
/// `start()` spawns the thread, `stop()` asks it to finish and joins it. Work is
/// submitted with [`submit_draw_list`](Self::submit_draw_list) and
/// [`schedule_gpu`](Self::schedule_gpu), or from other threads through a
/// [`Submitter`]. Dropping the owner stops the thread.
pub struct RenderThread<B: Backend> {
    shared: Arc<Shared<B>>,
    config: RenderConfig,
    backend_config: B::Config,
    handle: Option<JoinHandle<()>>,
}

impl<B: Backend> RenderThread<B> {
    pub fn new(config: RenderConfig, backend_config: B::Config) -> Self {
        Self {
            shared: Arc::new(Shared::new()),
            config,
            backend_config,
            handle: None,
        }
    }

    /// Spawns the render thread. No-op while already running.
    pub fn start(&mut self) {
        if self.shared.running.swap(true, Ordering::AcqRel) {
            return;
        }

        self.shared.set_phase(RenderPhase::Uninitialized);

        let shared = Arc::clone(&self.shared);
        let config = self.config.clone();
        let backend_config = self.backend_config.clone();

        let spawned = thread::Builder::new()
            .name(self.config.thread_name.clone())
            .spawn(move || render_loop::run(&shared, &config, &backend_config));

        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                log::info!("render thread '{}' started", self.config.thread_name);
            }
            Err(err) => {
                log::error!("failed to spawn render thread: {err}");
                self.shared.running.store(false, Ordering::Release);
                self.shared.set_phase(RenderPhase::Stopped);
            }
        }
    }

    /// Clears the running flag, wakes the loop and blocks until the thread has
    /// torn down and exited. No-op when not running.
    pub fn stop(&mut self) {
        if !self.shared.running.swap(false, Ordering::AcqRel) {
            return;
        }

        self.shared.queues.wake_all();

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("render thread panicked");
                self.shared.set_phase(RenderPhase::Stopped);
            }
        }

        log::info!("render thread stopped");
    }

    /// True between `start()` and `stop()`, even if the thread exited on its own.
    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    /// True when no render thread is alive: never started, stopped, failed
    /// during startup, or left its loop after a close request.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    pub fn phase(&self) -> RenderPhase {
        self.shared.phase()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.shared.stats.snapshot()
    }

    /// Work queued but not yet taken by the render thread.
    pub fn pending(&self) -> PendingWork {
        self.shared.queues.pending()
    }

    /// Queues one frame's draw list. Never blocks on the render thread.
    pub fn submit_draw_list(&self, list: DrawList) {
        self.shared.queues.push_draw_list(list);
    }

    /// Queues a task to run on the render thread with context access.
    pub fn schedule_gpu<F>(&self, task: F)
    where
        F: FnOnce(&mut B) -> anyhow::Result<()> + Send + 'static,
    {
        self.shared.queues.push_task(Box::new(task));
    }

    /// Returns a cloneable handle for submitting work from other threads.
    pub fn submitter(&self) -> Submitter<B> {
        Submitter {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<B: Backend> Drop for RenderThread<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Thread-safe submission handle.
///
/// Submissions made after the render thread exited are kept but never consumed.
pub struct Submitter<B> {
    shared: Arc<Shared<B>>,
}

impl<B> Clone for Submitter<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<B: Backend> Submitter<B> {
    pub fn submit_draw_list(&self, list: DrawList) {
        self.shared.queues.push_draw_list(list);
    }

    pub fn schedule_gpu<F>(&self, task: F)
    where
        F: FnOnce(&mut B) -> anyhow::Result<()> + Send + 'static,
    {
        self.shared.queues.push_task(Box::new(task));
    }

    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }
}
