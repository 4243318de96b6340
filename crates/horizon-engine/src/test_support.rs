//! Headless backend that records every call the render loop makes.

use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

use anyhow::Result;
use parking_lot::Mutex;

use crate::coords::Viewport;
use crate::core::{Backend, FrameStatus};
use crate::paint::Color;
use crate::scene::DrawList;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Create(ThreadId),
    BeginFrame,
    PrepareDemo,
    DrawDemo,
    /// Length and first mesh id of the dispatched list.
    RenderList(usize, Option<u64>),
    Present,
    PumpEvents,
    Task(&'static str),
    Teardown { demo_released: bool },
}

pub(crate) type CallLog = Arc<Mutex<Vec<Call>>>;

#[derive(Clone, Default)]
pub(crate) struct RecordingConfig {
    pub log: CallLog,
    pub fail_create: bool,
    pub create_delay: Duration,
    pub fail_demo: bool,
    /// Report a close request after this many presented frames.
    pub close_after_frames: Option<u64>,
    /// Statuses returned by successive `begin_frame` calls; `Ready` once used up.
    pub frame_statuses: VecDeque<FrameStatus>,
}

pub(crate) struct RecordingBackend {
    log: CallLog,
    owner: ThreadId,
    fail_demo: bool,
    close_after_frames: Option<u64>,
    frame_statuses: VecDeque<FrameStatus>,
    presented: u64,
    demo: bool,
}

impl RecordingBackend {
    /// Lets GPU tasks leave a mark in the call log.
    pub(crate) fn note(&mut self, label: &'static str) {
        self.record(Call::Task(label));
    }

    fn record(&self, call: Call) {
        assert_eq!(thread::current().id(), self.owner, "backend touched off its thread");
        self.log.lock().push(call);
    }
}

impl Backend for RecordingBackend {
    type Config = RecordingConfig;

    fn create(config: &RecordingConfig) -> Result<Self> {
        thread::sleep(config.create_delay);
        anyhow::ensure!(!config.fail_create, "no display available");

        let owner = thread::current().id();
        config.log.lock().push(Call::Create(owner));

        Ok(Self {
            log: Arc::clone(&config.log),
            owner,
            fail_demo: config.fail_demo,
            close_after_frames: config.close_after_frames,
            frame_statuses: config.frame_statuses.clone(),
            presented: 0,
            demo: false,
        })
    }

    fn close_requested(&self) -> bool {
        self.close_after_frames.is_some_and(|n| self.presented >= n)
    }

    fn surface_size(&self) -> Viewport {
        Viewport::new(800, 600)
    }

    fn begin_frame(&mut self, _viewport: Viewport, _clear: Color) -> FrameStatus {
        self.record(Call::BeginFrame);
        self.frame_statuses.pop_front().unwrap_or(FrameStatus::Ready)
    }

    fn prepare_demo(&mut self) -> Result<()> {
        self.record(Call::PrepareDemo);
        anyhow::ensure!(!self.fail_demo, "shader compilation failed");
        self.demo = true;
        Ok(())
    }

    fn demo_ready(&self) -> bool {
        self.demo
    }

    fn draw_demo(&mut self, _viewport: Viewport) {
        self.record(Call::DrawDemo);
    }

    fn render_list(&mut self, list: &DrawList) {
        let first = list.commands().first().map(|c| c.mesh().0);
        self.record(Call::RenderList(list.len(), first));
    }

    fn present(&mut self) {
        self.presented += 1;
        self.record(Call::Present);
    }

    fn pump_events(&mut self) {
        self.record(Call::PumpEvents);
    }

    fn teardown(self) {
        self.record(Call::Teardown { demo_released: self.demo });
    }
}

/// Polls `cond` every millisecond until it holds or `timeout` passes.
pub(crate) fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    cond()
}
