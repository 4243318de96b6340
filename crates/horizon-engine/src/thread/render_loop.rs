use std::time::Duration;

use super::config::RenderConfig;
use super::presenter::present_frame;
use super::queue::Drained;
use super::state::{RenderPhase, Shared};
use super::task::{run_tasks, GpuTask};
use crate::core::{Backend, FrameStatus};
use crate::time::FrameClock;

/// Body of the render thread: context setup, frame loop, teardown.
///
/// Returns once the running flag is cleared or the surface was asked to close.
pub(crate) fn run<B: Backend>(shared: &Shared<B>, config: &RenderConfig, backend_config: &B::Config) {
    let mut backend = match B::create(backend_config) {
        Ok(backend) => backend,
        Err(err) => {
            log::error!("render thread startup failed: {err:#}");
            shared.set_phase(RenderPhase::Stopped);
            return;
        }
    };

    // Session-local: the shared queue outlives this backend.
    let mut demo_setup: Option<GpuTask<B>> =
        Some(Box::new(|backend: &mut B| backend.prepare_demo()));

    shared.set_phase(RenderPhase::Running);
    log::info!("render loop running");

    let mut clock = FrameClock::new();

    while shared.is_running() && !backend.close_requested() {
        let timeout = if demo_setup.is_some() {
            Duration::ZERO
        } else {
            config.wait_timeout
        };

        let Drained { batch, mut tasks } = shared.queues.wait_and_drain(timeout, &shared.running);

        // Work queued before startup runs ahead of the demo setup.
        if let Some(setup) = demo_setup.take() {
            tasks.push_back(setup);
        }

        if !tasks.is_empty() {
            run_tasks(&mut backend, tasks, &shared.stats);
        }

        let status = present_frame(&mut backend, config.clear_color, batch.as_ref());

        if batch.is_some() {
            if status == FrameStatus::Ready {
                shared.stats.batch_consumed();
            } else {
                shared.stats.batch_dropped();
            }
        }

        match status {
            FrameStatus::Ready => {
                let ft = clock.tick();
                shared.stats.frame_presented();
                log::trace!("presented frame {} (dt {:.2} ms)", ft.frame_index, ft.dt * 1000.0);
            }
            FrameStatus::Skipped => {}
            FrameStatus::Lost => {
                log::error!("surface lost; leaving render loop");
                break;
            }
        }
    }

    log::info!(
        "render loop exiting after {} frames (close requested: {})",
        clock.frames(),
        backend.close_requested()
    );

    backend.teardown();
    shared.set_phase(RenderPhase::Stopped);
}
