use std::time::Duration;

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "FractalHorizon".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// How many pumps startup waits for the platform to hand out a window.
const STARTUP_PUMPS: usize = 100;
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

#[self_referencing]
pub(crate) struct SurfaceEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Window-system side of the render thread.
///
/// Owns the event loop and the single window + GPU context. Events are only
/// processed when the render loop pumps them, so window callbacks run on the
/// render thread too.
pub(crate) struct SurfaceHost {
    handler: HostHandler,
    event_loop: EventLoop<()>,
}

struct HostHandler {
    config: WindowConfig,
    gpu_init: GpuInit,
    entry: Option<SurfaceEntry>,
    startup_error: Option<anyhow::Error>,
    close_requested: bool,
}

impl SurfaceHost {
    /// Creates the event loop on the calling thread, then pumps it until the
    /// platform delivers `resumed` and the window + GPU context exist.
    pub(crate) fn create(config: WindowConfig, gpu_init: GpuInit) -> Result<Self> {
        let mut event_loop = build_event_loop()?;
        let mut handler = HostHandler {
            config,
            gpu_init,
            entry: None,
            startup_error: None,
            close_requested: false,
        };

        for _ in 0..STARTUP_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut handler)
            {
                anyhow::bail!("event loop exited during startup (code {code})");
            }
            if let Some(err) = handler.startup_error.take() {
                return Err(err);
            }
            if handler.entry.is_some() {
                return Ok(Self { handler, event_loop });
            }
        }

        anyhow::bail!("window system did not provide a window during startup")
    }

    pub(crate) fn close_requested(&self) -> bool {
        self.handler.close_requested
    }

    /// Processes pending events without blocking.
    pub(crate) fn pump(&mut self) {
        if let PumpStatus::Exit(code) =
            self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.handler)
        {
            log::info!("event loop exited (code {code})");
            self.handler.close_requested = true;
        }
    }

    pub(crate) fn with_gpu<R>(&self, f: impl FnOnce(&Gpu<'_>) -> R) -> Option<R> {
        self.handler.entry.as_ref().map(|e| e.with_gpu(|gpu| f(gpu)))
    }

    /// Runs `f` with the window and GPU context.
    pub(crate) fn with_window_gpu<R>(
        &mut self,
        f: impl FnOnce(&Window, &mut Gpu<'_>) -> R,
    ) -> Option<R> {
        self.handler
            .entry
            .as_mut()
            .map(|e| e.with_mut(|fields| f(fields.window, fields.gpu)))
    }

    /// Destroys the GPU context, then the window, then the event loop.
    pub(crate) fn shutdown(self) {
        let Self { mut handler, event_loop } = self;
        drop(handler.entry.take());
        drop(event_loop);
    }
}

impl ApplicationHandler for HostHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.startup_error.is_some() {
            return;
        }

        match create_entry(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(entry) => self.entry = Some(entry),
            Err(err) => self.startup_error = Some(err),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.close_requested = true;
            }
            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }
            _ => {}
        }
    }
}

fn create_entry(
    event_loop: &ActiveEventLoop,
    config: &WindowConfig,
    gpu_init: GpuInit,
) -> Result<SurfaceEntry> {
    let attrs = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(config.initial_size)
        .with_visible(true);

    let window = event_loop
        .create_window(attrs)
        .context("failed to create window")?;

    SurfaceEntryTryBuilder {
        window,
        gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
    }
    .try_build()
}

/// The render thread is not the main thread, so the event loop has to opt in.
fn build_event_loop() -> Result<EventLoop<()>> {
    let mut builder = EventLoop::builder();

    #[cfg(target_os = "linux")]
    {
        use winit::platform::wayland::EventLoopBuilderExtWayland;
        use winit::platform::x11::EventLoopBuilderExtX11;

        if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            EventLoopBuilderExtWayland::with_any_thread(&mut builder, true);
        } else {
            EventLoopBuilderExtX11::with_any_thread(&mut builder, true);
        }
    }

    #[cfg(target_os = "windows")]
    {
        use winit::platform::windows::EventLoopBuilderExtWindows;
        builder.with_any_thread(true);
    }

    builder.build().context("failed to create winit event loop")
}
