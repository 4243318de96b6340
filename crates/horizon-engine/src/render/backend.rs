use anyhow::{Context, Result};

use super::clear::clear_frame;
use super::list::ListRenderer;
use super::triangle::TriangleDemo;
use crate::coords::Viewport;
use crate::core::{Backend, FrameStatus};
use crate::device::{GpuFrame, GpuInit, SurfaceErrorAction};
use crate::paint::Color;
use crate::scene::DrawList;
use crate::window::{SurfaceHost, WindowConfig};

/// Startup parameters for [`WgpuBackend`].
#[derive(Debug, Clone, Default)]
pub struct WgpuConfig {
    pub window: WindowConfig,
    pub gpu: GpuInit,
}

/// winit + wgpu backend.
///
/// Field order is drop order: frame and demo resources go before the window
/// and event loop they depend on.
pub struct WgpuBackend {
    frame: Option<GpuFrame>,
    triangle: Option<TriangleDemo>,
    lists: ListRenderer,
    host: SurfaceHost,
}

impl Backend for WgpuBackend {
    type Config = WgpuConfig;

    fn create(config: &WgpuConfig) -> Result<Self> {
        let host = SurfaceHost::create(config.window.clone(), config.gpu.clone())
            .context("graphics context startup failed")?;

        log::info!("graphics context bound to render thread");

        Ok(Self {
            frame: None,
            triangle: None,
            lists: ListRenderer::new(),
            host,
        })
    }

    fn close_requested(&self) -> bool {
        self.host.close_requested()
    }

    fn surface_size(&self) -> Viewport {
        self.host
            .with_gpu(|gpu| Viewport::from(gpu.size()))
            .unwrap_or_default()
    }

    fn begin_frame(&mut self, viewport: Viewport, clear: Color) -> FrameStatus {
        // Minimized.
        if viewport.is_empty() {
            return FrameStatus::Skipped;
        }

        let acquired = self.host.with_window_gpu(|_, gpu| match gpu.begin_frame() {
            Ok(mut frame) => {
                clear_frame(&mut frame.encoder, &frame.view, gpu.depth_view(), clear);
                Ok(frame)
            }
            Err(err) => Err(gpu.handle_surface_error(err)),
        });

        match acquired {
            Some(Ok(frame)) => {
                self.frame = Some(frame);
                FrameStatus::Ready
            }
            Some(Err(SurfaceErrorAction::Fatal)) | None => FrameStatus::Lost,
            Some(Err(_)) => FrameStatus::Skipped,
        }
    }

    fn prepare_demo(&mut self) -> Result<()> {
        if self.triangle.is_some() {
            log::debug!("demo triangle already prepared");
            return Ok(());
        }

        let triangle = self
            .host
            .with_gpu(|gpu| TriangleDemo::new(gpu.device(), gpu.surface_format()))
            .context("no graphics context")??;

        self.triangle = Some(triangle);
        Ok(())
    }

    fn demo_ready(&self) -> bool {
        self.triangle.is_some()
    }

    fn draw_demo(&mut self, viewport: Viewport) {
        if let (Some(frame), Some(triangle)) = (self.frame.as_mut(), self.triangle.as_ref()) {
            triangle.draw(frame, viewport);
        }
    }

    fn render_list(&mut self, list: &DrawList) {
        if let Some(frame) = self.frame.as_mut() {
            self.lists.render(frame, list);
        }
    }

    fn present(&mut self) {
        let Some(frame) = self.frame.take() else { return };
        self.host.with_window_gpu(|window, gpu| {
            window.pre_present_notify();
            gpu.submit(frame);
        });
    }

    fn pump_events(&mut self) {
        self.host.pump();
    }

    fn teardown(self) {
        let Self {
            frame,
            triangle,
            lists: _,
            host,
        } = self;

        drop(frame);
        if let Some(triangle) = triangle {
            triangle.destroy();
            log::debug!("demo triangle released");
        }
        host.shutdown();

        log::info!("graphics context released");
    }
}
