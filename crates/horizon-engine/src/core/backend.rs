use anyhow::Result;

use crate::coords::Viewport;
use crate::paint::Color;
use crate::scene::DrawList;

/// Outcome of starting a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// A drawable was acquired and cleared; drawing may proceed.
    Ready,
    /// Transient surface problem; nothing is drawn or presented this cycle.
    Skipped,
    /// The surface cannot be recovered; the render loop should shut down.
    Lost,
}

/// Windowing + graphics context owned by the render thread.
///
/// A backend value is created on the render thread by [`Backend::create`] and
/// never leaves it: every method below, and every GPU task, runs on that one
/// thread. The type therefore does not need to be `Send`; only its `Config`
/// crosses threads.
///
/// Per frame the render loop calls, in order:
/// `begin_frame` → `draw_demo` (when `demo_ready`) → `render_list` → `present`
/// → `pump_events`. When `begin_frame` does not return `Ready`, the draw and
/// present steps are skipped but events are still pumped.
pub trait Backend: Sized + 'static {
    /// Startup parameters, moved to the render thread on `start()`.
    type Config: Clone + Send + 'static;

    /// Initializes the windowing library, creates the drawable surface and binds
    /// the graphics context to the calling thread.
    ///
    /// On error nothing is left allocated and the render loop is not entered.
    fn create(config: &Self::Config) -> Result<Self>;

    /// Whether the windowing system asked the surface to close.
    fn close_requested(&self) -> bool;

    /// Current drawable size.
    fn surface_size(&self) -> Viewport;

    /// Acquires the next drawable, sets the viewport and clears color + depth.
    fn begin_frame(&mut self, viewport: Viewport, clear: Color) -> FrameStatus;

    /// One-time setup of the built-in demonstration geometry.
    ///
    /// Runs as a GPU task. Calling it again once the demo is ready is a no-op.
    fn prepare_demo(&mut self) -> Result<()>;

    fn demo_ready(&self) -> bool;

    /// Draws the demonstration geometry into the current frame.
    fn draw_demo(&mut self, viewport: Viewport);

    /// Translates a submitted draw list into graphics calls for the current frame.
    ///
    /// Mesh and material ids are passed through unvalidated.
    fn render_list(&mut self, list: &DrawList);

    /// Presents the current frame (buffer swap).
    fn present(&mut self);

    /// Processes pending window-system events without blocking.
    fn pump_events(&mut self);

    /// Releases GPU objects, the surface and the windowing library.
    fn teardown(self);
}
