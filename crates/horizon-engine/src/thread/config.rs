use std::time::Duration;

use crate::paint::Color;

/// Render loop configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Color every frame is cleared to.
    pub clear_color: Color,

    /// Upper bound on how long the loop sleeps waiting for work before it
    /// presents a frame anyway. Also bounds how late `stop()` is noticed.
    pub wait_timeout: Duration,

    /// OS-level name of the render thread.
    pub thread_name: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::BACKGROUND,
            wait_timeout: Duration::from_millis(1),
            thread_name: "horizon-render".to_string(),
        }
    }
}
