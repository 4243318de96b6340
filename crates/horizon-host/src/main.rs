mod module;

use std::thread;
use std::time::{Duration, Instant};

use horizon_engine::logging::{init_logging, LoggingConfig};
use horizon_engine::{RenderConfig, WgpuConfig};

use module::RenderModule;

/// Producer cadence; the render thread paces presentation itself.
const SUBMIT_INTERVAL: Duration = Duration::from_millis(16);

fn main() {
    init_logging(LoggingConfig::default());

    let mut module = RenderModule::new(RenderConfig::default(), WgpuConfig::default());
    module.load();

    let started = Instant::now();
    while !module.finished() {
        module.submit_frame(started.elapsed().as_secs_f32());
        thread::sleep(SUBMIT_INTERVAL);
    }

    module.unload();
}
