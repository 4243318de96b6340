use crate::core::{Backend, FrameStatus};
use crate::paint::Color;
use crate::scene::DrawList;

/// Runs the fixed per-frame sequence: viewport + clear, demo draw, list
/// dispatch, present, event pump.
///
/// Events are pumped even when the frame was skipped so close and resize
/// requests keep flowing.
pub(crate) fn present_frame<B: Backend>(
    backend: &mut B,
    clear: Color,
    batch: Option<&DrawList>,
) -> FrameStatus {
    let viewport = backend.surface_size();
    let status = backend.begin_frame(viewport, clear);

    if status == FrameStatus::Ready {
        if backend.demo_ready() {
            backend.draw_demo(viewport);
        }
        if let Some(list) = batch {
            backend.render_list(list);
        }
        backend.present();
    } else if let Some(list) = batch {
        log::trace!("frame {status:?}; dropping draw list of {} commands", list.len());
    }

    backend.pump_events();
    status
}
