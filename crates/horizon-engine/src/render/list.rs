use crate::device::GpuFrame;
use crate::scene::DrawList;

/// Integration point where submitted draw lists become graphics calls.
///
/// Mesh and material ids are resolved by an external resource system that is
/// not wired in yet, so commands are visited and logged but nothing is drawn.
#[derive(Default)]
pub struct ListRenderer {
    warned_unresolved: bool,
}

impl ListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, _frame: &mut GpuFrame, list: &DrawList) {
        if list.is_empty() {
            return;
        }

        if !self.warned_unresolved {
            log::debug!("ListRenderer: no mesh/material resolver; draw commands are skipped");
            self.warned_unresolved = true;
        }

        for cmd in list.iter() {
            log::trace!(
                "draw mesh {} material {} at {:?}",
                cmd.mesh().0,
                cmd.material().0,
                cmd.transform().w_axis
            );
        }
    }
}
