use glam::{Mat4, Vec3};
use horizon_engine::{
    DrawCommand, DrawList, MaterialId, MeshId, RenderConfig, RenderThread, WgpuBackend, WgpuConfig,
};

/// Number of instances in the orbiting demo scene.
const ORBITERS: u64 = 3;

/// Owns the render thread for as long as the host keeps the module loaded.
pub struct RenderModule {
    render: RenderThread<WgpuBackend>,
}

impl RenderModule {
    pub fn new(config: RenderConfig, backend: WgpuConfig) -> Self {
        Self {
            render: RenderThread::new(config, backend),
        }
    }

    /// Starts rendering and queues the initial work.
    pub fn load(&mut self) {
        log::info!("render module loaded");
        self.render.start();

        self.render.schedule_gpu(|_| {
            log::info!("GPU init task executed on render thread");
            Ok(())
        });
        self.render.submit_draw_list(DrawList::new());
    }

    /// Stops rendering; blocks until the render thread has released the context.
    pub fn unload(&mut self) {
        log::info!("render module unloading");
        self.render.stop();

        let stats = self.render.stats();
        log::info!(
            "presented {} frames, consumed {} draw lists ({} dropped), {} GPU tasks ok / {} failed",
            stats.frames_presented,
            stats.batches_consumed,
            stats.batches_dropped,
            stats.tasks_completed,
            stats.tasks_failed
        );
    }

    /// The render thread is gone (window closed or startup failed).
    pub fn finished(&self) -> bool {
        self.render.is_finished()
    }

    /// Queues the scene for time `t` unless the previous one is still waiting.
    pub fn submit_frame(&self, t: f32) {
        if self.render.pending().draw_lists > 0 {
            return;
        }
        self.render.submit_draw_list(scene_at(t));
    }
}

/// Builds a small orbiting scene; ids are placeholders for a real resource system.
pub fn scene_at(t: f32) -> DrawList {
    (0..ORBITERS)
        .map(|i| {
            let angle = t + i as f32 * std::f32::consts::TAU / ORBITERS as f32;
            let transform = Mat4::from_rotation_y(angle) * Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0));
            DrawCommand::new(MeshId(i + 1), MaterialId(1), transform)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_has_one_command_per_orbiter() {
        let list = scene_at(0.0);
        assert_eq!(list.len() as u64, ORBITERS);
        let meshes: Vec<u64> = list.iter().map(|c| c.mesh().0).collect();
        assert_eq!(meshes, vec![1, 2, 3]);
    }

    #[test]
    fn orbiters_stay_on_the_ring() {
        for cmd in scene_at(1.3).iter() {
            let pos = cmd.transform().w_axis.truncate();
            assert!((pos.length() - 2.0).abs() < 1e-4);
        }
    }
}
