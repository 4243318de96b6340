/// Represents a single acquired frame.
///
/// Short-lived: it is created by `begin_frame` and consumed by `submit` within
/// one render cycle. Holding the surface texture blocks acquisition of the next
/// one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
