use glam::Mat4;

/// Opaque mesh handle.
///
/// The render thread never validates ids; resolving them to GPU resources is the
/// responsibility of whoever owns the mesh registry.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct MeshId(pub u64);

/// Opaque material handle. Same contract as [`MeshId`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct MaterialId(pub u64);

/// One instance to draw: mesh + material + world transform.
///
/// Fields are private so a command cannot be edited after it has been queued.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCommand {
    mesh: MeshId,
    material: MaterialId,
    transform: Mat4,
}

impl DrawCommand {
    #[inline]
    pub const fn new(mesh: MeshId, material: MaterialId, transform: Mat4) -> Self {
        Self { mesh, material, transform }
    }

    #[inline]
    pub const fn mesh(&self) -> MeshId {
        self.mesh
    }

    #[inline]
    pub const fn material(&self) -> MaterialId {
        self.material
    }

    /// Model-to-world transform.
    #[inline]
    pub const fn transform(&self) -> &Mat4 {
        &self.transform
    }
}
