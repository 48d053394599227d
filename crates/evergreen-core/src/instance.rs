//! Read-only per-particle data handed to the renderer.

use crate::particle::Particle;

/// GPU-friendly snapshot of one particle's current transform.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub pos: [f32; 3],
    pub scale: f32,
    /// Unit quaternion, xyzw.
    pub rotation: [f32; 4],
    pub kind: u32,
    pub _pad: [u32; 3],
}

impl From<&Particle> for InstanceData {
    fn from(p: &Particle) -> Self {
        let current = p.current();
        Self {
            pos: current.position.to_array(),
            scale: current.scale,
            rotation: current.rotation.to_array(),
            kind: p.kind().code(),
            _pad: [0; 3],
        }
    }
}
