//! Per-frame interpolation of every particle toward its layout target.

use std::time::Duration;

use glam::{EulerRot, Quat, Vec3};
use instant::Instant;

use crate::context::SceneContext;
use crate::layout::{self, FocusFrame, LayoutTarget};
use crate::mode::Mode;
use crate::particle::{Particle, ParticleRegistry};
use crate::state::Camera;

/// Fractions of the remaining distance covered each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothing {
    pub position: f32,
    pub scale: f32,
    pub rotation: f32,
}

#[inline]
pub fn ease(current: f32, target: f32, alpha: f32) -> f32 {
    current + (target - current) * alpha
}

#[inline]
pub fn ease_vec3(current: Vec3, target: Vec3, alpha: f32) -> Vec3 {
    current + (target - current) * alpha
}

/// Advance one particle: store the fresh target, ease position and scale,
/// step the spin accumulator and pick the orientation.
pub fn step_particle(particle: &mut Particle, target: LayoutTarget, smoothing: &Smoothing) {
    particle.spin = wrap_angles(particle.spin + particle.rotation_speed());
    let spun = Quat::from_euler(
        EulerRot::XYZ,
        particle.spin.x,
        particle.spin.y,
        particle.spin.z,
    );
    let rotation = target.orientation.unwrap_or(spun);

    particle.target.position = target.position;
    particle.target.scale = target.scale;
    particle.target.rotation = rotation;

    particle.current.position =
        ease_vec3(particle.current.position, target.position, smoothing.position);
    particle.current.scale = ease(particle.current.scale, target.scale, smoothing.scale);
    particle.current.rotation = rotation;
}

fn wrap_angles(v: Vec3) -> Vec3 {
    let tau = std::f32::consts::TAU;
    Vec3::new(v.x.rem_euclid(tau), v.y.rem_euclid(tau), v.z.rem_euclid(tau))
}

/// One scene tick at scene time `t` seconds.
///
/// Resolves the focus target first, eases the group rotation, then lays out
/// and advances each particle independently.
pub fn tick(
    registry: &mut ParticleRegistry,
    ctx: &mut SceneContext,
    camera: &Camera,
    smoothing: &Smoothing,
    t: f32,
) {
    ctx.resolve_focus(registry);
    ctx.ease_rotation(smoothing.rotation);

    let mode = ctx.mode();
    let frame = FocusFrame::new(camera, &ctx.rotation());
    let focused = match mode {
        Mode::Focus => ctx.focus().map(|id| (id, &frame)),
        _ => None,
    };
    let total = registry.len();
    for particle in registry.iter_mut() {
        let target = layout::target_for(mode, particle, total, t, focused);
        step_particle(particle, target, smoothing);
    }
}

/// Measures wall-clock time between frames.
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time since the previous call (or since construction).
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        dt
    }
}
