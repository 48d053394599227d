//! Per-mode target layouts.
//!
//! Every function here is pure: the same `(seed, total, t)` always yields the
//! same target. `seed` is the particle's creation ordinal, `total` the number
//! of particles in the registry and `t` the scene time in seconds.

use glam::{Quat, Vec3};

use crate::constants::*;
use crate::mode::Mode;
use crate::particle::{Particle, ParticleId};
use crate::state::{Camera, SceneRotation};

/// Where a particle should be heading this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutTarget {
    pub position: Vec3,
    pub scale: f32,
    /// When set, replaces the particle's accumulated spin outright (no easing).
    pub orientation: Option<Quat>,
}

/// Cylindrical slot of a particle on the tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeSlot {
    /// Normalized height in \[0, 1).
    pub height: f32,
    pub y: f32,
    pub radius: f32,
    pub angle: f32,
}

impl TreeSlot {
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.angle.cos(),
            self.y,
            self.radius * self.angle.sin(),
        )
    }
}

#[inline]
fn fraction(seed: u32, total: usize) -> f32 {
    seed as f32 / total.max(1) as f32
}

pub fn tree_slot(seed: u32, total: usize, t: f32) -> TreeSlot {
    let h = fraction(seed, total);
    TreeSlot {
        height: h,
        y: h * TREE_HEIGHT + TREE_BASE_Y,
        radius: TREE_BASE_RADIUS * (1.0 - h) + TREE_TIP_RADIUS,
        angle: h * TREE_WINDING + t * TREE_SPIN_PER_SEC,
    }
}

/// Spiral cone: low seeds at the wide base, high seeds near the tip.
pub fn tree(seed: u32, total: usize, t: f32, base_scale: f32) -> LayoutTarget {
    LayoutTarget {
        position: tree_slot(seed, total, t).position(),
        scale: base_scale,
        orientation: None,
    }
}

/// Unit direction of point `seed` of `total` on a Fibonacci sphere.
pub fn fibonacci_direction(seed: u32, total: usize) -> Vec3 {
    let n = total.max(1) as f32;
    let phi = (-1.0 + 2.0 * fraction(seed, total)).clamp(-1.0, 1.0).acos();
    let theta = (n * std::f32::consts::PI).sqrt() * phi;
    Vec3::new(
        theta.cos() * phi.sin(),
        theta.sin() * phi.sin(),
        phi.cos(),
    )
}

/// Sphere radius breathing around `base` by ±[`BREATH_AMPLITUDE`], phase-offset by seed.
pub fn breathing_radius(seed: u32, t: f32, base: f32) -> f32 {
    base + BREATH_AMPLITUDE * (seed as f32 + t * BREATH_RATE).sin()
}

pub fn scatter(seed: u32, total: usize, t: f32, base_scale: f32) -> LayoutTarget {
    LayoutTarget {
        position: fibonacci_direction(seed, total) * breathing_radius(seed, t, SCATTER_BASE_RADIUS),
        scale: base_scale,
        orientation: None,
    }
}

/// Focus-mode placement for everything except the framed photo.
pub fn focus_background(seed: u32, total: usize, t: f32, base_scale: f32) -> LayoutTarget {
    LayoutTarget {
        position: fibonacci_direction(seed, total)
            * breathing_radius(seed, t, FOCUS_BACKGROUND_RADIUS),
        scale: base_scale,
        orientation: None,
    }
}

/// The front-and-center spot expressed in the particle group's local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusFrame {
    pub point: Vec3,
    pub orientation: Quat,
}

impl FocusFrame {
    /// Undo the group rotation so the photo ends up at [`FOCUS_POINT`] in world space,
    /// facing the camera.
    pub fn new(camera: &Camera, rotation: &SceneRotation) -> Self {
        let inverse = rotation.quat().inverse();
        Self {
            point: inverse * FOCUS_POINT,
            orientation: (inverse * camera.facing_rotation(FOCUS_POINT)).normalize(),
        }
    }
}

pub fn focus_front(frame: &FocusFrame) -> LayoutTarget {
    LayoutTarget {
        position: frame.point,
        scale: FOCUS_SCALE,
        orientation: Some(frame.orientation),
    }
}

/// Resolve the layout for one particle under `mode`.
///
/// `focused` is only consulted in [`Mode::Focus`]; with no selection every
/// particle takes the background branch.
pub fn target_for(
    mode: Mode,
    particle: &Particle,
    total: usize,
    t: f32,
    focused: Option<(ParticleId, &FocusFrame)>,
) -> LayoutTarget {
    let seed = particle.seed();
    let base = particle.base_scale();
    match mode {
        Mode::Tree => tree(seed, total, t, base),
        Mode::Scatter => scatter(seed, total, t, base),
        Mode::Focus => match focused {
            Some((id, frame)) if id == particle.id() => focus_front(frame),
            _ => focus_background(seed, total, t, base),
        },
    }
}
