//! Particle storage and identity.
//!
//! The registry owns every particle for the lifetime of the scene. Particles
//! are only ever appended, so a [`ParticleId`] stays valid forever and
//! iteration order is creation order.

use std::fmt;

use fnv::FnvHashMap;
use glam::{EulerRot, Quat, Vec3};
use rand::prelude::*;

use crate::constants::{DECOR_SCALE_RANGE, DUST_SCALE_RANGE, PHOTO_BASE_SCALE, SPIN_JITTER};

/// Stable handle of a particle within its registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(u32);

impl ParticleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Ornament geometry making up the body of the tree.
    Decor,
    /// Small glitter points filling the gaps.
    Dust,
    /// A framed picture; the only kind that can be focused.
    Photo,
}

impl ParticleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Decor => "decor",
            Self::Dust => "dust",
            Self::Photo => "photo",
        }
    }

    /// Index consumed by the renderer to choose a material.
    pub fn code(&self) -> u32 {
        match self {
            Self::Decor => 0,
            Self::Dust => 1,
            Self::Photo => 2,
        }
    }
}

/// Opaque reference to the image shown on a photo particle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    id: ParticleId,
    kind: ParticleKind,
    seed: u32,
    base_scale: f32,
    rotation_speed: Vec3,
    pub(crate) current: Transform,
    pub(crate) target: Transform,
    /// Euler angles accumulated from `rotation_speed`, one step per tick.
    pub(crate) spin: Vec3,
}

impl Particle {
    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    /// Immutable ordinal assigned at creation; drives all layout math.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    pub fn rotation_speed(&self) -> Vec3 {
        self.rotation_speed
    }

    pub fn current(&self) -> &Transform {
        &self.current
    }

    pub fn target(&self) -> &Transform {
        &self.target
    }

    pub fn spin(&self) -> Vec3 {
        self.spin
    }
}

pub struct ParticleRegistry {
    particles: Vec<Particle>,
    images: FnvHashMap<ParticleId, ImageRef>,
    rng: StdRng,
    spawn_half_extent: f32,
}

impl ParticleRegistry {
    pub fn new(seed: u64, spawn_half_extent: f32) -> Self {
        Self {
            particles: Vec::new(),
            images: FnvHashMap::default(),
            rng: StdRng::seed_from_u64(seed),
            spawn_half_extent,
        }
    }

    /// Append a particle at a random spot inside the spawn cube with a random orientation.
    pub fn create(&mut self, kind: ParticleKind) -> ParticleId {
        let id = ParticleId(self.particles.len() as u32);
        let e = self.spawn_half_extent;
        let position = if e > 0.0 {
            Vec3::new(
                self.rng.gen_range(-e..=e),
                self.rng.gen_range(-e..=e),
                self.rng.gen_range(-e..=e),
            )
        } else {
            Vec3::ZERO
        };
        let tau = std::f32::consts::TAU;
        let spin = Vec3::new(
            self.rng.gen_range(0.0..tau),
            self.rng.gen_range(0.0..tau),
            self.rng.gen_range(0.0..tau),
        );
        let rotation_speed = Vec3::new(
            self.rng.gen_range(-SPIN_JITTER..=SPIN_JITTER),
            self.rng.gen_range(-SPIN_JITTER..=SPIN_JITTER),
            self.rng.gen_range(-SPIN_JITTER..=SPIN_JITTER),
        );
        let base_scale = match kind {
            ParticleKind::Decor => self.rng.gen_range(DECOR_SCALE_RANGE.0..=DECOR_SCALE_RANGE.1),
            ParticleKind::Dust => self.rng.gen_range(DUST_SCALE_RANGE.0..=DUST_SCALE_RANGE.1),
            ParticleKind::Photo => PHOTO_BASE_SCALE,
        };
        let current = Transform {
            position,
            rotation: Quat::from_euler(EulerRot::XYZ, spin.x, spin.y, spin.z),
            scale: base_scale,
        };
        self.particles.push(Particle {
            id,
            kind,
            seed: id.0,
            base_scale,
            rotation_speed,
            current,
            target: current,
            spin,
        });
        id
    }

    pub fn create_photo(&mut self, image: ImageRef) -> ParticleId {
        let id = self.create(ParticleKind::Photo);
        self.images.insert(id, image);
        id
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    /// Ids in creation order.
    pub fn all(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.particles.iter().map(|p| p.id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    pub fn photos(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Photo)
            .map(|p| p.id)
    }

    pub fn image(&self, id: ParticleId) -> Option<&ImageRef> {
        self.images.get(&id)
    }

    pub fn count_of(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
