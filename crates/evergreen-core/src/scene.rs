//! The assembled scene: registry, context, classifier and clock.

use std::time::Duration;

use rand::prelude::*;

use crate::config::{GestureThresholds, SceneConfig};
use crate::constants::PLACEHOLDER_PHOTO;
use crate::context::SceneContext;
use crate::gesture::{GestureClassifier, GestureDecision, HandLandmarks, Landmark};
use crate::instance::InstanceData;
use crate::mode::Mode;
use crate::particle::{ImageRef, ParticleId, ParticleKind, ParticleRegistry};
use crate::state::Camera;
use crate::tick::{self, Smoothing};

/// Derive an independent stream seed from the scene seed.
fn mix_seed(seed: u64, stream: u64) -> u64 {
    seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

pub struct Scene {
    registry: ParticleRegistry,
    context: SceneContext,
    classifier: GestureClassifier,
    camera: Camera,
    smoothing: Smoothing,
    elapsed_sec: f64,
    ticks: u64,
}

impl Scene {
    /// Build the initial population with the default gesture thresholds.
    pub fn new(config: SceneConfig) -> Self {
        Self::with_thresholds(config, GestureThresholds::default())
    }

    pub fn with_thresholds(config: SceneConfig, thresholds: GestureThresholds) -> Self {
        let config = config.validated();
        let mut registry = ParticleRegistry::new(mix_seed(config.seed, 1), config.spawn_half_extent);

        // Shuffled once so ornaments and dust interleave along the tree's height.
        let mut kinds: Vec<ParticleKind> = std::iter::repeat(ParticleKind::Decor)
            .take(config.decor_count)
            .chain(std::iter::repeat(ParticleKind::Dust).take(config.dust_count))
            .chain(std::iter::repeat(ParticleKind::Photo).take(config.initial_photos))
            .collect();
        kinds.shuffle(&mut StdRng::seed_from_u64(mix_seed(config.seed, 2)));
        for kind in kinds {
            match kind {
                ParticleKind::Photo => registry.create_photo(ImageRef::from(PLACEHOLDER_PHOTO)),
                _ => registry.create(kind),
            };
        }
        log::info!(
            "[scene] built {} particles (decor={} dust={} photo={})",
            registry.len(),
            config.decor_count,
            config.dust_count,
            config.initial_photos
        );

        Self {
            registry,
            context: SceneContext::new(config.initial_mode, mix_seed(config.seed, 3)),
            classifier: GestureClassifier::new(thresholds),
            camera: config.camera,
            smoothing: Smoothing {
                position: config.position_smoothing,
                scale: config.scale_smoothing,
                rotation: config.rotation_smoothing,
            },
            elapsed_sec: 0.0,
            ticks: 0,
        }
    }

    /// Advance scene time by `dt` and run one layout + interpolation pass.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed_sec += dt.as_secs_f64();
        self.ticks += 1;
        tick::tick(
            &mut self.registry,
            &mut self.context,
            &self.camera,
            &self.smoothing,
            self.elapsed_sec as f32,
        );
    }

    /// Feed one detector frame (`None` = no hand) through the classifier.
    pub fn apply_hand_frame(&mut self, frame: Option<&HandLandmarks>) -> Option<GestureDecision> {
        self.classifier.apply(frame, &mut self.context)
    }

    /// Feed an unvalidated detector frame; a malformed frame is treated as no hand.
    pub fn apply_raw_frame(&mut self, points: Option<&[Landmark]>) -> Option<GestureDecision> {
        let hand = points.and_then(HandLandmarks::from_raw);
        self.apply_hand_frame(hand.as_ref())
    }

    /// Manual override bypassing the classifier.
    pub fn set_mode(&mut self, mode: Mode) {
        self.context.set_mode(mode);
    }

    /// Register a photo and frame it immediately.
    pub fn add_photo(&mut self, image: ImageRef) -> ParticleId {
        let id = self.register_photo(image);
        self.context.focus_on(id, &self.registry);
        id
    }

    /// Register a photo without changing the mode.
    pub fn register_photo(&mut self, image: ImageRef) -> ParticleId {
        log::info!("[scene] photo added: {}", image.as_str());
        self.registry.create_photo(image)
    }

    /// Overwrite `out` with one instance per particle, in creation order.
    pub fn write_instances(&self, out: &mut Vec<InstanceData>) {
        out.clear();
        out.extend(self.registry.iter().map(InstanceData::from));
    }

    /// Mean distance between current and target positions; a convergence gauge.
    pub fn mean_distance_to_target(&self) -> f32 {
        if self.registry.is_empty() {
            return 0.0;
        }
        let sum: f32 = self
            .registry
            .iter()
            .map(|p| p.current().position.distance(p.target().position))
            .sum();
        sum / self.registry.len() as f32
    }

    pub fn mode(&self) -> Mode {
        self.context.mode()
    }

    pub fn focus(&self) -> Option<ParticleId> {
        self.context.focus()
    }

    pub fn registry(&self) -> &ParticleRegistry {
        &self.registry
    }

    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.context
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_sec
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
