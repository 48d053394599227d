//! Scene construction parameters and gesture thresholds.

use crate::constants::*;
use crate::mode::Mode;
use crate::state::Camera;

/// Scene construction and easing parameters.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub decor_count: usize,
    pub dust_count: usize,
    /// Photos created with the scene, before any user upload.
    pub initial_photos: usize,
    pub initial_mode: Mode,
    pub seed: u64,
    /// Particles spawn uniformly inside a cube of this half-width.
    pub spawn_half_extent: f32,
    pub position_smoothing: f32,
    pub scale_smoothing: f32,
    pub rotation_smoothing: f32,
    pub camera: Camera,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            decor_count: DEFAULT_DECOR_COUNT,
            dust_count: DEFAULT_DUST_COUNT,
            initial_photos: DEFAULT_PHOTO_COUNT,
            initial_mode: Mode::Tree,
            seed: DEFAULT_SEED,
            spawn_half_extent: SPAWN_HALF_EXTENT,
            position_smoothing: POSITION_SMOOTHING,
            scale_smoothing: SCALE_SMOOTHING,
            rotation_smoothing: ROTATION_INTENT_SMOOTHING,
            camera: Camera::default(),
        }
    }
}

impl SceneConfig {
    /// Clamp easing factors into (0, 1) so every tick moves strictly between current and target.
    pub fn validated(mut self) -> Self {
        self.position_smoothing = clamp_smoothing(self.position_smoothing, POSITION_SMOOTHING);
        self.scale_smoothing = clamp_smoothing(self.scale_smoothing, SCALE_SMOOTHING);
        self.rotation_smoothing =
            clamp_smoothing(self.rotation_smoothing, ROTATION_INTENT_SMOOTHING);
        self.spawn_half_extent = self.spawn_half_extent.abs();
        self
    }
}

fn clamp_smoothing(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value.min(MAX_SMOOTHING)
    } else {
        fallback
    }
}

/// Normalized-distance thresholds used by the gesture classifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureThresholds {
    /// Thumb tip to index tip below this is a pinch.
    pub pinch: f32,
    /// Mean fingertip-to-wrist distance below this is a fist.
    pub fist: f32,
    /// Mean fingertip-to-wrist distance above this is an open hand.
    pub open: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            pinch: PINCH_THRESHOLD,
            fist: FIST_THRESHOLD,
            open: OPEN_THRESHOLD,
        }
    }
}
