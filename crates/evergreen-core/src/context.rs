//! Shared state written by the gesture path and read by the tick.

use crate::mode::{Mode, ModeController};
use crate::particle::{ParticleId, ParticleRegistry};
use crate::state::{RotationIntent, SceneRotation};

/// Explicit context handed to both the tick and the gesture classifier.
///
/// Field ownership: mode and focus go through the [`ModeController`]; the
/// classifier (or a manual caller) writes the rotation intent; only the tick
/// writes the eased scene rotation.
pub struct SceneContext {
    controller: ModeController,
    rotation_intent: RotationIntent,
    rotation: SceneRotation,
}

impl SceneContext {
    pub fn new(mode: Mode, seed: u64) -> Self {
        Self {
            controller: ModeController::new(mode, seed),
            rotation_intent: RotationIntent::default(),
            rotation: SceneRotation::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    /// Manual override, also used by the classifier.
    pub fn set_mode(&mut self, mode: Mode) {
        self.controller.set_mode(mode);
    }

    pub fn focus(&self) -> Option<ParticleId> {
        self.controller.focus()
    }

    /// Frame a specific photo; non-photo ids are ignored.
    pub fn focus_on(&mut self, id: ParticleId, registry: &ParticleRegistry) -> bool {
        self.controller.focus_on(id, registry)
    }

    pub fn resolve_focus(&mut self, registry: &ParticleRegistry) {
        self.controller.resolve(registry);
    }

    pub fn rotation_intent(&self) -> RotationIntent {
        self.rotation_intent
    }

    pub fn set_rotation_intent(&mut self, intent: RotationIntent) {
        self.rotation_intent = intent;
    }

    pub fn rotation(&self) -> SceneRotation {
        self.rotation
    }

    pub(crate) fn ease_rotation(&mut self, alpha: f32) {
        self.rotation.ease_toward(self.rotation_intent, alpha);
    }
}
