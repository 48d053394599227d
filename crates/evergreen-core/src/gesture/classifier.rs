//! Per-frame gesture classification from hand landmarks.

use glam::Vec2;

use super::landmarks::{HandLandmarks, FINGERTIPS, INDEX_TIP, PALM_CENTER, THUMB_TIP, WRIST};
use crate::config::GestureThresholds;
use crate::context::SceneContext;
use crate::mode::Mode;
use crate::state::RotationIntent;

/// Measurements derived from one landmark frame. Not retained between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPose {
    /// Thumb tip to index tip.
    pub pinch_distance: f32,
    /// Mean fingertip-to-wrist distance; small means a closed fist.
    pub fist_distance: f32,
    /// Palm-center position in normalized image space.
    pub palm: Vec2,
}

impl HandPose {
    pub fn from_landmarks(hand: &HandLandmarks) -> Self {
        let wrist = hand.point(WRIST);
        let fist_distance = FINGERTIPS
            .iter()
            .map(|&i| hand.point(i).distance(wrist))
            .sum::<f32>()
            / FINGERTIPS.len() as f32;
        let palm = hand.point(PALM_CENTER);
        Self {
            pinch_distance: hand.point(THUMB_TIP).distance(hand.point(INDEX_TIP)),
            fist_distance,
            palm: Vec2::new(palm.x, palm.y),
        }
    }
}

/// Outcome of classifying one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureDecision {
    /// `None` when neither check was conclusive; the mode is left alone.
    pub mode: Option<Mode>,
    pub rotation_intent: RotationIntent,
}

/// Stateless threshold classifier, no hysteresis or dwell time.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
}

impl GestureClassifier {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    /// Pinch is checked first; a conclusive fist/open reading in the same
    /// frame overrides it.
    pub fn classify(&self, pose: &HandPose) -> GestureDecision {
        let mut mode = None;
        if pose.pinch_distance < self.thresholds.pinch {
            mode = Some(Mode::Focus);
        }
        if pose.fist_distance < self.thresholds.fist {
            mode = Some(Mode::Tree);
        } else if pose.fist_distance > self.thresholds.open {
            mode = Some(Mode::Scatter);
        }
        GestureDecision {
            mode,
            rotation_intent: RotationIntent::from_normalized(pose.palm.x, pose.palm.y),
        }
    }

    /// Classify a frame and commit the result to `ctx`.
    ///
    /// A frame without a hand changes nothing. Only the final decision is
    /// written, so an overridden pinch never touches the focus selection.
    pub fn apply(
        &self,
        frame: Option<&HandLandmarks>,
        ctx: &mut SceneContext,
    ) -> Option<GestureDecision> {
        let hand = frame?;
        let pose = HandPose::from_landmarks(hand);
        let decision = self.classify(&pose);
        log::trace!(
            "[gesture] pinch={:.3} fist={:.3} -> {:?}",
            pose.pinch_distance,
            pose.fist_distance,
            decision.mode
        );
        if let Some(mode) = decision.mode {
            ctx.set_mode(mode);
        }
        ctx.set_rotation_intent(decision.rotation_intent);
        Some(decision)
    }
}
