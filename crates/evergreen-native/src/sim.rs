//! Simulated webcam: a looping script of synthetic hand poses.

use std::time::Duration;

use evergreen_core::{DetectorError, HandLandmarks, ScriptedSource, SyntheticHand};

// Frames per segment at the simulated capture rate.
const SEGMENT_FRAMES: usize = 90;
const GAP_FRAMES: usize = 20;

/// Open hand drifting left to right, a gap, a fist, a pinch, then no hand.
pub fn webcam(capture_fps: f32) -> ScriptedSource {
    let mut frames: Vec<Option<HandLandmarks>> = Vec::new();

    for i in 0..SEGMENT_FRAMES {
        let u = i as f32 / SEGMENT_FRAMES as f32;
        frames.push(Some(SyntheticHand::open().at(0.2 + 0.6 * u, 0.5).build()));
    }
    frames.extend(std::iter::repeat(None).take(GAP_FRAMES));
    for _ in 0..SEGMENT_FRAMES {
        frames.push(Some(SyntheticHand::fist().at(0.5, 0.45).build()));
    }
    for i in 0..SEGMENT_FRAMES {
        let u = i as f32 / SEGMENT_FRAMES as f32;
        frames.push(Some(SyntheticHand::pinch().at(0.5, 0.4 + 0.2 * u).build()));
    }
    frames.extend(std::iter::repeat(None).take(SEGMENT_FRAMES));

    let interval = Duration::from_secs_f32(1.0 / capture_fps.max(1.0));
    ScriptedSource::new(frames, interval).looping()
}

/// A webcam whose permission prompt was refused.
pub fn denied() -> ScriptedSource {
    ScriptedSource::failing(DetectorError::PermissionDenied)
}
