//! Hand keypoints as delivered by a landmark detector, plus a synthetic builder.

use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use thiserror::Error;

/// Keypoints per detected hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
/// Middle-finger knuckle, used as the palm center.
pub const PALM_CENTER: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

pub const FINGERTIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// One keypoint in normalized image coordinates (x, y in \[0, 1\], z relative depth).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl From<Vec3> for Landmark {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LandmarkError {
    #[error("expected {expected} landmarks, found {found}")]
    WrongCount { expected: usize, found: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// A validated set of [`LANDMARK_COUNT`] keypoints for a single hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: SmallVec<[Landmark; LANDMARK_COUNT]>,
}

impl HandLandmarks {
    pub fn new(points: impl IntoIterator<Item = Landmark>) -> Result<Self, LandmarkError> {
        let points: SmallVec<[Landmark; LANDMARK_COUNT]> = points.into_iter().collect();
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongCount {
                expected: LANDMARK_COUNT,
                found: points.len(),
            });
        }
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            return Err(LandmarkError::NonFinite { index });
        }
        Ok(Self { points })
    }

    /// Validate a raw detector frame; an invalid frame counts as no hand.
    pub fn from_raw(points: &[Landmark]) -> Option<Self> {
        match Self::new(points.iter().copied()) {
            Ok(hand) => Some(hand),
            Err(e) => {
                log::debug!("[gesture] rejected frame: {e}");
                None
            }
        }
    }

    pub fn point(&self, index: usize) -> Vec3 {
        self.points[index].vec3()
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }
}

/// Builds plausible landmark sets with exact pinch and fingertip distances.
///
/// Used by the simulated webcam and by tests.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticHand {
    /// Palm-center position in normalized image space.
    pub palm: Vec2,
    /// Thumb tip to index tip distance.
    pub pinch: f32,
    /// Distance from the wrist to each of the four fingertips.
    pub spread: f32,
}

impl Default for SyntheticHand {
    fn default() -> Self {
        Self {
            palm: Vec2::splat(0.5),
            pinch: 0.12,
            spread: 0.32,
        }
    }
}

impl SyntheticHand {
    pub fn open() -> Self {
        Self {
            spread: 0.45,
            ..Self::default()
        }
    }

    pub fn fist() -> Self {
        Self {
            spread: 0.15,
            ..Self::default()
        }
    }

    pub fn pinch() -> Self {
        Self {
            pinch: 0.02,
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.palm = Vec2::new(x, y);
        self
    }

    pub fn with_pinch(mut self, pinch: f32) -> Self {
        self.pinch = pinch;
        self
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }

    pub fn build(&self) -> HandLandmarks {
        let palm = Vec3::new(self.palm.x, self.palm.y, 0.0);
        let wrist = palm + Vec3::new(0.0, 0.15, 0.0);
        let tip = |angle: f32| wrist + Vec3::new(angle.sin(), -angle.cos(), 0.0) * self.spread;

        let mut points = [Vec3::ZERO; LANDMARK_COUNT];
        points[WRIST] = wrist;
        // index, middle, ring, pinky fanned around straight up
        for (finger, angle) in [(1usize, -0.3f32), (2, -0.1), (3, 0.1), (4, 0.3)] {
            let base = finger * 4 + 1;
            let end = tip(angle);
            for (joint, f) in [0.4f32, 0.65, 0.85].iter().enumerate() {
                points[base + joint] = wrist.lerp(end, *f);
            }
            points[base + 3] = end;
        }
        points[PALM_CENTER] = palm;
        let thumb = points[INDEX_TIP] + Vec3::new(-self.pinch, 0.0, 0.0);
        for (joint, f) in [0.3f32, 0.6, 0.8].iter().enumerate() {
            points[1 + joint] = wrist.lerp(thumb, *f);
        }
        points[THUMB_TIP] = thumb;

        Self::assemble(points)
    }

    fn assemble(points: [Vec3; LANDMARK_COUNT]) -> HandLandmarks {
        HandLandmarks {
            points: points.iter().copied().map(Landmark::from).collect(),
        }
    }
}
