//! Visual-side state types shared with the frontends.
//!
//! These types avoid referencing platform-specific APIs. The renderer uses
//! [`Camera`] to build its matrices and [`SceneRotation`] to orient the whole
//! particle group; the core uses both to keep the focused photo facing the
//! viewer.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use crate::constants::{
    CAMERA_EYE, CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR, ROTATION_PITCH_RANGE,
    ROTATION_YAW_RANGE,
};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: CAMERA_EYE,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Rotation that turns an object's +Z face at `point` toward the eye.
    pub fn facing_rotation(&self, point: Vec3) -> Quat {
        let to_eye = self.eye - point;
        if to_eye.length_squared() < 1e-12 {
            return Quat::IDENTITY;
        }
        Quat::from_rotation_arc(Vec3::Z, to_eye.normalize())
    }
}

/// Continuous rotation request derived from the palm position, each axis in \[-1, 1\].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationIntent(pub Vec2);

impl RotationIntent {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0)))
    }

    /// Map a normalized \[0, 1\] image position onto \[-1, 1\].
    pub fn from_normalized(x: f32, y: f32) -> Self {
        Self::new(x * 2.0 - 1.0, y * 2.0 - 1.0)
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }
}

/// Orientation of the whole particle group, eased toward the rotation intent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl SceneRotation {
    pub fn target_for(intent: RotationIntent) -> Self {
        Self {
            yaw: intent.x() * ROTATION_YAW_RANGE,
            pitch: intent.y() * ROTATION_PITCH_RANGE,
        }
    }

    /// Move a fraction `alpha` of the way toward the intent's target angles.
    pub fn ease_toward(&mut self, intent: RotationIntent, alpha: f32) {
        let target = Self::target_for(intent);
        self.yaw += (target.yaw - self.yaw) * alpha;
        self.pitch += (target.pitch - self.pitch) * alpha;
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}
