//! # evergreen-core
//!
//! Particle choreography for a gesture-driven holiday tree. Each tick the
//! active [`Mode`] picks a layout for every particle, and the tick engine
//! eases current transforms toward those targets. Hand-landmark frames are
//! classified into mode changes and a continuous rotation intent.
//!
//! | Gesture | Effect |
//! |---|---|
//! | Pinch (thumb tip to index tip) | Focus: frame a photo front and center |
//! | Closed fist | Tree: spiral cone |
//! | Open hand | Scatter: breathing sphere |
//! | Palm position | Rotate the whole group |
//!
//! The crate does no rendering; frontends read [`InstanceData`] or the
//! [`ParticleRegistry`] after each tick.

pub mod config;
pub mod constants;
pub mod context;
pub mod gesture;
pub mod instance;
pub mod layout;
pub mod mode;
pub mod particle;
pub mod scene;
pub mod state;
pub mod tick;

pub use config::{GestureThresholds, SceneConfig};
pub use constants::*;
pub use context::SceneContext;
pub use gesture::{
    DetectorError, DetectorSource, FeedEvent, GestureClassifier, GestureDecision, GestureFeed,
    HandLandmarks, HandPose, Landmark, LandmarkDetector, LandmarkError, ScriptedSource,
    SyntheticHand,
};
pub use instance::InstanceData;
pub use layout::{FocusFrame, LayoutTarget, TreeSlot};
pub use mode::{Mode, ModeController};
pub use particle::{ImageRef, Particle, ParticleId, ParticleKind, ParticleRegistry, Transform};
pub use scene::Scene;
pub use state::*;
pub use tick::{FrameClock, Smoothing};
