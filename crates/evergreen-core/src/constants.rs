use glam::Vec3;

// Shared layout/interaction tuning constants used by the core and the native driver.

// Scene population
pub const DEFAULT_DECOR_COUNT: usize = 1500;
pub const DEFAULT_DUST_COUNT: usize = 600;
pub const DEFAULT_PHOTO_COUNT: usize = 1;
pub const DEFAULT_SEED: u64 = 42;
pub const SPAWN_HALF_EXTENT: f32 = 25.0; // half-width of the initial chaos cube

// Easing (fraction of the remaining distance covered per tick)
pub const POSITION_SMOOTHING: f32 = 0.05;
pub const SCALE_SMOOTHING: f32 = 0.1;
pub const ROTATION_INTENT_SMOOTHING: f32 = 0.05;
pub const MAX_SMOOTHING: f32 = 0.999; // below 1 so a tick never snaps onto the target

// Tree layout
pub const TREE_HEIGHT: f32 = 30.0;
pub const TREE_BASE_Y: f32 = -15.0;
pub const TREE_BASE_RADIUS: f32 = 12.0;
pub const TREE_TIP_RADIUS: f32 = 0.5;
pub const TREE_WINDING: f32 = 50.0 * std::f32::consts::PI; // radians swept bottom to top
pub const TREE_SPIN_PER_SEC: f32 = 0.1;

// Scatter / focus-background layout
pub const SCATTER_BASE_RADIUS: f32 = 14.0;
pub const FOCUS_BACKGROUND_RADIUS: f32 = 30.0;
pub const BREATH_AMPLITUDE: f32 = 6.0;
pub const BREATH_RATE: f32 = 0.5;

// Focus front subject
pub const FOCUS_POINT: Vec3 = Vec3::new(0.0, 2.0, 35.0);
pub const FOCUS_SCALE: f32 = 4.5;

// Per-particle spin jitter, radians per tick on each axis
pub const SPIN_JITTER: f32 = 0.01;

// Rest scale ranges per particle kind
pub const DECOR_SCALE_RANGE: (f32, f32) = (0.4, 0.9);
pub const DUST_SCALE_RANGE: (f32, f32) = (0.1, 0.25);
pub const PHOTO_BASE_SCALE: f32 = 1.2;

// Scene rotation driven by the palm position
pub const ROTATION_YAW_RANGE: f32 = std::f32::consts::PI;
pub const ROTATION_PITCH_RANGE: f32 = 0.5;

// Gesture thresholds, normalized landmark units
pub const PINCH_THRESHOLD: f32 = 0.05;
pub const FIST_THRESHOLD: f32 = 0.25;
pub const OPEN_THRESHOLD: f32 = 0.4;

// Camera
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 2.0, 50.0);
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Image reference for the photo created with the scene
pub const PLACEHOLDER_PHOTO: &str = "builtin:placeholder";
