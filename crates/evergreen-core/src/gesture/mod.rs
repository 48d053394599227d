//! Hand-landmark input: validation, classification and the detector thread.

pub mod classifier;
pub mod detector;
pub mod landmarks;

pub use classifier::*;
pub use detector::*;
pub use landmarks::*;
