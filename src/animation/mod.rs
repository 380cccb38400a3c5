//! Time-based interpolation primitives for camera and scene animation.

pub mod tween;

pub use tween::{interpolate, Lerp, Tween};
