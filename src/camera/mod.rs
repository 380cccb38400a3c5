//! Camera system for 3D scene viewing.
//!
//! Provides a damped orbital camera with polar-angle and distance limits,
//! and a focus controller that animates the orbit target onto picked
//! objects.

/// Damped orbit controller: rotation, zoom, distance and polar limits.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Pick-to-focus animation of the orbit target and distance scale.
pub mod focus;

pub use controller::CameraController;
pub use core::{Camera, CameraUniform};
pub use focus::{FocusController, FocusTarget, FocusTransition};
