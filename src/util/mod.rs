//! Shared utilities: easing curves, frame timing and GPU lighting.

/// Easing curves for animated transitions.
pub mod easing;
/// Per-frame delta time and smoothed frame rate.
pub mod frame_timing;
/// Lighting uniform and bind group.
pub mod lighting;
