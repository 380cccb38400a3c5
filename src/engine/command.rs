//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation (key press, mouse gesture or programmatic
//! call) is represented as a `Command`. Consumers construct commands and
//! pass them to [`SceneEngine::execute`](super::SceneEngine::execute).

use glam::Vec2;

use crate::scene::NodeId;

/// A single engine operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    // ── Camera ──────────────────────────────────────────────────────
    /// Rotate the camera by `delta` pixels of mouse movement.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    /// The window was resized.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },

    // ── Focus ───────────────────────────────────────────────────────
    /// Pick whatever lies under a screen position and focus on it.
    Pick {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },

    /// Focus on a specific scene node.
    FocusOn {
        /// Node to focus on.
        node: NodeId,
    },

    /// Move focus to the next planet, wrapping around.
    CycleFocus,

    /// Return focus to the home planet.
    ResetFocus,
}
