//! Window-system-independent pointer events.
//!
//! The viewer converts winit events into these; tests and embedders can
//! construct them directly.

/// Pixels of trackpad scroll that count as one wheel line.
#[cfg(feature = "viewer")]
const PIXELS_PER_LINE: f32 = 100.0;

/// A pointer event in physical pixels, origin at the top-left corner.
///
/// [`InputProcessor`](super::InputProcessor) turns a stream of these into
/// camera and pick [`Command`](crate::Command)s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The cursor is now at `(x, y)`.
    CursorMoved {
        /// Distance from the left edge.
        x: f32,
        /// Distance from the top edge.
        y: f32,
    },
    /// A button went down (`pressed`) or came up.
    MouseButton {
        /// The button that changed.
        button: MouseButton,
        /// `true` on press, `false` on release.
        pressed: bool,
    },
    /// Wheel or trackpad scroll, in wheel lines. Positive zooms in.
    Scroll {
        /// Signed scroll amount.
        delta: f32,
    },
}

/// Pointer buttons the scene distinguishes.
///
/// Only [`Left`](Self::Left) orbits and picks. Everything else is carried
/// through so callers can see it, but produces no command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button: drag to orbit, click to focus.
    Left,
    /// Secondary button.
    Right,
    /// Wheel click.
    Middle,
    /// Back, forward and any extra buttons.
    Other,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            winit::event::MouseButton::Back
            | winit::event::MouseButton::Forward
            | winit::event::MouseButton::Other(_) => Self::Other,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseScrollDelta> for InputEvent {
    fn from(delta: winit::event::MouseScrollDelta) -> Self {
        let delta = match delta {
            winit::event::MouseScrollDelta::LineDelta(_, y) => y,
            winit::event::MouseScrollDelta::PixelDelta(pos) => {
                pos.y as f32 / PIXELS_PER_LINE
            }
        };
        Self::Scroll { delta }
    }
}
