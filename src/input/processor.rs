//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking and
//! drag detection) and the key-binding map. It is the only thing that sits
//! between raw window events and the engine's
//! [`execute`](crate::SceneEngine::execute) method.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use super::mouse::{ClickResult, InputState};
use crate::engine::Command;

/// Maps physical key strings to [`Command`] variants.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"KeyH"`, `"Tab"`, `"Escape"`, etc.
///
/// Only *discrete* commands make sense as key bindings; parameterized
/// commands like `RotateCamera` are produced by the mouse gesture
/// interpreter, not key lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the subset of [`Command`] that can be key-bound
/// (parameterless actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Move focus to the next planet.
    CycleFocus,
    /// Return focus to the home planet.
    ResetFocus,
}

impl KeyCommandTag {
    /// Convert to the corresponding parameterless [`Command`].
    fn to_command(self) -> Command {
        match self {
            Self::CycleFocus => Command::CycleFocus,
            Self::ResetFocus => Command::ResetFocus,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("Tab".into(), KeyCommandTag::CycleFocus),
            ("KeyH".into(), KeyCommandTag::ResetFocus),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Command> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Bind `key` to `tag`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: impl Into<String>, tag: KeyCommandTag) {
        let _ = self.bindings.insert(key.into(), tag);
    }
}

/// Converts raw window events into [`Command`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
///
/// if let Some(cmd) = input_processor.handle_key_press("Tab") {
///     engine.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    /// Cursor tracking and drag detection.
    state: InputState,
    /// Whether the primary mouse button is currently held.
    mouse_pressed: bool,
    /// Key string → command mapping.
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeyBindings::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            state: InputState::new(),
            mouse_pressed: false,
            key_bindings,
        }
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> (f32, f32) {
        self.state.mouse_pos
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<Command> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => Some(Command::Zoom { delta }),
        }
    }

    /// Cursor moved: orbit the camera while the primary button is held.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<Command> {
        let (delta_x, delta_y) = self.state.handle_mouse_position(x, y);
        if !self.mouse_pressed {
            return None;
        }
        let delta = Vec2::new(delta_x, delta_y);
        (delta != Vec2::ZERO).then_some(Command::RotateCamera { delta })
    }

    /// Mouse button press/release. A release that never dragged is a pick.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<Command> {
        if button != MouseButton::Left {
            return None;
        }

        if pressed {
            self.state.handle_mouse_down();
            self.mouse_pressed = true;
            return None;
        }

        // Release
        self.mouse_pressed = false;
        match self.state.process_mouse_up() {
            ClickResult::NoAction => None,
            ClickResult::Click { x, y } => Some(Command::Pick { x, y }),
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(p: &mut InputProcessor, pressed: bool) -> Option<Command> {
        p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        })
    }

    fn move_to(p: &mut InputProcessor, x: f32, y: f32) -> Option<Command> {
        p.handle_event(InputEvent::CursorMoved { x, y })
    }

    #[test]
    fn click_without_drag_picks() {
        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 100.0, 50.0);
        assert_eq!(press(&mut p, true), None);
        assert_eq!(press(&mut p, false), Some(Command::Pick { x: 100.0, y: 50.0 }));
    }

    #[test]
    fn small_jitter_still_picks() {
        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 100.0, 50.0);
        let _ = press(&mut p, true);
        assert!(matches!(
            move_to(&mut p, 101.0, 51.0),
            Some(Command::RotateCamera { .. })
        ));
        assert_eq!(press(&mut p, false), Some(Command::Pick { x: 101.0, y: 51.0 }));
    }

    #[test]
    fn drag_rotates_and_suppresses_pick() {
        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 100.0, 50.0);
        let _ = press(&mut p, true);
        assert_eq!(
            move_to(&mut p, 120.0, 40.0),
            Some(Command::RotateCamera {
                delta: Vec2::new(20.0, -10.0)
            })
        );
        assert_eq!(press(&mut p, false), None);
        // Next click is unaffected by the previous drag.
        let _ = press(&mut p, true);
        assert!(matches!(press(&mut p, false), Some(Command::Pick { .. })));
    }

    #[test]
    fn hover_and_other_buttons_do_nothing() {
        let mut p = InputProcessor::new();
        assert_eq!(move_to(&mut p, 10.0, 10.0), None);
        let right = InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: false,
        };
        assert_eq!(p.handle_event(right), None);
        // Release without a press is not a click.
        assert_eq!(press(&mut p, false), None);
    }

    #[test]
    fn extra_buttons_never_pick_or_rotate() {
        let mut p = InputProcessor::new();
        let back = |pressed| InputEvent::MouseButton {
            button: MouseButton::Other,
            pressed,
        };
        assert_eq!(p.handle_event(back(true)), None);
        assert_eq!(move_to(&mut p, 40.0, 40.0), None);
        assert_eq!(p.handle_event(back(false)), None);
    }

    #[test]
    fn scroll_zooms() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::Scroll { delta: 1.5 }),
            Some(Command::Zoom { delta: 1.5 })
        );
    }

    #[test]
    fn custom_bindings() {
        let mut bindings = KeyBindings::default();
        bindings.bind("KeyN", KeyCommandTag::CycleFocus);
        let p = InputProcessor::with_key_bindings(bindings);
        assert_eq!(p.handle_key_press("KeyN"), Some(Command::CycleFocus));
        assert_eq!(p.handle_key_press("Tab"), Some(Command::CycleFocus));
        assert_eq!(p.handle_key_press("Escape"), None);
    }

    #[test]
    fn bindings_parse_from_toml() {
        let bindings: KeyBindings = toml::from_str(
            r#"
[bindings]
KeyR = "reset_focus"
"#,
        )
        .unwrap();
        assert_eq!(bindings.lookup("KeyR"), Some(Command::ResetFocus));
        assert_eq!(bindings.lookup("Tab"), None);
    }
}
