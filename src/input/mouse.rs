//! Cursor tracking and click/drag discrimination.

/// Cursor travel (physical pixels) past which a press becomes a drag.
const DRAG_THRESHOLD: f32 = 3.0;

/// Result of releasing the primary button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickResult {
    /// The press turned into a drag; nothing to select.
    NoAction,
    /// A click at the given position.
    Click { x: f32, y: f32 },
}

/// Tracks cursor position and whether the current press has dragged.
#[derive(Debug, Clone, Copy)]
pub struct InputState {
    pub mouse_pos: (f32, f32),
    press_pos: Option<(f32, f32)>,
    is_dragging: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            mouse_pos: (0.0, 0.0),
            press_pos: None,
            is_dragging: false,
        }
    }

    /// Record the press position and reset drag detection.
    pub fn handle_mouse_down(&mut self) {
        self.press_pos = Some(self.mouse_pos);
        self.is_dragging = false;
    }

    /// Update the cursor position and return the movement delta.
    ///
    /// Marks the current press as a drag once the cursor has wandered more
    /// than [`DRAG_THRESHOLD`] from where it went down.
    pub fn handle_mouse_position(&mut self, x: f32, y: f32) -> (f32, f32) {
        let delta = (x - self.mouse_pos.0, y - self.mouse_pos.1);
        self.mouse_pos = (x, y);
        if let Some((px, py)) = self.press_pos {
            let (dx, dy) = (x - px, y - py);
            if dx * dx + dy * dy > DRAG_THRESHOLD * DRAG_THRESHOLD {
                self.is_dragging = true;
            }
        }
        delta
    }

    /// Process a mouse-up and decide whether it was a click.
    pub fn process_mouse_up(&mut self) -> ClickResult {
        let pressed = self.press_pos.take().is_some();
        let was_dragging = std::mem::take(&mut self.is_dragging);
        if !pressed || was_dragging {
            return ClickResult::NoAction;
        }
        let (x, y) = self.mouse_pos;
        ClickResult::Click { x, y }
    }
}
