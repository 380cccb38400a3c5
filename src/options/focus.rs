use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Focus", inline)]
#[serde(default)]
/// Click-to-focus transition parameters.
pub struct FocusOptions {
    /// Transition length in milliseconds (0 = jump).
    #[schemars(title = "Duration (ms)", range(min = 0, max = 5000))]
    pub duration_ms: u64,
    /// Height of the focus point above the object's surface, in object
    /// heights.
    #[schemars(title = "Label Offset", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub label_offset: f32,
    /// Orbit distance for an object of scale 1.
    #[schemars(title = "Base Distance", range(min = 0.5, max = 20.0), extend("step" = 0.1))]
    pub base_distance: f32,
    /// Easing curve applied to transition progress.
    #[schemars(skip)]
    pub easing: EasingFunction,
}

impl Default for FocusOptions {
    fn default() -> Self {
        Self {
            duration_ms: 1500,
            label_offset: 1.25,
            base_distance: 3.0,
            easing: EasingFunction::QuadraticOut,
        }
    }
}
