use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Labels", inline)]
#[serde(default)]
/// Floating label sizing and camera tracking.
pub struct LabelOptions {
    /// How quickly labels catch up with the camera (per second).
    #[schemars(title = "Track Damping", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub track_damping: f32,
    /// Glyph height for an object of scale 1.
    #[schemars(skip)]
    pub base_font_size: f32,
    /// Extrusion depth for an object of scale 1.
    #[schemars(skip)]
    pub base_font_depth: f32,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            track_damping: 5.0,
            base_font_size: 0.25,
            base_font_depth: 0.05,
        }
    }
}
