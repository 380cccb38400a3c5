use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::srgb_hex;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Ambient plus single directional light.
pub struct LightingOptions {
    /// Ambient light color (sRGB, 0-1).
    #[schemars(skip)]
    pub ambient_color: [f32; 3],
    /// Ambient light intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub ambient_intensity: f32,
    /// Directional light color (sRGB, 0-1).
    #[schemars(skip)]
    pub directional_color: [f32; 3],
    /// Directional light intensity.
    #[schemars(title = "Sun", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub directional_intensity: f32,
    /// Direction the light arrives from (need not be normalized).
    #[schemars(skip)]
    pub light_dir: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient_color: srgb_hex(0x00ad_5d02),
            ambient_intensity: 1.0,
            directional_color: srgb_hex(0x00ff_e8a8),
            directional_intensity: 2.0,
            light_dir: [0.0, 1.0, 0.0],
        }
    }
}
