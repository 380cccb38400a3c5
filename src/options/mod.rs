//! Centralized scene/camera/rendering options with TOML preset support.
//!
//! All tweakable settings (camera, focus transition, lighting, labels,
//! scene contents, keybindings) are consolidated here. Options serialize
//! to/from TOML so a scene can be reconfigured without recompiling.

mod camera;
mod focus;
mod labels;
mod lighting;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use focus::FocusOptions;
pub use labels::LabelOptions;
pub use lighting::LightingOptions;
pub use scene::{PlanetOptions, SceneOptions, StarfieldOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OrreryError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[focus]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and orbit control parameters.
    pub camera: CameraOptions,
    /// Click-to-focus transition parameters.
    pub focus: FocusOptions,
    /// Lighting parameters.
    pub lighting: LightingOptions,
    /// Floating label parameters.
    pub labels: LabelOptions,
    /// Planets and starfield.
    pub scene: SceneOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, OrreryError> {
        let content = std::fs::read_to_string(path).map_err(OrreryError::Io)?;
        let options = toml::from_str(&content)
            .map_err(|e| OrreryError::OptionsParse(e.to_string()))?;
        log::info!("loaded options preset {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), OrreryError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrreryError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrreryError::Io)?;
        }
        std::fs::write(path, content).map_err(OrreryError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

/// Split a `0xRRGGBB` color into sRGB channels in [0, 1].
#[must_use]
pub fn srgb_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}
