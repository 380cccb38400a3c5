use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::srgb_hex;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Planet", inline)]
#[serde(default)]
/// One sphere in the landing scene.
pub struct PlanetOptions {
    /// Node name.
    pub name: String,
    /// Floating label text (empty = no label).
    pub label: String,
    /// World-space position.
    pub position: [f32; 3],
    /// Uniform scale (the sphere has unit radius before scaling).
    pub scale: f32,
    /// Base color (sRGB, 0-1).
    pub color: [f32; 3],
    /// Surface roughness.
    pub roughness: f32,
    /// Sphere tessellation along longitude and latitude.
    pub segments: u32,
    /// Whether this is the initial focus and the reset target.
    pub home: bool,
}

impl Default for PlanetOptions {
    fn default() -> Self {
        Self {
            name: "planet".into(),
            label: String::new(),
            position: [0.0; 3],
            scale: 1.0,
            color: [1.0; 3],
            roughness: 0.9,
            segments: 32,
            home: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Starfield", inline)]
#[serde(default)]
/// Background star sprites.
pub struct StarfieldOptions {
    /// Number of stars.
    #[schemars(title = "Stars", range(min = 0, max = 10000))]
    pub count: u32,
    /// Half-extent of the cube stars are scattered in.
    #[schemars(skip)]
    pub range: f32,
    /// Sprite size in world units.
    #[schemars(title = "Star Size", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub size: f32,
    /// RNG seed; the same seed always yields the same sky.
    #[schemars(skip)]
    pub seed: u64,
}

impl Default for StarfieldOptions {
    fn default() -> Self {
        Self {
            count: 512,
            range: 24.0,
            size: 0.25,
            seed: 0x5eed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Contents of the landing scene.
pub struct SceneOptions {
    /// Planets, in focus-cycling order.
    #[schemars(skip)]
    pub planets: Vec<PlanetOptions>,
    /// Background stars.
    pub starfield: StarfieldOptions,
}

impl Default for SceneOptions {
    fn default() -> Self {
        let earth = PlanetOptions {
            name: "earth".into(),
            label: "Home".into(),
            position: [0.0, 0.0, 3.0],
            scale: 1.0,
            color: srgb_hex(0x007e_c5ff),
            roughness: 0.9,
            segments: 64,
            home: true,
        };
        let moon = PlanetOptions {
            name: "moon".into(),
            label: "About".into(),
            position: [1.5, 4.5, -5.0],
            scale: 0.2,
            color: srgb_hex(0x00d9_d9d9),
            roughness: 0.9,
            segments: 24,
            home: false,
        };
        Self {
            planets: vec![earth, moon],
            starfield: StarfieldOptions::default(),
        }
    }
}
