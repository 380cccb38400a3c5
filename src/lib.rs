// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive 3D planet landing scene built on wgpu.
//!
//! Orrery renders a small solar vignette (a home planet, its moon, and a
//! starfield) navigable with a damped orbit camera. Clicking a planet
//! smoothly retargets the camera onto it; floating labels turn to follow a
//! lagging copy of the camera position.
//!
//! # Key entry points
//!
//! - [`engine::SceneEngine`] - the explicit scene context: owns the scene
//!   graph, camera, focus controller and label tracker, and advances them
//!   once per frame
//! - [`scene::PlanetBuilder`] - fluent construction of shape + material pairs
//! - [`camera::focus::FocusController`] - pick-to-focus camera animation
//! - [`options::Options`] - runtime configuration with TOML presets
//! - [`renderer::SceneRenderer`] - wgpu sphere-impostor and star passes
//!
//! # Architecture
//!
//! Everything above the renderer is plain CPU state and is exercised
//! headless in unit tests. The viewer (behind the `viewer` feature) owns a
//! winit window, measures frame delta time, forwards platform events through
//! an [`input::InputProcessor`], calls [`engine::SceneEngine::tick`], and then
//! hands the engine to the renderer for drawing.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod picking;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{Command, SceneEngine};
pub use error::OrreryError;
pub use input::{InputEvent, InputProcessor, MouseButton};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
