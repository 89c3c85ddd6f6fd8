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
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
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

//! Three-viewport instanced scene renderer built on wgpu.
//!
//! Triview draws a floor and an animated 24-part "mobile" through three
//! side-by-side viewports, each driven by its own camera: pan-zoom,
//! orbital and free-flying.
//!
//! # Key entry points
//!
//! - [`engine::FrameOrchestrator`] - owns the scene state and sequences
//!   each frame's device calls
//! - [`camera::CameraController`] - routes pointer input to the camera
//!   windows
//! - [`animation::InstanceTransformGenerator`] - the mobile's per-frame
//!   instance transforms
//! - [`gpu::device::RenderDevice`] - the rendering device seam, with a wgpu
//!   implementation in [`gpu::wgpu_device`]
//! - [`options::Options`] - UI-editable parameters and keybindings
//!
//! # Frame
//!
//! Each frame the orchestrator uploads the instance records, writes the
//! lighting constants once, then for viewports 0, 1 and 2 writes that
//! viewport's view-projection and draws the floor followed by the
//! instanced mobile.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod lighting;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::FrameOrchestrator;
pub use error::TriviewError;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
