// ============================================================================
// STYLY ENGINE - Ambient animation and view sequencing for the landing page
// ============================================================================
//
// Host-independent core:
//   sim/     particle and rain pools, advanced per frame
//   input/   pointer trail and parallax reducers
//   view/    intro -> transition -> form state machine
//   studio/  outfit form, in-flight guard, wardrobe
//   render   drawing surface abstraction
//
// The browser host in web/ mounts all of it on canvases and is only
// compiled for wasm32.

pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod sim;
pub mod studio;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod web;

pub use config::Config;
pub use error::{ConfigError, GenerateError, UploadError};
pub use input::{Marker, Offset, Parallax, Point, Trail, parallax_offset};
pub use render::{DrawOp, Recorder, Rgba, Surface};
pub use sim::{Animated, Particles, Rain};
pub use studio::{Birthday, Gender, Occasion, OutfitRequest, Studio, WardrobeEntry};
pub use view::{Effect, Phase, Sequencer, Tab};

#[cfg(target_arch = "wasm32")]
pub use web::Stage;
