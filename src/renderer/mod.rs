//! Rendering
//!
//! The simulation knows nothing about pixels. The canvas renderer draws a
//! `Snapshot` in logical coordinates and scales by the device pixel ratio.

pub mod palette;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
