//! Canvas 2D rendering
//!
//! Draws a [`RenderSnapshot`](crate::sim::RenderSnapshot) in world space,
//! offset by the camera.

pub mod canvas;

pub use canvas::CanvasRenderer;
