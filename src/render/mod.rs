//! Raster compositing of the scene
//!
//! Rendering reads the scene model and produces pixels; it never
//! mutates the model, so repeated renders of the same scene are
//! identical.

mod raster;

pub use raster::render_scene;
