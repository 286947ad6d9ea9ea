//! Tactical diagram editor core
//!
//! An object-based 2D drawing surface for annotating a sports-field
//! background with shapes, arrows, freehand strokes and symbols. The
//! host embeds an [`Editor`], drives it with pointer events and toolbar
//! actions, and receives a flattened PNG plus a re-editable vector
//! snapshot through its save callback. The crate performs no I/O beyond
//! decoding its own embedded assets.

pub mod catalog;
pub mod clipboard;
pub mod domain;
pub mod editor;
pub mod error;
pub mod history;
pub mod render;
pub mod scene;
pub mod snapshot;
pub mod tools;

pub use catalog::{Pitch, SymbolKind};
pub use editor::{CloseHandler, Editor, Notice, SaveHandler};
pub use error::EditorError;
pub use snapshot::SceneSnapshot;
pub use tools::Tool;

/// Logical canvas size, matching the board's fixed aspect
pub const CANVAS_WIDTH: u32 = 1000;
pub const CANVAS_HEIGHT: u32 = 640;
