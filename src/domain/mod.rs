//! Pure domain types with minimal dependencies
//!
//! This module contains the core scene model used throughout the crate.
//! Types here have no rendering or I/O dependencies.

pub mod geometry;
pub mod object;
pub mod style;

pub use geometry::*;
pub use object::*;
pub use style::*;
