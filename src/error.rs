//! Error types for the editor core
//!
//! Every failure here is recoverable: the affected operation is aborted
//! and the scene stays at its last-known-good state.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    /// A catalog symbol or background asset failed to decode
    #[error("failed to decode asset '{name}': {source}")]
    AssetDecode {
        name: &'static str,
        #[source]
        source: image::ImageError,
    },

    /// A vector-only symbol was used where a bitmap asset is required
    #[error("symbol '{0}' has no bitmap asset")]
    NotABitmap(&'static str),

    /// A background index outside the fixed catalog was requested
    #[error("no background with index {0}")]
    UnknownBackground(usize),

    /// Scene snapshot could not be encoded or decoded
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// The composited raster could not be produced
    #[error("raster export failed: {0}")]
    Raster(String),

    /// PNG encoding of the exported raster failed
    #[error("failed to encode raster artifact: {0}")]
    ArtifactEncode(#[from] image::ImageError),
}
