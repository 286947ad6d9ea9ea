//! Serialized scene snapshots
//!
//! The same JSON model backs both the re-editable export artifact and
//! the undo history. The background layer is excluded from exports by
//! design; the field stays optional so hosts that persist their own
//! background choice can round-trip it.

use serde::{Deserialize, Serialize};

use crate::catalog::Pitch;
use crate::domain::SceneObject;
use crate::error::EditorError;
use crate::scene::SceneStore;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub version: u32,
    pub objects: Vec<SceneObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Pitch>,
}

impl SceneSnapshot {
    /// Capture the scene's object list, excluding the background
    pub fn capture(scene: &SceneStore) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            objects: scene.objects().to_vec(),
            background: None,
        }
    }

    pub fn encode(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(input: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(input)?)
    }
}
