//! Snapshot-based undo history
//!
//! Every structural mutation serializes the whole object list onto a
//! bounded stack. Restoring rewrites the scene from the previous entry;
//! the explicit [`HistoryState::Applying`] mode makes the manager ignore
//! capture requests raised by its own restore, which would otherwise
//! corrupt the undo chain.

use log::{debug, error};

use crate::domain::SceneObject;

/// Maximum number of retained snapshots; the oldest is evicted first
pub const MAX_DEPTH: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryState {
    Idle,
    /// A restore is rewriting the scene; captures are ignored
    Applying,
}

#[derive(Debug)]
pub struct History {
    stack: Vec<String>,
    state: HistoryState,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            state: HistoryState::Idle,
        }
    }

    pub fn state(&self) -> HistoryState {
        self.state
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Undo is possible once there is anything above the floor snapshot
    pub fn can_undo(&self) -> bool {
        self.stack.len() > 1
    }

    /// Capture a snapshot of the object list
    ///
    /// Ignored while a restore is applying. A serialization failure is
    /// logged and skipped; the stack keeps its last good entry.
    pub fn record(&mut self, objects: &[SceneObject]) {
        if self.state == HistoryState::Applying {
            debug!("history: capture ignored during restore");
            return;
        }
        match serde_json::to_string(objects) {
            Ok(encoded) => {
                self.stack.push(encoded);
                if self.stack.len() > MAX_DEPTH {
                    self.stack.remove(0);
                }
                debug!("history: depth {}", self.stack.len());
            }
            Err(err) => error!("history: snapshot failed: {err}"),
        }
    }

    /// Start restoring the previous snapshot
    ///
    /// Returns the object list to re-apply and switches to `Applying`
    /// until [`History::end_apply`]. A no-op at the floor snapshot.
    pub fn begin_apply(&mut self) -> Option<Vec<SceneObject>> {
        if !self.can_undo() {
            return None;
        }
        let previous = &self.stack[self.stack.len() - 2];
        let objects: Vec<SceneObject> = match serde_json::from_str(previous) {
            Ok(objects) => objects,
            Err(err) => {
                error!("history: corrupt snapshot, undo aborted: {err}");
                return None;
            }
        };
        self.stack.pop();
        self.state = HistoryState::Applying;
        Some(objects)
    }

    /// Finish a restore started by [`History::begin_apply`]
    pub fn end_apply(&mut self) {
        self.state = HistoryState::Idle;
    }
}
