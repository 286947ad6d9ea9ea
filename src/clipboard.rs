//! Single-slot clipboard for copy/paste
//!
//! Holds deep clones of the copied selection; paste clones again so the
//! slot can be pasted repeatedly, each paste landing at a fixed offset
//! from where the source sat at copy time.

use crate::domain::{ObjectId, SceneObject};

/// Paste offset from the copied position, in canvas units
pub const PASTE_OFFSET: f32 = 20.0;

#[derive(Debug, Default)]
pub struct Clipboard {
    slot: Option<Vec<SceneObject>>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Store deep clones of the given objects, replacing any previous
    /// contents; storing nothing is a no-op
    pub fn copy<'a>(&mut self, objects: impl Iterator<Item = &'a SceneObject>) {
        let clones: Vec<SceneObject> = objects.cloned().collect();
        if !clones.is_empty() {
            self.slot = Some(clones);
        }
    }

    /// Clone the slot contents with fresh ids, offset by
    /// [`PASTE_OFFSET`]; relative offsets within the group are kept.
    /// Returns `None` when the slot is empty.
    pub fn paste(&self, alloc: &mut impl FnMut() -> ObjectId) -> Option<Vec<SceneObject>> {
        let stored = self.slot.as_ref()?;
        Some(
            stored
                .iter()
                .map(|source| {
                    let mut copy = source.clone_with_ids(alloc);
                    copy.translate(PASTE_OFFSET, PASTE_OFFSET);
                    copy
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ObjectKind, ObjectStyle, Point};

    fn rect(id: ObjectId, x: f32, y: f32) -> SceneObject {
        SceneObject::new(
            id,
            ObjectKind::Rect {
                origin: Point::new(x, y),
                width: 10.0,
                height: 10.0,
            },
            ObjectStyle::default(),
        )
    }

    #[test]
    fn paste_on_empty_slot_is_none() {
        let clipboard = Clipboard::new();
        let mut next = 0;
        assert!(clipboard.paste(&mut || {
            next += 1;
            next
        })
        .is_none());
    }

    #[test]
    fn copy_of_empty_selection_keeps_previous_contents() {
        let mut clipboard = Clipboard::new();
        clipboard.copy([rect(1, 0.0, 0.0)].iter());
        clipboard.copy(std::iter::empty());
        assert!(!clipboard.is_empty());
    }

    #[test]
    fn repeated_pastes_are_independent_clones() {
        let mut clipboard = Clipboard::new();
        clipboard.copy([rect(1, 5.0, 5.0), rect(2, 45.0, 5.0)].iter());

        let mut next = 10;
        let mut alloc = || {
            next += 1;
            next
        };
        let first = clipboard.paste(&mut alloc).unwrap();
        let second = clipboard.paste(&mut alloc).unwrap();

        assert_eq!(first.len(), 2);
        assert_ne!(first[0].id, second[0].id, "each paste gets fresh ids");

        // Both land at the same fixed offset from the copied position
        for pasted in [&first, &second] {
            assert_eq!(pasted[0].bounds().left, 25.0);
            assert_eq!(pasted[0].bounds().top, 25.0);
            // Relative offset between the two objects is preserved
            assert_eq!(pasted[1].bounds().left - pasted[0].bounds().left, 40.0);
        }
    }
}
