//! Scene store: the ordered object list, the background layer and the
//! active selection
//!
//! Z-order is the list position; the background is held outside the list
//! so it can never be selected, snapshotted or exported as a vector.

use log::debug;

use crate::catalog::Pitch;
use crate::domain::{ObjectId, Point, SceneObject};

#[derive(Debug)]
pub struct SceneStore {
    objects: Vec<SceneObject>,
    background: Pitch,
    selection: Vec<ObjectId>,
    next_id: ObjectId,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneStore {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            background: Pitch::default(),
            selection: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate the next object id
    pub fn alloc_id(&mut self) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Append an object on top of the z-order
    pub fn add_object(&mut self, object: SceneObject) {
        debug!("scene: add {} #{}", object.kind_name(), object.id);
        self.objects.push(object);
    }

    /// Remove an object; unknown ids are a no-op
    pub fn remove_object(&mut self, id: ObjectId) {
        self.objects.retain(|o| o.id != id);
        self.selection.retain(|s| *s != id);
    }

    /// Mutate an object in place; unknown ids are a no-op
    pub fn update_object(&mut self, id: ObjectId, f: impl FnOnce(&mut SceneObject)) {
        if let Some(object) = self.objects.iter_mut().find(|o| o.id == id) {
            f(object);
        }
    }

    /// Drop every object, keeping the background and id allocation
    pub fn clear_objects(&mut self) {
        self.objects.clear();
        self.selection.clear();
    }

    /// Replace the whole object list, used by history restore and
    /// snapshot loading; id allocation resumes past the restored ids
    pub fn replace_objects(&mut self, objects: Vec<SceneObject>) {
        let max_id = objects.iter().map(SceneObject::max_id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
        self.objects = objects;
        self.selection.clear();
    }

    pub fn background(&self) -> Pitch {
        self.background
    }

    /// Swap the background layer; never touches the object list
    pub fn set_background(&mut self, pitch: Pitch) {
        self.background = pitch;
    }

    // --- selection ---

    pub fn selected_ids(&self) -> &[ObjectId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selection.contains(&id)
    }

    /// Selected objects in z-order; the background can never appear here
    pub fn selected_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| self.selection.contains(&o.id))
    }

    pub fn select_only(&mut self, id: ObjectId) {
        if self.object(id).is_some() {
            self.selection.clear();
            self.selection.push(id);
        }
    }

    /// Add or remove an object from the selection (shift-click)
    pub fn toggle_selected(&mut self, id: ObjectId) {
        if self.is_selected(id) {
            self.selection.retain(|s| *s != id);
        } else if self.object(id).is_some() {
            self.selection.push(id);
        }
    }

    pub fn select_many(&mut self, ids: impl IntoIterator<Item = ObjectId>) {
        self.selection.clear();
        for id in ids {
            if self.object(id).is_some() {
                self.selection.push(id);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Topmost selectable object under the pointer
    pub fn hit_topmost(&self, p: Point) -> Option<ObjectId> {
        self.objects.iter().rev().find(|o| o.hit_test(p)).map(|o| o.id)
    }

    /// Apply a mutation to every selected object
    pub fn for_each_selected(&mut self, mut f: impl FnMut(&mut SceneObject)) {
        for object in &mut self.objects {
            if self.selection.contains(&object.id) {
                f(object);
            }
        }
    }
}
