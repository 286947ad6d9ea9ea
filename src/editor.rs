//! Editor facade and persistence bridge
//!
//! The host instantiates an [`Editor`] with an optional previously saved
//! snapshot and two callbacks, feeds it pointer events and toolbar
//! actions, and receives a PNG artifact plus a snapshot string back
//! through the save callback. The editor knows nothing about storage,
//! records or accounts.

use std::io::Cursor;

use log::{error, warn};

use crate::catalog::{Pitch, SymbolKind};
use crate::clipboard::Clipboard;
use crate::domain::{ActiveStyle, Color, ObjectKind, ObjectStyle, Point, SceneObject};
use crate::error::EditorError;
use crate::history::History;
use crate::render::render_scene;
use crate::scene::SceneStore;
use crate::snapshot::SceneSnapshot;
use crate::tools::{Tool, ToolState};
use crate::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Receives the raster artifact and the snapshot string on save
pub type SaveHandler = Box<dyn FnMut(Vec<u8>, String)>;
/// Invoked when the session ends, with or without a save
pub type CloseHandler = Box<dyn FnMut()>;

/// Outline width for filled vector symbols (jersey)
const VECTOR_SYMBOL_OUTLINE: f32 = 1.5;

/// User-visible messages; none of them end the session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A symbol asset failed to decode; nothing was inserted
    SymbolUnavailable(&'static str),
    /// A background swap was rejected; the previous background stays
    BackgroundUnavailable(String),
    /// The provided initial snapshot could not be read; starting empty
    SnapshotRejected(String),
    /// Export failed; the session stays open and unsaved
    ExportFailed(String),
}

pub struct Editor {
    scene: SceneStore,
    history: History,
    tools: ToolState,
    style: ActiveStyle,
    clipboard: Clipboard,
    notices: Vec<Notice>,
    on_save: SaveHandler,
    on_close: CloseHandler,
}

impl Editor {
    /// Open an editing session, optionally resuming a saved snapshot
    ///
    /// A corrupt snapshot is reported and the session starts empty; a
    /// snapshot without a background reference gets the default pitch.
    pub fn new(initial: Option<&str>, on_save: SaveHandler, on_close: CloseHandler) -> Self {
        let mut editor = Self {
            scene: SceneStore::new(),
            history: History::new(),
            tools: ToolState::new(),
            style: ActiveStyle::default(),
            clipboard: Clipboard::new(),
            notices: Vec::new(),
            on_save,
            on_close,
        };
        if let Some(input) = initial {
            match SceneSnapshot::decode(input) {
                Ok(snapshot) => {
                    editor.scene.replace_objects(snapshot.objects);
                    editor
                        .scene
                        .set_background(snapshot.background.unwrap_or_default());
                }
                Err(err) => {
                    warn!("editor: rejecting initial snapshot: {err}");
                    editor.notices.push(Notice::SnapshotRejected(err.to_string()));
                }
            }
        }
        // Floor snapshot: undo can never go below the opening state
        editor.record_history();
        editor
    }

    // --- accessors ---

    pub fn scene(&self) -> &SceneStore {
        &self.scene
    }

    pub fn active_tool(&self) -> Tool {
        self.tools.active()
    }

    pub fn active_style(&self) -> ActiveStyle {
        self.style
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// Drain pending user-visible notices
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn record_history(&mut self) {
        self.history.record(self.scene.objects());
    }

    // --- tools and gestures ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.tools.set_tool(tool, &mut self.scene);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, shift: bool) {
        self.tools
            .pointer_down(&mut self.scene, &self.style, Point::new(x, y), shift);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.tools.pointer_move(&mut self.scene, Point::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        if self.tools.pointer_up(&mut self.scene) {
            self.record_history();
        }
    }

    /// The pointer left the canvas: abandon any open gesture
    pub fn pointer_leave(&mut self) {
        self.tools.cancel_gesture(&mut self.scene);
    }

    // --- style propagation ---

    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
        self.restyle_selection();
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.style.stroke_width = width.max(1.0);
        self.restyle_selection();
    }

    pub fn set_dashed(&mut self, dashed: bool) {
        self.style.dashed = dashed;
        self.restyle_selection();
    }

    /// Re-apply the active style to the selection in place
    ///
    /// Only effective while the select tool is active; otherwise the
    /// change merely updates the next-created-object defaults.
    fn restyle_selection(&mut self) {
        if self.tools.active() != Tool::Select {
            return;
        }
        let style = self.style;
        self.scene
            .for_each_selected(|object| apply_style(object, &style));
    }

    // --- catalog ---

    /// Insert a symbol centered on the canvas, select it and switch to
    /// the select tool; a broken asset aborts with a notice
    pub fn insert_symbol(&mut self, kind: SymbolKind) {
        let center = Point::new(CANVAS_WIDTH as f32 / 2.0, CANVAS_HEIGHT as f32 / 2.0);
        let object = if kind.is_bitmap() {
            if let Err(err) = kind.load_image() {
                warn!("editor: symbol insertion aborted: {err}");
                self.notices.push(Notice::SymbolUnavailable(kind.name()));
                return;
            }
            let id = self.scene.alloc_id();
            let mut object = SceneObject::new(
                id,
                ObjectKind::Bitmap {
                    symbol: kind,
                    center,
                    width: kind.insert_width(),
                    tint: None,
                },
                ObjectStyle::default(),
            );
            object.shadow = true;
            object
        } else {
            let points = SymbolKind::jersey_outline()
                .into_iter()
                .map(|p| p.translate(center.x, center.y))
                .collect();
            let id = self.scene.alloc_id();
            let mut object = SceneObject::new(
                id,
                ObjectKind::Path {
                    points,
                    closed: true,
                },
                ObjectStyle {
                    stroke: Color::WHITE,
                    stroke_width: VECTOR_SYMBOL_OUTLINE,
                    dash: None,
                    fill: Some(self.style.color),
                },
            );
            object.shadow = true;
            object
        };

        let id = object.id;
        self.scene.add_object(object);
        self.set_tool(Tool::Select);
        self.scene.select_only(id);
        self.record_history();
    }

    /// Swap the pitch background by catalog index
    ///
    /// Never touches the object list or the history; an invalid index or
    /// undecodable image keeps the previous background.
    pub fn set_background(&mut self, index: usize) {
        let pitch = match Pitch::from_index(index) {
            Ok(pitch) => pitch,
            Err(err) => {
                warn!("editor: {err}");
                self.notices.push(Notice::BackgroundUnavailable(err.to_string()));
                return;
            }
        };
        if let Err(err) = pitch.load_image() {
            warn!("editor: background swap aborted: {err}");
            self.notices.push(Notice::BackgroundUnavailable(err.to_string()));
            return;
        }
        self.scene.set_background(pitch);
    }

    // --- selection operations ---

    /// Remove all selected objects
    pub fn delete_selection(&mut self) {
        let ids: Vec<_> = self.scene.selected_ids().to_vec();
        if ids.is_empty() {
            return;
        }
        for id in ids {
            self.scene.remove_object(id);
        }
        self.record_history();
    }

    /// Remove every object, keeping the background
    pub fn clear_all(&mut self) {
        if self.scene.objects().is_empty() {
            return;
        }
        self.scene.clear_objects();
        self.record_history();
    }

    /// Scale the selection about each object's center
    pub fn scale_selection(&mut self, factor: f32) {
        if self.scene.selected_ids().is_empty() || factor <= 0.0 {
            return;
        }
        self.scene.for_each_selected(|o| o.scale_by(factor));
        self.record_history();
    }

    /// Rotate the selection about each object's center
    pub fn rotate_selection(&mut self, degrees: f32) {
        if self.scene.selected_ids().is_empty() {
            return;
        }
        self.scene.for_each_selected(|o| o.rotate_by(degrees));
        self.record_history();
    }

    // --- clipboard ---

    /// Deep-clone the selection into the clipboard slot
    pub fn copy(&mut self) {
        self.clipboard.copy(self.scene.selected_objects());
    }

    /// Paste the clipboard contents as fresh objects and select them
    pub fn paste(&mut self) {
        let mut alloc = || self.scene.alloc_id();
        let Some(objects) = self.clipboard.paste(&mut alloc) else {
            return;
        };
        let ids: Vec<_> = objects.iter().map(|o| o.id).collect();
        for object in objects {
            self.scene.add_object(object);
        }
        self.scene.select_many(ids);
        self.record_history();
    }

    // --- history ---

    /// Restore the previous snapshot; a no-op at the floor
    pub fn undo(&mut self) {
        if let Some(objects) = self.history.begin_apply() {
            self.scene.replace_objects(objects);
            // Restoring rewrites the scene; the applying-history state
            // filters this capture so the restore is not re-recorded
            self.record_history();
            self.history.end_apply();
        }
    }

    // --- persistence bridge ---

    /// Render the composited scene without mutating it
    pub fn render(&self) -> Result<image::RgbaImage, EditorError> {
        render_scene(&self.scene)
    }

    /// Export the raster artifact and vector snapshot, hand both to the
    /// save callback and close the session
    ///
    /// Failures never escape this boundary: the attempt is reported and
    /// the session stays open with all work intact.
    pub fn export_and_save(&mut self) {
        self.scene.clear_selection();
        match self.try_export() {
            Ok((artifact, snapshot)) => {
                (self.on_save)(artifact, snapshot);
                (self.on_close)();
            }
            Err(err) => {
                error!("editor: export failed: {err}");
                self.notices.push(Notice::ExportFailed(err.to_string()));
            }
        }
    }

    fn try_export(&self) -> Result<(Vec<u8>, String), EditorError> {
        let snapshot = SceneSnapshot::capture(&self.scene).encode()?;
        let raster = render_scene(&self.scene)?;
        let mut artifact = Vec::new();
        raster.write_to(&mut Cursor::new(&mut artifact), image::ImageFormat::Png)?;
        Ok((artifact, snapshot))
    }

    /// Abandon the session without producing artifacts
    pub fn close(&mut self) {
        (self.on_close)();
    }
}

/// Apply the active style to one object, per its kind
fn apply_style(object: &mut SceneObject, style: &ActiveStyle) {
    match &mut object.kind {
        ObjectKind::Bitmap { tint, .. } => {
            // Bitmaps take no stroke or fill; approximate with a tint
            *tint = Some(style.color);
        }
        ObjectKind::Group { children } => {
            object.style = style.line_style();
            object.style.dash = None;
            for child in children {
                apply_style(child, style);
            }
        }
        ObjectKind::Line { .. } => object.style = style.line_style(),
        ObjectKind::Triangle { .. } => {
            // Arrowheads stay solid: filled, never dashed
            object.style = ObjectStyle {
                dash: None,
                ..style.line_style()
            };
        }
        ObjectKind::Path { closed: true, .. } => {
            // Filled vector symbols keep their white outline
            object.style = ObjectStyle {
                stroke: Color::WHITE,
                stroke_width: VECTOR_SYMBOL_OUTLINE,
                dash: None,
                fill: Some(style.color),
            };
        }
        ObjectKind::Path { closed: false, .. }
        | ObjectKind::Circle { .. }
        | ObjectKind::Rect { .. } => object.style = style.outline_style(),
    }
}
