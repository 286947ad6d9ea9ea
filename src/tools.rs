//! Tool state machine and pointer-gesture protocol
//!
//! One [`Tool`] is active at a time; the single [`Gesture`] state is the
//! single-flight guard, so a second gesture cannot open while one is in
//! progress. Anchor tools (line, arrow, circle, rect) share one dispatch
//! path keyed on the variant: pointer-down inserts a provisional
//! zero-extent object, pointer-move resizes it from the anchor, and
//! pointer-up finalizes it. Switching tools abandons the provisional
//! object without recording history.

use log::debug;

use crate::domain::{
    ActiveStyle, ObjectId, ObjectKind, Point, SceneObject, arrowhead_angle, normalize_rect,
};
use crate::scene::SceneStore;

/// Arrowhead side length as a multiple of the stroke width
const ARROWHEAD_FACTOR: f32 = 4.0;

/// Interaction mode governing gesture interpretation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Select,
    Freehand,
    Line,
    Arrow,
    Circle,
    Rect,
}

impl Tool {
    /// Tools following the anchor-based down/move/up protocol
    pub fn is_anchor(self) -> bool {
        matches!(self, Tool::Line | Tool::Arrow | Tool::Circle | Tool::Rect)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Freehand => "freehand",
            Tool::Line => "line",
            Tool::Arrow => "arrow",
            Tool::Circle => "circle",
            Tool::Rect => "rect",
        }
    }
}

/// In-progress pointer interaction
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    Idle,
    /// Anchor-based shape being sized from its anchor point
    Anchor { anchor: Point, object: ObjectId },
    /// Freehand stroke accumulating points
    Stroke { object: ObjectId },
    /// Select-tool drag moving the current selection; the origin lets a
    /// cancelled drag revert the accumulated translation
    Drag {
        origin: Point,
        last: Point,
        moved: bool,
    },
}

#[derive(Debug)]
pub struct ToolState {
    active: Tool,
    gesture: Gesture,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolState {
    /// The board opens in freehand mode
    pub fn new() -> Self {
        Self {
            active: Tool::Freehand,
            gesture: Gesture::Idle,
        }
    }

    pub fn active(&self) -> Tool {
        self.active
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Switch the active tool
    ///
    /// Always abandons any open gesture; entering a non-select tool also
    /// discards the selection.
    pub fn set_tool(&mut self, tool: Tool, scene: &mut SceneStore) {
        self.cancel_gesture(scene);
        if tool != Tool::Select {
            scene.clear_selection();
        }
        debug!("tool: {} -> {}", self.active.name(), tool.name());
        self.active = tool;
    }

    /// Abandon an in-progress gesture without recording history:
    /// provisional objects are removed and a partial drag is reverted,
    /// so the scene is back at its last snapshotted state
    pub fn cancel_gesture(&mut self, scene: &mut SceneStore) {
        match self.gesture {
            Gesture::Anchor { object, .. } | Gesture::Stroke { object } => {
                scene.remove_object(object);
            }
            Gesture::Drag {
                origin,
                last,
                moved: true,
            } => {
                scene.for_each_selected(|o| o.translate(origin.x - last.x, origin.y - last.y));
            }
            Gesture::Idle | Gesture::Drag { .. } => {}
        }
        self.gesture = Gesture::Idle;
    }

    /// Begin a gesture at the pointer position
    pub fn pointer_down(&mut self, scene: &mut SceneStore, style: &ActiveStyle, p: Point, shift: bool) {
        if self.gesture != Gesture::Idle {
            // Single-flight: a gesture is already open
            return;
        }
        match self.active {
            Tool::Select => match scene.hit_topmost(p) {
                Some(id) => {
                    if shift {
                        scene.toggle_selected(id);
                    } else if !scene.is_selected(id) {
                        scene.select_only(id);
                    }
                    self.gesture = Gesture::Drag {
                        origin: p,
                        last: p,
                        moved: false,
                    };
                }
                None => scene.clear_selection(),
            },
            Tool::Freehand => {
                let id = scene.alloc_id();
                scene.add_object(SceneObject::provisional(
                    id,
                    ObjectKind::Path {
                        points: vec![p],
                        closed: false,
                    },
                    style.outline_style(),
                ));
                self.gesture = Gesture::Stroke { object: id };
            }
            Tool::Line | Tool::Arrow => {
                let id = scene.alloc_id();
                scene.add_object(SceneObject::provisional(
                    id,
                    ObjectKind::Line { start: p, end: p },
                    style.line_style(),
                ));
                self.gesture = Gesture::Anchor {
                    anchor: p,
                    object: id,
                };
            }
            Tool::Circle => {
                let id = scene.alloc_id();
                scene.add_object(SceneObject::provisional(
                    id,
                    ObjectKind::Circle {
                        center: p,
                        radius: 0.0,
                    },
                    style.outline_style(),
                ));
                self.gesture = Gesture::Anchor {
                    anchor: p,
                    object: id,
                };
            }
            Tool::Rect => {
                let id = scene.alloc_id();
                scene.add_object(SceneObject::provisional(
                    id,
                    ObjectKind::Rect {
                        origin: p,
                        width: 0.0,
                        height: 0.0,
                    },
                    style.outline_style(),
                ));
                self.gesture = Gesture::Anchor {
                    anchor: p,
                    object: id,
                };
            }
        }
    }

    /// Update the open gesture with a new pointer position
    pub fn pointer_move(&mut self, scene: &mut SceneStore, p: Point) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Drag { origin, last, .. } => {
                let (dx, dy) = (p.x - last.x, p.y - last.y);
                if dx != 0.0 || dy != 0.0 {
                    scene.for_each_selected(|o| o.translate(dx, dy));
                    self.gesture = Gesture::Drag {
                        origin,
                        last: p,
                        moved: true,
                    };
                }
            }
            Gesture::Stroke { object } => {
                scene.update_object(object, |o| {
                    if let ObjectKind::Path { points, .. } = &mut o.kind {
                        points.push(p);
                    }
                });
            }
            Gesture::Anchor { anchor, object } => {
                let tool = self.active;
                scene.update_object(object, |o| match &mut o.kind {
                    ObjectKind::Line { end, .. } => *end = p,
                    ObjectKind::Circle { radius, .. } => *radius = anchor.distance(p),
                    ObjectKind::Rect {
                        origin,
                        width,
                        height,
                    } => {
                        let (min_x, min_y, max_x, max_y) =
                            normalize_rect(anchor.x, anchor.y, p.x, p.y);
                        *origin = Point::new(min_x, min_y);
                        *width = max_x - min_x;
                        *height = max_y - min_y;
                    }
                    _ => debug!("gesture: unexpected provisional kind for {}", tool.name()),
                });
            }
        }
    }

    /// Finalize the open gesture
    ///
    /// Returns `true` when the scene was structurally mutated and a
    /// history snapshot should be captured. A click without movement
    /// still finalizes a degenerate object; that is accepted behavior.
    pub fn pointer_up(&mut self, scene: &mut SceneStore) -> bool {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => false,
            Gesture::Drag { moved, .. } => moved,
            Gesture::Stroke { object } => {
                scene.update_object(object, |o| {
                    o.selectable = true;
                    o.evented = true;
                });
                true
            }
            Gesture::Anchor { object, .. } => {
                if self.active == Tool::Arrow {
                    self.finalize_arrow(scene, object);
                } else {
                    scene.update_object(object, |o| {
                        o.selectable = true;
                        o.evented = true;
                    });
                }
                true
            }
        }
    }

    /// Replace the raw provisional line with a {line, arrowhead} group
    fn finalize_arrow(&self, scene: &mut SceneStore, object: ObjectId) {
        let Some(line) = scene.object(object).cloned() else {
            return;
        };
        let ObjectKind::Line { start, end } = line.kind else {
            return;
        };
        scene.remove_object(object);

        let side = line.style.stroke_width * ARROWHEAD_FACTOR;
        let head_id = scene.alloc_id();
        let mut head = SceneObject::provisional(
            head_id,
            ObjectKind::Triangle {
                center: end,
                width: side,
                height: side,
            },
            line.style,
        );
        head.style.dash = None;
        head.transform.rotation = arrowhead_angle(start, end);

        let mut shaft = line.clone();
        shaft.selectable = false;
        shaft.evented = false;

        let group_id = scene.alloc_id();
        let mut group = SceneObject::new(
            group_id,
            ObjectKind::Group {
                children: vec![shaft, head],
            },
            line.style,
        );
        group.style.dash = None;
        scene.add_object(group);
    }
}
