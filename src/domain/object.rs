//! Scene object model
//!
//! A scene is an ordered list of [`SceneObject`] records drawn back to
//! front. Objects are replaced wholesale on mutation rather than aliased,
//! which keeps history snapshotting a plain serialize of the list.

use serde::{Deserialize, Serialize};

use super::geometry::{Bounds, Point};
use super::style::{Color, ObjectStyle};
use crate::catalog::SymbolKind;

/// Unique object identifier, allocated monotonically by the scene store
pub type ObjectId = u64;

/// Hit test slack around thin objects, in canvas units
const HIT_MARGIN: f32 = 6.0;

/// Placement adjustments applied on top of an object's base geometry
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation from the base geometry
    pub dx: f32,
    pub dy: f32,
    /// Uniform scale about the object center
    pub scale: f32,
    /// Rotation about the object center, in degrees
    pub rotation: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            dx: 0.0,
            dy: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

/// Type-specific geometry of a scene object
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Freehand stroke (open) or filled vector outline (closed)
    Path { points: Vec<Point>, closed: bool },
    /// Straight line segment between two endpoints
    Line { start: Point, end: Point },
    /// Circle from center and radius
    Circle { center: Point, radius: f32 },
    /// Axis-aligned rectangle from top-left origin and extent
    Rect {
        origin: Point,
        width: f32,
        height: f32,
    },
    /// Isosceles triangle centered on a point, apex up at zero rotation
    Triangle {
        center: Point,
        width: f32,
        height: f32,
    },
    /// Catalog symbol bitmap centered on a point, scaled to `width`
    Bitmap {
        symbol: SymbolKind,
        center: Point,
        width: f32,
        /// Color blend applied by style propagation, at fixed opacity
        tint: Option<Color>,
    },
    /// Composite of several objects manipulated as one unit
    Group { children: Vec<SceneObject> },
}

/// One drawable element of the scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub style: ObjectStyle,
    pub transform: Transform,
    /// Fixed drop shadow, set for catalog symbols
    pub shadow: bool,
    /// Provisional gesture objects stay unselectable until finalized
    pub selectable: bool,
    pub evented: bool,
}

impl SceneObject {
    /// Create a finalized, selectable object
    pub fn new(id: ObjectId, kind: ObjectKind, style: ObjectStyle) -> Self {
        Self {
            id,
            kind,
            style,
            transform: Transform::default(),
            shadow: false,
            selectable: true,
            evented: true,
        }
    }

    /// Create a provisional object for an in-progress gesture
    pub fn provisional(id: ObjectId, kind: ObjectKind, style: ObjectStyle) -> Self {
        Self {
            selectable: false,
            evented: false,
            ..Self::new(id, kind, style)
        }
    }

    /// Short name of the geometry variant
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ObjectKind::Path { closed: false, .. } => "path",
            ObjectKind::Path { closed: true, .. } => "outline",
            ObjectKind::Line { .. } => "line",
            ObjectKind::Circle { .. } => "circle",
            ObjectKind::Rect { .. } => "rect",
            ObjectKind::Triangle { .. } => "triangle",
            ObjectKind::Bitmap { .. } => "bitmap",
            ObjectKind::Group { .. } => "group",
        }
    }

    /// Bounds of the base geometry, before the transform is applied
    fn base_bounds(&self) -> Bounds {
        match &self.kind {
            ObjectKind::Path { points, .. } => {
                let mut iter = points.iter();
                let first = iter.next().copied().unwrap_or_default();
                iter.fold(Bounds::from_point(first), |b, p| {
                    b.union(Bounds::from_point(*p))
                })
            }
            ObjectKind::Line { start, end } => {
                Bounds::from_point(*start).union(Bounds::from_point(*end))
            }
            ObjectKind::Circle { center, radius } => Bounds::new(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            ),
            ObjectKind::Rect {
                origin,
                width,
                height,
            } => Bounds::new(origin.x, origin.y, origin.x + width, origin.y + height),
            ObjectKind::Triangle {
                center,
                width,
                height,
            } => Bounds::new(
                center.x - width * 0.5,
                center.y - height * 0.5,
                center.x + width * 0.5,
                center.y + height * 0.5,
            ),
            ObjectKind::Bitmap {
                symbol,
                center,
                width,
                ..
            } => {
                let height = width / symbol.aspect_ratio();
                Bounds::new(
                    center.x - width * 0.5,
                    center.y - height * 0.5,
                    center.x + width * 0.5,
                    center.y + height * 0.5,
                )
            }
            ObjectKind::Group { children } => {
                let mut iter = children.iter();
                let first = iter.next().map(|c| c.bounds()).unwrap_or_default();
                iter.fold(first, |b, c| b.union(c.bounds()))
            }
        }
    }

    /// Center of the base geometry, the pivot for scale and rotation
    pub fn base_center(&self) -> Point {
        self.base_bounds().center()
    }

    /// Axis-aligned bounds with offset and scale applied
    ///
    /// Rotation is ignored here; selection and drag work on the unrotated
    /// box, which is accurate enough for the object sizes on the board.
    pub fn bounds(&self) -> Bounds {
        let base = self.base_bounds();
        let center = base.center();
        let half_w = base.width() * 0.5 * self.transform.scale;
        let half_h = base.height() * 0.5 * self.transform.scale;
        Bounds::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
        .translate(self.transform.dx, self.transform.dy)
    }

    /// Test whether a pointer position falls on this object
    pub fn hit_test(&self, p: Point) -> bool {
        self.selectable && self.bounds().inflate(HIT_MARGIN).contains_point(p)
    }

    /// Move the object by the given delta
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.transform.dx += dx;
        self.transform.dy += dy;
    }

    /// Scale the object about its center by the given factor
    pub fn scale_by(&mut self, factor: f32) {
        if factor > 0.0 {
            self.transform.scale *= factor;
        }
    }

    /// Rotate the object about its center by the given degrees
    pub fn rotate_by(&mut self, degrees: f32) {
        self.transform.rotation += degrees;
    }

    /// Clone with freshly allocated ids, for paste
    pub fn clone_with_ids(&self, alloc: &mut impl FnMut() -> ObjectId) -> SceneObject {
        let mut copy = self.clone();
        copy.id = alloc();
        if let ObjectKind::Group { children } = &mut copy.kind {
            for child in children {
                *child = child.clone_with_ids(alloc);
            }
        }
        copy
    }

    /// Largest id used by this object or any group child
    pub fn max_id(&self) -> ObjectId {
        match &self.kind {
            ObjectKind::Group { children } => children
                .iter()
                .map(SceneObject::max_id)
                .fold(self.id, ObjectId::max),
            _ => self.id,
        }
    }
}
