//! Scene rasterization using tiny-skia
//!
//! The background is scaled to exactly fill the canvas, then every
//! object is drawn over it in z-order. The canvas ends up fully opaque,
//! so the pixmap bytes convert straight back into an `RgbaImage`.

use image::RgbaImage;
use tiny_skia::{
    FilterQuality, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    StrokeDash, Transform,
};

use crate::catalog::SymbolKind;
use crate::domain::{Color, ObjectKind, ObjectStyle, Point, SceneObject};
use crate::error::EditorError;
use crate::scene::SceneStore;
use crate::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Drop shadow offset in canvas units
const SHADOW_OFFSET: f32 = 3.0;
/// Drop shadow opacity
const SHADOW_ALPHA: f32 = 0.3;
/// Blend strength of the bitmap tint filter
const TINT_ALPHA: f32 = 0.6;

/// Composite the full scene (background plus objects) into an image
pub fn render_scene(scene: &SceneStore) -> Result<RgbaImage, EditorError> {
    let background = scene.background().load_image()?;
    let background = image::imageops::resize(
        &background,
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        image::imageops::FilterType::Triangle,
    );

    let size = IntSize::from_wh(CANVAS_WIDTH, CANVAS_HEIGHT)
        .ok_or_else(|| EditorError::Raster("empty canvas".into()))?;
    let mut pixmap = Pixmap::from_vec(background.into_raw(), size)
        .ok_or_else(|| EditorError::Raster("background buffer mismatch".into()))?;

    for object in scene.objects() {
        draw_object(&mut pixmap, object, Transform::identity());
    }

    RgbaImage::from_raw(CANVAS_WIDTH, CANVAS_HEIGHT, pixmap.take())
        .ok_or_else(|| EditorError::Raster("canvas buffer mismatch".into()))
}

/// Placement of an object: scale and rotate about the base-geometry
/// center, then translate by the object offset
fn object_transform(object: &SceneObject) -> Transform {
    let pivot = object.base_center();
    let t = object.transform;
    Transform::from_translate(-pivot.x, -pivot.y)
        .post_concat(Transform::from_scale(t.scale, t.scale))
        .post_concat(Transform::from_rotate(t.rotation))
        .post_concat(Transform::from_translate(pivot.x + t.dx, pivot.y + t.dy))
}

fn draw_object(pixmap: &mut Pixmap, object: &SceneObject, parent: Transform) {
    let ts = object_transform(object).post_concat(parent);

    match &object.kind {
        ObjectKind::Group { children } => {
            for child in children {
                draw_object(pixmap, child, ts);
            }
        }
        ObjectKind::Bitmap {
            symbol,
            center,
            width,
            tint,
        } => draw_bitmap(pixmap, object, *symbol, *center, *width, *tint, ts),
        kind => {
            let Some(path) = build_path(kind) else {
                // Degenerate geometry rasterizes to nothing, which is fine
                return;
            };
            if object.shadow {
                let shadow_ts =
                    ts.post_concat(Transform::from_translate(SHADOW_OFFSET, SHADOW_OFFSET));
                let mut paint = shadow_paint();
                paint.anti_alias = true;
                if matches!(kind, ObjectKind::Path { closed: true, .. }) {
                    pixmap.fill_path(&path, &paint, tiny_skia::FillRule::Winding, shadow_ts, None);
                } else {
                    let stroke = stroke_for(&object.style);
                    pixmap.stroke_path(&path, &paint, &stroke, shadow_ts, None);
                }
            }
            fill_and_stroke(pixmap, &path, &object.style, kind, ts);
        }
    }
}

fn fill_and_stroke(
    pixmap: &mut Pixmap,
    path: &tiny_skia::Path,
    style: &ObjectStyle,
    kind: &ObjectKind,
    ts: Transform,
) {
    // Triangles and closed outlines are filled shapes; lines carry a
    // fill color too but it only matters inside arrow groups, so they
    // are stroked like everything else.
    let fillable = matches!(
        kind,
        ObjectKind::Triangle { .. } | ObjectKind::Path { closed: true, .. }
    );
    if fillable {
        let fill = style.fill.unwrap_or(style.stroke);
        pixmap.fill_path(
            path,
            &color_paint(fill),
            tiny_skia::FillRule::Winding,
            ts,
            None,
        );
    }
    if !fillable || style.fill.is_some() {
        let stroke = stroke_for(style);
        pixmap.stroke_path(path, &color_paint(style.stroke), &stroke, ts, None);
    }
}

fn build_path(kind: &ObjectKind) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    match kind {
        ObjectKind::Line { start, end } => {
            pb.move_to(start.x, start.y);
            pb.line_to(end.x, end.y);
        }
        ObjectKind::Circle { center, radius } => {
            if *radius <= 0.0 {
                return None;
            }
            pb.push_circle(center.x, center.y, *radius);
        }
        ObjectKind::Rect {
            origin,
            width,
            height,
        } => {
            let rect = tiny_skia::Rect::from_xywh(origin.x, origin.y, *width, *height)?;
            pb.push_rect(rect);
        }
        ObjectKind::Triangle {
            center,
            width,
            height,
        } => {
            // Apex up at zero rotation; the transform orients it
            pb.move_to(center.x, center.y - height * 0.5);
            pb.line_to(center.x + width * 0.5, center.y + height * 0.5);
            pb.line_to(center.x - width * 0.5, center.y + height * 0.5);
            pb.close();
        }
        ObjectKind::Path { points, closed } => {
            let first = points.first()?;
            pb.move_to(first.x, first.y);
            for p in &points[1..] {
                pb.line_to(p.x, p.y);
            }
            if *closed {
                pb.close();
            }
        }
        ObjectKind::Bitmap { .. } | ObjectKind::Group { .. } => return None,
    }
    pb.finish()
}

fn draw_bitmap(
    pixmap: &mut Pixmap,
    object: &SceneObject,
    symbol: SymbolKind,
    center: Point,
    width: f32,
    tint: Option<Color>,
    ts: Transform,
) {
    let Ok(source) = symbol.load_image() else {
        // Insertion already validated the asset; a decode failure here
        // leaves a gap in the raster rather than aborting the export
        log::warn!("raster: symbol '{}' failed to decode", symbol.name());
        return;
    };
    let (nw, nh) = (source.width(), source.height());
    let scale = width / nw as f32;
    let height = nh as f32 * scale;

    let place = Transform::from_scale(scale, scale)
        .post_concat(Transform::from_translate(
            center.x - width * 0.5,
            center.y - height * 0.5,
        ))
        .post_concat(ts);

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };

    if object.shadow
        && let Some(silhouette) = shadow_pixmap(&source)
    {
        let shadow_ts =
            place.post_concat(Transform::from_translate(SHADOW_OFFSET, SHADOW_OFFSET));
        pixmap.draw_pixmap(0, 0, silhouette.as_ref(), &paint, shadow_ts, None);
    }
    if let Some(tinted) = symbol_pixmap(&source, tint) {
        pixmap.draw_pixmap(0, 0, tinted.as_ref(), &paint, place, None);
    }
}

/// Premultiplied pixmap of a symbol image, with the tint blend applied
fn symbol_pixmap(source: &RgbaImage, tint: Option<Color>) -> Option<Pixmap> {
    let mut data = Vec::with_capacity(source.as_raw().len());
    for px in source.pixels() {
        let [r, g, b, a] = px.0;
        let af = a as f32 / 255.0;
        let mut rgb = [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0];
        if let Some(t) = tint {
            rgb[0] = rgb[0] * (1.0 - TINT_ALPHA) + t.r * TINT_ALPHA;
            rgb[1] = rgb[1] * (1.0 - TINT_ALPHA) + t.g * TINT_ALPHA;
            rgb[2] = rgb[2] * (1.0 - TINT_ALPHA) + t.b * TINT_ALPHA;
        }
        for c in rgb {
            data.push((c * af * 255.0).round() as u8);
        }
        data.push(a);
    }
    Pixmap::from_vec(data, IntSize::from_wh(source.width(), source.height())?)
}

/// Black silhouette of a symbol image for its drop shadow
fn shadow_pixmap(source: &RgbaImage) -> Option<Pixmap> {
    let mut data = Vec::with_capacity(source.as_raw().len());
    for px in source.pixels() {
        let a = (px.0[3] as f32 * SHADOW_ALPHA).round() as u8;
        data.extend_from_slice(&[0, 0, 0, a]);
    }
    Pixmap::from_vec(data, IntSize::from_wh(source.width(), source.height())?)
}

fn color_paint(color: Color) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn shadow_paint() -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, (255.0 * SHADOW_ALPHA) as u8);
    paint
}

fn stroke_for(style: &ObjectStyle) -> Stroke {
    Stroke {
        width: style.stroke_width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        dash: style
            .dash
            .and_then(|[on, off]| StrokeDash::new(vec![on, off], 0.0)),
        ..Stroke::default()
    }
}
