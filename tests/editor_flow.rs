use tacticboard::domain::{Color, ObjectKind, Point};
use tacticboard::{Editor, Pitch, SymbolKind, Tool};

fn editor() -> Editor {
    let _ = env_logger::builder().is_test(true).try_init();
    Editor::new(None, Box::new(|_, _| {}), Box::new(|| {}))
}

fn draw_rect(editor: &mut Editor, x1: f32, y1: f32, x2: f32, y2: f32) {
    editor.set_tool(Tool::Rect);
    editor.pointer_down(x1, y1, false);
    editor.pointer_move(x2, y2);
    editor.pointer_up();
}

fn draw_line(editor: &mut Editor, x1: f32, y1: f32, x2: f32, y2: f32) {
    editor.set_tool(Tool::Line);
    editor.pointer_down(x1, y1, false);
    editor.pointer_move(x2, y2);
    editor.pointer_up();
}

#[test]
fn history_depth_is_mutations_plus_floor_capped_at_50() {
    let mut editor = editor();
    assert_eq!(editor.history_depth(), 1, "floor snapshot after init");

    for i in 0..5 {
        draw_line(&mut editor, 0.0, 0.0, 10.0 * i as f32, 10.0);
    }
    assert_eq!(editor.history_depth(), 6);

    for i in 0..60 {
        draw_line(&mut editor, 0.0, 0.0, 5.0, 10.0 * i as f32);
    }
    assert_eq!(editor.history_depth(), 50, "depth bounded with eviction");
}

#[test]
fn undo_restores_object_list_before_mutations() {
    let mut editor = editor();
    draw_rect(&mut editor, 10.0, 10.0, 50.0, 50.0);
    let before = editor.scene().objects().to_vec();

    draw_line(&mut editor, 0.0, 0.0, 100.0, 100.0);
    draw_rect(&mut editor, 200.0, 200.0, 250.0, 260.0);
    assert_eq!(editor.scene().objects().len(), 3);

    editor.undo();
    editor.undo();
    assert_eq!(editor.scene().objects(), &before[..]);

    // At the floor, undo is a no-op
    editor.undo();
    editor.undo();
    assert!(editor.scene().objects().is_empty());
    assert!(!editor.can_undo());
    editor.undo();
    assert_eq!(editor.history_depth(), 1);
}

#[test]
fn freehand_stroke_accumulates_points_into_one_open_path() {
    let mut editor = editor();
    // Freehand is the opening tool
    assert_eq!(editor.active_tool(), Tool::Freehand);
    editor.pointer_down(10.0, 10.0, false);
    editor.pointer_move(20.0, 15.0);
    editor.pointer_move(35.0, 30.0);
    editor.pointer_move(50.0, 60.0);
    editor.pointer_up();

    assert_eq!(editor.scene().objects().len(), 1);
    assert_eq!(editor.history_depth(), 2, "one snapshot on release");
    let object = &editor.scene().objects()[0];
    assert!(object.selectable, "stroke finalizes selectable");
    let ObjectKind::Path { points, closed } = &object.kind else {
        panic!("freehand must produce a path, got {}", object.kind_name());
    };
    assert!(!*closed, "freehand strokes stay open");
    assert_eq!(points.len(), 4);
    assert_eq!(points[0], Point::new(10.0, 10.0));
    assert_eq!(points[3], Point::new(50.0, 60.0));

    // Moves without a pointer-down accumulate nothing
    editor.pointer_move(200.0, 200.0);
    let ObjectKind::Path { points, .. } = &editor.scene().objects()[0].kind else {
        unreachable!();
    };
    assert_eq!(points.len(), 4);
}

#[test]
fn arrow_tool_yields_line_and_triangle_composite() {
    let mut editor = editor();
    editor.set_tool(Tool::Arrow);
    editor.pointer_down(100.0, 100.0, false);
    editor.pointer_move(200.0, 200.0);
    editor.pointer_up();

    assert_eq!(editor.scene().objects().len(), 1);
    let ObjectKind::Group { children } = &editor.scene().objects()[0].kind else {
        panic!("arrow must finalize as a group");
    };
    assert_eq!(children.len(), 2);
    assert!(matches!(children[0].kind, ObjectKind::Line { .. }));
    assert!(matches!(children[1].kind, ObjectKind::Triangle { .. }));

    // atan2(100, 100) = 45 degrees, head rotated +90
    assert!((children[1].transform.rotation - 135.0).abs() < 1e-3);
}

#[test]
fn clear_all_empties_objects_and_keeps_background() {
    let mut editor = editor();
    editor.set_background(3);
    draw_rect(&mut editor, 0.0, 0.0, 40.0, 40.0);
    draw_line(&mut editor, 0.0, 0.0, 40.0, 40.0);

    editor.clear_all();
    assert!(editor.scene().objects().is_empty());
    assert_eq!(editor.scene().background(), Pitch::Hall);

    // Clearing an already empty scene records nothing
    let depth = editor.history_depth();
    editor.clear_all();
    assert_eq!(editor.history_depth(), depth);
}

#[test]
fn copy_paste_clones_with_fresh_ids_at_fixed_offset() {
    let mut editor = editor();
    draw_rect(&mut editor, 100.0, 100.0, 160.0, 160.0);
    let source = editor.scene().objects()[0].clone();

    editor.set_tool(Tool::Select);
    editor.pointer_down(130.0, 130.0, false);
    editor.pointer_up();
    editor.copy();
    editor.paste();

    assert_eq!(editor.scene().objects().len(), 2);
    let pasted = editor.scene().objects().last().unwrap();
    assert_ne!(pasted.id, source.id);
    assert_eq!(pasted.bounds().left, source.bounds().left + 20.0);
    assert_eq!(pasted.bounds().top, source.bounds().top + 20.0);
    // The original is unaffected
    assert_eq!(&editor.scene().objects()[0], &source);
    // The pasted object becomes the selection
    assert_eq!(editor.scene().selected_ids(), &[pasted.id]);
}

#[test]
fn paste_without_copy_and_copy_without_selection_are_noops() {
    let mut editor = editor();
    draw_rect(&mut editor, 0.0, 0.0, 30.0, 30.0);
    let depth = editor.history_depth();

    editor.paste();
    assert_eq!(editor.scene().objects().len(), 1);
    assert_eq!(editor.history_depth(), depth);

    editor.set_tool(Tool::Select);
    editor.copy();
    editor.paste();
    assert_eq!(editor.scene().objects().len(), 1);
}

#[test]
fn multi_object_paste_preserves_relative_offsets() {
    let mut editor = editor();
    draw_rect(&mut editor, 100.0, 100.0, 140.0, 140.0);
    draw_rect(&mut editor, 200.0, 100.0, 240.0, 140.0);

    editor.set_tool(Tool::Select);
    editor.pointer_down(120.0, 120.0, false);
    editor.pointer_up();
    editor.pointer_down(220.0, 120.0, true);
    editor.pointer_up();
    assert_eq!(editor.scene().selected_ids().len(), 2);

    editor.copy();
    editor.paste();
    let objects = editor.scene().objects();
    assert_eq!(objects.len(), 4);
    let (a, b) = (&objects[2], &objects[3]);
    assert_eq!(b.bounds().left - a.bounds().left, 100.0);
    assert_eq!(a.bounds().left, 120.0);
}

#[test]
fn tool_switch_mid_gesture_discards_without_snapshot() {
    let mut editor = editor();
    let depth = editor.history_depth();

    editor.set_tool(Tool::Circle);
    editor.pointer_down(50.0, 50.0, false);
    editor.pointer_move(90.0, 50.0);
    assert_eq!(editor.scene().objects().len(), 1, "provisional in scene");

    editor.set_tool(Tool::Select);
    assert!(editor.scene().objects().is_empty());
    assert_eq!(editor.history_depth(), depth);

    // Pointer-leave abandons the same way
    editor.set_tool(Tool::Line);
    editor.pointer_down(10.0, 10.0, false);
    editor.pointer_leave();
    editor.pointer_up();
    assert!(editor.scene().objects().is_empty());
    assert_eq!(editor.history_depth(), depth);
}

#[test]
fn rect_undo_symbol_scenario() {
    let mut editor = editor();
    draw_rect(&mut editor, 100.0, 100.0, 300.0, 200.0);
    assert_eq!(editor.scene().objects().len(), 1);
    assert_eq!(editor.history_depth(), 2);
    let bounds = editor.scene().objects()[0].bounds();
    assert_eq!((bounds.left, bounds.top), (100.0, 100.0));
    assert_eq!((bounds.width(), bounds.height()), (200.0, 100.0));

    editor.undo();
    assert_eq!(editor.history_depth(), 1);
    assert!(editor.scene().objects().is_empty());

    editor.insert_symbol(SymbolKind::Ball);
    assert_eq!(editor.scene().objects().len(), 1);
    assert_eq!(editor.active_tool(), Tool::Select);
    let object = &editor.scene().objects()[0];
    assert!(object.shadow);
    assert!(editor.scene().is_selected(object.id));
    let ObjectKind::Bitmap { center, width, .. } = object.kind else {
        panic!("symbol inserts as bitmap");
    };
    assert_eq!((center.x, center.y), (500.0, 320.0));
    assert_eq!(width, SymbolKind::Ball.insert_width());
}

#[test]
fn restyle_selection_and_subsequent_defaults_scenario() {
    let red = Color::from_rgb8(0xd3, 0x2f, 0x2f);
    let mut editor = editor();
    draw_rect(&mut editor, 100.0, 100.0, 300.0, 200.0);

    editor.set_tool(Tool::Select);
    editor.pointer_down(150.0, 150.0, false);
    editor.pointer_up();
    editor.set_color(red);
    assert_eq!(editor.scene().objects()[0].style.stroke, red);

    // A new rectangle drawn afterwards defaults to red too
    draw_rect(&mut editor, 400.0, 400.0, 450.0, 450.0);
    assert_eq!(editor.scene().objects()[1].style.stroke, red);
    assert_eq!(editor.scene().objects()[1].style.fill, None);
}

#[test]
fn restyle_recolors_arrow_composite_and_tints_bitmaps() {
    let red = Color::from_rgb8(0xd3, 0x2f, 0x2f);
    let mut editor = editor();

    editor.set_tool(Tool::Arrow);
    editor.pointer_down(100.0, 100.0, false);
    editor.pointer_move(300.0, 100.0);
    editor.pointer_up();
    editor.insert_symbol(SymbolKind::Player);

    editor.set_tool(Tool::Select);
    let ids: Vec<_> = editor.scene().objects().iter().map(|o| o.id).collect();
    editor.pointer_down(200.0, 100.0, false);
    editor.pointer_up();
    editor.pointer_down(500.0, 320.0, true);
    editor.pointer_up();
    assert_eq!(editor.scene().selected_ids().len(), 2);

    editor.set_color(red);
    let group = editor.scene().object(ids[0]).unwrap();
    let ObjectKind::Group { children } = &group.kind else {
        panic!("expected arrow group");
    };
    assert_eq!(children[0].style.stroke, red);
    assert_eq!(children[1].style.fill, Some(red));
    let ObjectKind::Bitmap { tint, .. } = editor.scene().object(ids[1]).unwrap().kind else {
        panic!("expected bitmap");
    };
    assert_eq!(tint, Some(red));
}

#[test]
fn style_change_without_selection_only_updates_defaults() {
    let mut editor = editor();
    draw_rect(&mut editor, 0.0, 0.0, 50.0, 50.0);
    let before = editor.scene().objects().to_vec();
    let depth = editor.history_depth();

    editor.set_tool(Tool::Select);
    editor.set_dashed(true);
    editor.set_stroke_width(8.0);
    assert_eq!(editor.scene().objects(), &before[..], "nothing selected");
    assert_eq!(editor.history_depth(), depth);

    draw_line(&mut editor, 0.0, 0.0, 100.0, 0.0);
    let line = editor.scene().objects().last().unwrap();
    assert_eq!(line.style.stroke_width, 8.0);
    assert_eq!(line.style.dash, Some([24.0, 16.0]));
}

#[test]
fn delete_selection_then_undo_brings_objects_back() {
    let mut editor = editor();
    draw_rect(&mut editor, 10.0, 10.0, 60.0, 60.0);
    draw_rect(&mut editor, 100.0, 10.0, 160.0, 60.0);

    editor.set_tool(Tool::Select);
    editor.pointer_down(30.0, 30.0, false);
    editor.pointer_up();
    editor.delete_selection();
    assert_eq!(editor.scene().objects().len(), 1);

    editor.undo();
    assert_eq!(editor.scene().objects().len(), 2);

    // Deleting with nothing selected is a no-op
    let depth = editor.history_depth();
    editor.delete_selection();
    assert_eq!(editor.history_depth(), depth);
}

#[test]
fn pointer_leave_mid_drag_reverts_the_move() {
    let mut editor = editor();
    draw_rect(&mut editor, 10.0, 10.0, 60.0, 60.0);
    editor.set_tool(Tool::Select);
    editor.pointer_down(30.0, 30.0, false);
    editor.pointer_move(80.0, 90.0);
    let depth = editor.history_depth();

    editor.pointer_leave();
    let b = editor.scene().objects()[0].bounds();
    assert_eq!((b.left, b.top), (10.0, 10.0), "selection back in place");
    assert_eq!(editor.history_depth(), depth, "no snapshot for a revert");

    // A pointer-up after the leave has nothing to finalize
    editor.pointer_up();
    assert_eq!(editor.history_depth(), depth);
}

#[test]
fn switching_tools_discards_selection() {
    let mut editor = editor();
    draw_rect(&mut editor, 10.0, 10.0, 60.0, 60.0);
    editor.set_tool(Tool::Select);
    editor.pointer_down(30.0, 30.0, false);
    editor.pointer_up();
    assert_eq!(editor.scene().selected_ids().len(), 1);

    editor.set_tool(Tool::Freehand);
    assert!(editor.scene().selected_ids().is_empty());
}

#[test]
fn scale_and_rotate_selection_record_history() {
    let mut editor = editor();
    draw_rect(&mut editor, 100.0, 100.0, 200.0, 200.0);
    editor.set_tool(Tool::Select);
    editor.pointer_down(150.0, 150.0, false);
    editor.pointer_up();

    let depth = editor.history_depth();
    editor.scale_selection(2.0);
    editor.rotate_selection(45.0);
    assert_eq!(editor.history_depth(), depth + 2);

    let object = &editor.scene().objects()[0];
    assert_eq!(object.transform.scale, 2.0);
    assert_eq!(object.transform.rotation, 45.0);
    assert_eq!(object.bounds().width(), 200.0);
}
