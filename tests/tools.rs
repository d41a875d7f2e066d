use std::sync::Arc;

use canvas_board::command::Command;
use canvas_board::config::CanvasConfig;
use canvas_board::element::{Element, factory};
use canvas_board::gizmo::ROTATION_HANDLE_OFFSET;
use canvas_board::overlay::OverlayModel;
use canvas_board::stroke::ShapeKind;
use canvas_board::tools::{PointerState, SelectionState, Tool, ToolKind, ToolType};
use egui::{Color32, ColorImage, CursorIcon, Modifiers, Pos2, Rect, Vec2, pos2, vec2};

fn overlay_with_image(position: Pos2, size: Vec2) -> OverlayModel {
    let mut overlay = OverlayModel::new(Vec2::new(800.0, 600.0));
    let pixels = Arc::new(ColorImage::new([2, 2], Color32::WHITE));
    overlay.add_element(factory::create_image("a.png", pixels, position, size));
    overlay
}

fn tool(kind: ToolKind) -> ToolType {
    ToolType::new(kind, &CanvasConfig::default())
}

fn at(x: f32, y: f32) -> PointerState {
    PointerState::new(pos2(x, y))
}

#[test]
fn test_every_kind_round_trips() {
    for kind in ToolKind::ALL {
        let tool = tool(kind);
        assert_eq!(tool.kind(), kind);
        assert_eq!(tool.name(), kind.name());
    }
}

#[test]
fn test_pencil_gesture() {
    let overlay = OverlayModel::new(Vec2::new(800.0, 600.0));
    let mut pencil = tool(ToolKind::Pencil);

    assert_eq!(pencil.on_pointer_move(at(1.0, 1.0), &overlay), None);
    assert_eq!(
        pencil.on_pointer_down(at(5.0, 5.0), &overlay),
        Some(Command::BeginStroke { position: pos2(5.0, 5.0) })
    );
    assert_eq!(
        pencil.on_pointer_move(at(6.0, 7.0), &overlay),
        Some(Command::ContinueStroke { position: pos2(6.0, 7.0) })
    );
    assert_eq!(pencil.on_pointer_up(at(6.0, 7.0), &overlay), Some(Command::EndStroke));
    assert_eq!(pencil.on_pointer_up(at(6.0, 7.0), &overlay), None);
}

#[test]
fn test_leaving_canvas_ends_stroke() {
    let overlay = OverlayModel::new(Vec2::new(800.0, 600.0));
    let mut pencil = tool(ToolKind::Pencil);
    pencil.on_pointer_down(at(5.0, 5.0), &overlay);
    assert_eq!(pencil.on_pointer_leave(&overlay), Some(Command::EndStroke));
    // Moves after leaving no longer draw
    assert_eq!(pencil.on_pointer_move(at(10.0, 10.0), &overlay), None);
}

#[test]
fn test_eraser_erases_on_down_and_move() {
    let overlay = OverlayModel::new(Vec2::new(800.0, 600.0));
    let mut eraser = tool(ToolKind::Eraser);
    assert_eq!(
        eraser.on_pointer_down(at(5.0, 5.0), &overlay),
        Some(Command::Erase { position: pos2(5.0, 5.0) })
    );
    assert_eq!(
        eraser.on_pointer_move(at(9.0, 5.0), &overlay),
        Some(Command::Erase { position: pos2(9.0, 5.0) })
    );
    assert_eq!(eraser.on_pointer_up(at(9.0, 5.0), &overlay), None);
}

#[test]
fn test_shape_tool_gesture() {
    let overlay = OverlayModel::new(Vec2::new(800.0, 600.0));
    let mut circle = tool(ToolKind::Circle);
    assert_eq!(
        circle.on_pointer_down(at(50.0, 50.0), &overlay),
        Some(Command::BeginShape {
            kind: ShapeKind::Circle,
            position: pos2(50.0, 50.0),
        })
    );
    assert_eq!(
        circle.on_pointer_move(at(60.0, 50.0), &overlay),
        Some(Command::UpdateShape { position: pos2(60.0, 50.0) })
    );
    assert_eq!(circle.on_pointer_up(at(60.0, 50.0), &overlay), Some(Command::CommitShape));
}

#[test]
fn test_switching_away_mid_shape_commits_it() {
    let overlay = OverlayModel::new(Vec2::new(800.0, 600.0));
    let mut line = tool(ToolKind::Line);
    line.on_pointer_down(at(0.0, 0.0), &overlay);
    assert_eq!(line.deactivate(), Some(Command::CommitShape));
}

#[test]
fn test_text_tool_adds_configured_text() {
    let overlay = OverlayModel::new(Vec2::new(800.0, 600.0));
    let mut text = tool(ToolKind::Text);
    let Some(Command::AddElement(element)) = text.on_pointer_down(at(20.0, 30.0), &overlay) else {
        panic!("expected an AddElement command");
    };
    assert_eq!(element.position(), pos2(20.0, 30.0));
    assert_eq!(element.as_text().map(|t| t.content()), Some("Text"));
    assert_eq!(text.cursor_icon(pos2(0.0, 0.0), &overlay), CursorIcon::Text);
}

#[test]
fn test_text_near_edge_stays_on_canvas() {
    let overlay = OverlayModel::new(Vec2::new(800.0, 600.0));
    let mut text = tool(ToolKind::Text);
    let Some(Command::AddElement(element)) = text.on_pointer_down(at(790.0, 590.0), &overlay) else {
        panic!("expected an AddElement command");
    };
    let rect = element.rect();
    assert!(rect.min.x >= 0.0 && rect.min.y >= 0.0);
    assert!(rect.max.x <= 800.0 + 1e-3);
    assert!(rect.max.y <= 600.0 + 1e-3);
    let expected = canvas_board::element::common::estimate_text_size("Text", 24.0);
    assert!((rect.size() - expected).length() < 1e-3);
}

#[test]
fn test_click_selects_and_drags() {
    let overlay = overlay_with_image(pos2(100.0, 100.0), vec2(200.0, 100.0));
    let id = overlay.elements()[0].id();
    let mut select = tool(ToolKind::Select);

    assert_eq!(
        select.on_pointer_down(at(150.0, 120.0), &overlay),
        Some(Command::SelectElement(Some(id)))
    );
    // The grab offset is preserved while dragging
    assert_eq!(
        select.on_pointer_move(at(160.0, 140.0), &overlay),
        Some(Command::MoveElement {
            id,
            position: pos2(110.0, 120.0),
        })
    );
    assert_eq!(select.on_pointer_up(at(160.0, 140.0), &overlay), None);
    assert_eq!(select.as_selection_tool().map(|t| t.state()), Some(&SelectionState::Idle));
}

#[test]
fn test_click_on_empty_canvas_clears_selection() {
    let mut overlay = overlay_with_image(pos2(100.0, 100.0), vec2(200.0, 100.0));
    let mut select = tool(ToolKind::Select);
    assert_eq!(select.on_pointer_down(at(500.0, 500.0), &overlay), None);

    overlay.select_element(Some(0)).unwrap();
    assert_eq!(select.on_pointer_down(at(500.0, 500.0), &overlay), Some(Command::SelectElement(None)));
}

#[test]
fn test_corner_handle_resizes() {
    let mut overlay = overlay_with_image(pos2(100.0, 100.0), vec2(200.0, 100.0));
    overlay.select_element(Some(0)).unwrap();
    let id = overlay.elements()[0].id();
    let mut select = tool(ToolKind::Select);

    // Grab the bottom-right handle
    assert_eq!(select.on_pointer_down(at(300.0, 200.0), &overlay), None);
    assert_eq!(
        select.on_pointer_move(at(320.0, 230.0), &overlay),
        Some(Command::ResizeElement {
            id,
            rect: Rect::from_min_max(pos2(100.0, 100.0), pos2(320.0, 230.0)),
        })
    );
}

#[test]
fn test_shift_keeps_aspect_ratio() {
    let mut overlay = overlay_with_image(pos2(100.0, 100.0), vec2(200.0, 100.0));
    overlay.select_element(Some(0)).unwrap();
    let mut select = tool(ToolKind::Select);

    select.on_pointer_down(at(300.0, 200.0), &overlay);
    let shift = PointerState::with_modifiers(pos2(400.0, 210.0), Modifiers::SHIFT);
    let Some(Command::ResizeElement { rect, .. }) = select.on_pointer_move(shift, &overlay) else {
        panic!("expected a resize");
    };
    assert_eq!(rect.min, pos2(100.0, 100.0));
    assert!((rect.width() / rect.height() - 2.0).abs() < 1e-4);
    assert_eq!(rect.width(), 300.0);
}

#[test]
fn test_rotate_handle() {
    let mut overlay = overlay_with_image(pos2(100.0, 100.0), vec2(200.0, 100.0));
    overlay.select_element(Some(0)).unwrap();
    let id = overlay.elements()[0].id();
    let mut select = tool(ToolKind::Select);

    let handle = pos2(200.0, 100.0 - ROTATION_HANDLE_OFFSET);
    assert_eq!(select.on_pointer_down(PointerState::new(handle), &overlay), None);

    // Pointer straight right of the center points the top edge right
    let Some(Command::SetRotation { id: rotated, degrees }) = select.on_pointer_move(at(400.0, 150.0), &overlay) else {
        panic!("expected a rotation");
    };
    assert_eq!(rotated, id);
    assert!((degrees - 90.0).abs() < 1e-3);
}

#[test]
fn test_selection_cursor() {
    let mut overlay = overlay_with_image(pos2(100.0, 100.0), vec2(200.0, 100.0));
    let select = tool(ToolKind::Select);
    assert_eq!(select.cursor_icon(pos2(150.0, 150.0), &overlay), CursorIcon::Move);
    assert_eq!(select.cursor_icon(pos2(500.0, 500.0), &overlay), CursorIcon::Default);

    overlay.select_element(Some(0)).unwrap();
    assert_eq!(select.cursor_icon(pos2(300.0, 200.0), &overlay), CursorIcon::ResizeNwSe);
    assert_eq!(select.cursor_icon(pos2(300.0, 150.0), &overlay), CursorIcon::ResizeHorizontal);
}
