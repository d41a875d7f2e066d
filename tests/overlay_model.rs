use std::sync::Arc;

use canvas_board::element::{Element, ElementType, factory};
use canvas_board::error::CanvasError;
use canvas_board::overlay::OverlayModel;
use canvas_board::renderer::Surface;
use canvas_board::ElementId;
use egui::{Color32, ColorImage, Pos2, Rect, Stroke, Vec2, pos2, vec2};

const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

fn image(position: Pos2, size: Vec2) -> ElementType {
    let pixels = Arc::new(ColorImage::new([size.x as usize, size.y as usize], Color32::WHITE));
    factory::create_image("test.png", pixels, position, size)
}

fn model_with(elements: Vec<ElementType>) -> OverlayModel {
    let mut model = OverlayModel::new(CANVAS);
    for element in elements {
        model.add_element(element);
    }
    model
}

fn assert_inside_canvas(rect: Rect) {
    assert!(rect.min.x >= 0.0, "{rect:?}");
    assert!(rect.min.y >= 0.0, "{rect:?}");
    assert!(rect.max.x <= CANVAS.x, "{rect:?}");
    assert!(rect.max.y <= CANVAS.y, "{rect:?}");
}

#[test]
fn test_move_clamps_to_right_edge() {
    let mut model = model_with(vec![image(Pos2::ZERO, vec2(200.0, 100.0))]);
    model.move_element(0, 750.0, 50.0).unwrap();
    assert_eq!(model.elements()[0].position(), pos2(600.0, 50.0));
}

#[test]
fn test_move_clamps_negative_coordinates() {
    let mut model = model_with(vec![image(pos2(10.0, 10.0), vec2(50.0, 50.0))]);
    model.move_element(0, -30.0, -5.0).unwrap();
    assert_eq!(model.elements()[0].position(), Pos2::ZERO);
}

#[test]
fn test_move_element_larger_than_canvas() {
    let mut model = model_with(vec![image(Pos2::ZERO, vec2(1000.0, 100.0))]);
    model.move_element(0, 50.0, 50.0).unwrap();
    assert_eq!(model.elements()[0].position(), pos2(0.0, 50.0));
}

#[test]
fn test_move_then_hit_test() {
    let mut model = model_with(vec![image(Pos2::ZERO, vec2(200.0, 100.0))]);
    for (x, y) in [(0.0, 0.0), (300.0, 200.0), (599.0, 499.0), (750.0, 50.0)] {
        model.move_element(0, x, y).unwrap();
        let center = model.elements()[0].rect().center();
        assert_eq!(model.hit_test(center), Some(0));
    }
}

#[test]
fn test_topmost_element_wins_hit_test() {
    let a = image(pos2(0.0, 0.0), vec2(200.0, 200.0));
    let b = image(pos2(100.0, 100.0), vec2(200.0, 200.0));
    let b_id = b.id();
    let model = model_with(vec![a, b]);

    assert_eq!(model.hit_test(pos2(150.0, 150.0)), Some(1));
    assert_eq!(model.element_at(pos2(150.0, 150.0)).map(|e| e.id()), Some(b_id));
    assert_eq!(model.hit_test(pos2(50.0, 50.0)), Some(0));
    assert_eq!(model.hit_test(pos2(700.0, 500.0)), None);
}

#[test]
fn test_hit_test_follows_rotation() {
    // A long thin bar standing upright once rotated a quarter turn
    let mut model = model_with(vec![image(pos2(100.0, 290.0), vec2(200.0, 20.0))]);
    assert_eq!(model.hit_test(pos2(110.0, 300.0)), Some(0));

    model.rotate_element(0, 90.0).unwrap();
    assert_eq!(model.hit_test(pos2(110.0, 300.0)), None);
    assert_eq!(model.hit_test(pos2(200.0, 220.0)), Some(0));
}

#[test]
fn test_delete_selected() {
    let mut model = model_with(vec![image(Pos2::ZERO, vec2(10.0, 10.0)), image(Pos2::ZERO, vec2(20.0, 20.0))]);
    let first = model.elements()[0].id();
    model.select_element(Some(0)).unwrap();

    let removed = model.delete_selected().unwrap();
    assert_eq!(removed.id(), first);
    assert_eq!(model.len(), 1);
    assert_eq!(model.selected(), None);

    // Second delete has nothing to act on
    assert!(model.delete_selected().is_none());
    assert_eq!(model.len(), 1);
}

#[test]
fn test_delete_without_selection_is_noop() {
    let mut model = model_with(vec![image(Pos2::ZERO, vec2(10.0, 10.0))]);
    let before: Vec<ElementId> = model.elements().iter().map(|e| e.id()).collect();
    assert!(model.delete_selected().is_none());
    let after: Vec<ElementId> = model.elements().iter().map(|e| e.id()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_resize_clamps_width() {
    let mut model = model_with(vec![image(pos2(100.0, 100.0), vec2(50.0, 50.0))]);
    model.resize_element(0, 1000.0, 50.0, 100.0, 100.0).unwrap();
    let rect = model.elements()[0].rect();
    assert_eq!(rect.width(), 700.0);
    assert_inside_canvas(rect);
}

#[test]
fn test_resize_always_inside_canvas() {
    let mut model = model_with(vec![image(Pos2::ZERO, vec2(50.0, 50.0))]);
    let cases = [
        (100.0, 100.0, -50.0, -50.0),
        (900.0, 700.0, 0.0, 0.0),
        (10.0, 10.0, 795.0, 595.0),
        (300.0, 300.0, 1000.0, 1000.0),
        (-20.0, 40.0, 10.0, 10.0),
    ];
    for (w, h, x, y) in cases {
        model.resize_element(0, w, h, x, y).unwrap();
        let rect = model.elements()[0].rect();
        assert_inside_canvas(rect);
        assert!(rect.width() >= 0.0 && rect.height() >= 0.0);
    }
}

#[test]
fn test_rotation_is_idempotent() {
    let mut model = model_with(vec![image(Pos2::ZERO, vec2(10.0, 10.0))]);
    model.rotate_element(0, 45.0).unwrap();
    let once = model.elements()[0].clone();
    model.rotate_element(0, 45.0).unwrap();
    assert_eq!(model.elements()[0], once);
}

#[test]
fn test_rotation_is_normalized() {
    let mut model = model_with(vec![image(Pos2::ZERO, vec2(10.0, 10.0))]);
    model.rotate_element(0, 450.0).unwrap();
    assert_eq!(model.elements()[0].rotation(), 90.0);
    model.rotate_element(0, -90.0).unwrap();
    assert_eq!(model.elements()[0].rotation(), 270.0);
}

#[test]
fn test_out_of_range_select_keeps_selection() {
    let mut model = model_with(vec![image(Pos2::ZERO, vec2(10.0, 10.0))]);
    model.select_element(Some(0)).unwrap();
    let selected = model.selected();

    let err = model.select_element(Some(5)).unwrap_err();
    assert!(matches!(err, CanvasError::InvalidIndex { index: 5, len: 1 }));
    assert_eq!(model.selected(), selected);

    model.select_element(None).unwrap();
    assert_eq!(model.selected(), None);
}

#[test]
fn test_invalid_index_operations_change_nothing() {
    let mut model = model_with(vec![image(pos2(5.0, 5.0), vec2(10.0, 10.0))]);
    let before = model.elements()[0].clone();
    assert!(model.move_element(1, 0.0, 0.0).is_err());
    assert!(model.resize_element(1, 1.0, 1.0, 0.0, 0.0).is_err());
    assert!(model.rotate_element(1, 90.0).is_err());
    assert_eq!(model.elements()[0], before);
}

#[test]
fn test_add_clamps_negative_size() {
    let model = model_with(vec![factory::create_image(
        "odd.png",
        Arc::new(ColorImage::new([1, 1], Color32::WHITE)),
        Pos2::ZERO,
        vec2(-10.0, 5.0),
    )]);
    assert_eq!(model.elements()[0].size(), vec2(0.0, 5.0));
}

#[test]
fn test_id_operations_survive_reordering() {
    let mut model = model_with(vec![image(Pos2::ZERO, vec2(10.0, 10.0)), image(Pos2::ZERO, vec2(20.0, 20.0))]);
    let first = model.elements()[0].id();
    let second = model.elements()[1].id();

    model.remove_by_id(first).unwrap();
    assert_eq!(model.index_of(second), Some(0));
    model.move_by_id(second, pos2(40.0, 40.0)).unwrap();
    assert_eq!(model.get(second).unwrap().position(), pos2(40.0, 40.0));

    assert!(matches!(model.move_by_id(first, Pos2::ZERO), Err(CanvasError::ElementNotFound(id)) if id == first));
}

#[derive(Default)]
struct RecordingSurface {
    calls: Vec<String>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self, _rect: Rect) {
        self.calls.push("clear".to_owned());
    }

    fn draw_image(&mut self, id: ElementId, _image: &Arc<ColorImage>, _rect: Rect, rotation: f32) {
        self.calls.push(format!("image {id} {rotation}"));
    }

    fn draw_text(&mut self, text: &str, _rect: Rect, _font_size: f32, _color: Color32, rotation: f32) {
        self.calls.push(format!("text {text} {rotation}"));
    }

    fn stroke_rotated_rect(&mut self, _rect: Rect, _rotation: f32, _stroke: Stroke) {}

    fn line_segment(&mut self, _from: Pos2, _to: Pos2, _stroke: Stroke) {}

    fn fill_circle(&mut self, _center: Pos2, _radius: f32, _color: Color32) {}

    fn stroke_circle(&mut self, _center: Pos2, _radius: f32, _stroke: Stroke) {}
}

#[test]
fn test_render_clears_then_draws_back_to_front() {
    let back = image(Pos2::ZERO, vec2(10.0, 10.0));
    let back_id = back.id();
    let front = factory::create_text("hi", 20.0, Color32::BLACK, pos2(5.0, 5.0));
    let mut model = model_with(vec![back, front]);
    model.rotate_element(1, 30.0).unwrap();

    let mut surface = RecordingSurface::default();
    model.render(&mut surface);

    assert_eq!(
        surface.calls,
        vec!["clear".to_owned(), format!("image {back_id} 0"), "text hi 30".to_owned()]
    );
}

#[test]
fn test_revision_changes_on_every_mutation() {
    let mut model = model_with(vec![image(Pos2::ZERO, vec2(10.0, 10.0))]);
    let mut last = model.revision();
    let mut check = |model: &OverlayModel| {
        assert!(model.revision() > last);
        last = model.revision();
    };

    model.move_element(0, 5.0, 5.0).unwrap();
    check(&model);
    model.resize_element(0, 20.0, 20.0, 5.0, 5.0).unwrap();
    check(&model);
    model.rotate_element(0, 10.0).unwrap();
    check(&model);
    model.select_element(Some(0)).unwrap();
    check(&model);
    model.delete_selected();
    check(&model);
}
