//! The overlay model: an ordered stack of movable, resizable, rotatable
//! elements drawn above the raster surface, plus the current selection.
//!
//! Elements later in the list are drawn on top and win hit tests. Every
//! element carries a stable [`ElementId`]; index-based operations resolve the
//! index to an id at call time, so nothing holds a position across events.

use egui::{Pos2, Rect, Vec2};

use crate::element::common::{clamp_position, clamp_rect, normalize_degrees};
use crate::element::{Element, ElementId, ElementType};
use crate::error::{CanvasError, CanvasResult};
use crate::renderer::Surface;

#[derive(Debug, Clone)]
pub struct OverlayModel {
    elements: Vec<ElementType>,
    selected: Option<ElementId>,
    canvas_size: Vec2,
    revision: u64,
}

impl OverlayModel {
    pub fn new(canvas_size: Vec2) -> Self {
        Self {
            elements: Vec::new(),
            selected: None,
            canvas_size,
            revision: 0,
        }
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn canvas_rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.canvas_size)
    }

    /// Elements in drawing order, back to front
    pub fn elements(&self) -> &[ElementType] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Incremented by every mutation; a changed revision means the overlay must be redrawn
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementType> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&ElementType> {
        self.elements.get(index)
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|id| self.index_of(id))
    }

    pub fn selected_element(&self) -> Option<&ElementType> {
        self.selected.and_then(|id| self.get(id))
    }

    fn id_at(&self, index: usize) -> CanvasResult<ElementId> {
        self.elements
            .get(index)
            .map(|e| e.id())
            .ok_or(CanvasError::InvalidIndex {
                index,
                len: self.elements.len(),
            })
    }

    fn get_mut(&mut self, id: ElementId) -> CanvasResult<&mut ElementType> {
        self.elements
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or(CanvasError::ElementNotFound(id))
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Append an element on top of the stack
    pub fn add_element(&mut self, element: ElementType) -> ElementId {
        let id = element.id();
        log::debug!("Adding {} element {} at {:?}", element.element_type(), id, element.position());
        self.elements.push(element);
        self.touch();
        id
    }

    /// Select the element at `index`, or clear the selection with `None`.
    ///
    /// An out-of-range index leaves the selection untouched.
    pub fn select_element(&mut self, index: Option<usize>) -> CanvasResult<()> {
        let id = index.map(|i| self.id_at(i)).transpose()?;
        self.set_selection(id);
        Ok(())
    }

    pub fn select_by_id(&mut self, id: Option<ElementId>) -> CanvasResult<()> {
        if let Some(id) = id {
            if self.index_of(id).is_none() {
                return Err(CanvasError::ElementNotFound(id));
            }
        }
        self.set_selection(id);
        Ok(())
    }

    fn set_selection(&mut self, id: Option<ElementId>) {
        if self.selected != id {
            self.selected = id;
            self.touch();
        }
    }

    /// Move an element so its top-left lands on `(x, y)`, clamped inside the canvas
    pub fn move_element(&mut self, index: usize, x: f32, y: f32) -> CanvasResult<()> {
        let id = self.id_at(index)?;
        self.move_by_id(id, Pos2::new(x, y)).map(|_| ())
    }

    /// Returns the position actually applied after clamping
    pub fn move_by_id(&mut self, id: ElementId, position: Pos2) -> CanvasResult<Pos2> {
        let canvas = self.canvas_size;
        let element = self.get_mut(id)?;
        let clamped = clamp_position(position, element.size(), canvas);
        element.placement_mut().set_position(clamped);
        self.touch();
        Ok(clamped)
    }

    /// Set an element's size and origin together, clamping the box inside the canvas
    pub fn resize_element(&mut self, index: usize, width: f32, height: f32, x: f32, y: f32) -> CanvasResult<()> {
        let id = self.id_at(index)?;
        let rect = Rect::from_min_size(Pos2::new(x, y), Vec2::new(width.max(0.0), height.max(0.0)));
        self.resize_by_id(id, rect).map(|_| ())
    }

    /// Returns the rectangle actually applied after clamping
    pub fn resize_by_id(&mut self, id: ElementId, rect: Rect) -> CanvasResult<Rect> {
        let canvas = self.canvas_size;
        let element = self.get_mut(id)?;
        let clamped = clamp_rect(rect, canvas);
        element.placement_mut().set_rect(clamped);
        self.touch();
        Ok(clamped)
    }

    /// Set the absolute rotation of an element in degrees
    pub fn rotate_element(&mut self, index: usize, degrees: f32) -> CanvasResult<()> {
        let id = self.id_at(index)?;
        self.set_rotation_by_id(id, degrees).map(|_| ())
    }

    /// Returns the normalized angle that was stored
    pub fn set_rotation_by_id(&mut self, id: ElementId, degrees: f32) -> CanvasResult<f32> {
        let element = self.get_mut(id)?;
        element.placement_mut().set_rotation(degrees);
        let applied = element.rotation();
        self.touch();
        Ok(applied)
    }

    /// Rotate an element by a relative step, e.g. ±90° from a rotate button
    pub fn rotate_by(&mut self, index: usize, step_degrees: f32) -> CanvasResult<()> {
        let id = self.id_at(index)?;
        self.rotate_by_id(id, step_degrees).map(|_| ())
    }

    pub fn rotate_by_id(&mut self, id: ElementId, step_degrees: f32) -> CanvasResult<f32> {
        let current = self.get(id).ok_or(CanvasError::ElementNotFound(id))?.rotation();
        self.set_rotation_by_id(id, normalize_degrees(current + step_degrees))
    }

    /// Remove the selected element and clear the selection.
    ///
    /// Returns the removed element, or `None` when nothing was selected.
    pub fn delete_selected(&mut self) -> Option<ElementType> {
        let id = self.selected?;
        let removed = self.remove_by_id(id).ok();
        // A dangling selection is cleared either way
        self.selected = None;
        self.touch();
        removed
    }

    pub fn remove_by_id(&mut self, id: ElementId) -> CanvasResult<ElementType> {
        let index = self.index_of(id).ok_or(CanvasError::ElementNotFound(id))?;
        let removed = self.elements.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.touch();
        log::debug!("Removed {} element {}", removed.element_type(), id);
        Ok(removed)
    }

    /// Index of the topmost element whose rotated box contains `point`
    pub fn hit_test(&self, point: Pos2) -> Option<usize> {
        self.elements.iter().rposition(|e| e.hit_test(point))
    }

    /// The topmost element at `point`
    pub fn element_at(&self, point: Pos2) -> Option<&ElementType> {
        self.hit_test(point).map(|i| &self.elements[i])
    }

    /// Redraw the whole overlay layer: clear, then draw back to front
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear(self.canvas_rect());
        for element in &self.elements {
            element.draw(surface);
        }
    }
}
