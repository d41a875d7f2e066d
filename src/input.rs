use egui::{Context, InputState, Key, Modifiers, Pos2, Rect};

use crate::tools::PointerState;

/// Canvas-level input, with positions relative to the canvas origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed inside the canvas
    PointerDown(PointerState),
    /// Pointer moved while the primary button is held
    PointerMove(PointerState),
    /// Primary button was released after a press on the canvas
    PointerUp(PointerState),
    /// Pointer left the canvas while the primary button is held
    PointerLeave,
    /// Delete or Backspace pressed outside a text field
    DeleteSelection,
}

/// The parts of one frame of egui input the canvas cares about
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Pointer position in screen coordinates
    pub hover_pos: Option<Pos2>,
    pub primary_pressed: bool,
    pub primary_released: bool,
    pub modifiers: Modifiers,
    pub delete_pressed: bool,
}

impl InputSnapshot {
    pub fn capture(input: &InputState, keyboard_free: bool) -> Self {
        Self {
            hover_pos: input.pointer.hover_pos(),
            primary_pressed: input.pointer.primary_pressed(),
            primary_released: input.pointer.primary_released(),
            modifiers: input.modifiers,
            delete_pressed: keyboard_free && (input.key_pressed(Key::Delete) || input.key_pressed(Key::Backspace)),
        }
    }
}

/// Handles converting raw egui input into canvas [`InputEvent`]s
#[derive(Debug, Clone)]
pub struct InputHandler {
    canvas_rect: Rect,
    /// Part of the canvas not scrolled out of view or covered by other panels
    visible_rect: Rect,
    last_pointer_pos: Option<Pos2>,
    pointer_down: bool,
    inside: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            visible_rect: canvas_rect,
            last_pointer_pos: None,
            pointer_down: false,
            inside: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
        self.visible_rect = rect;
    }

    /// Restrict pointer input to the part of the canvas that is on screen
    pub fn set_visible_rect(&mut self, clip: Rect) {
        self.visible_rect = self.canvas_rect.intersect(clip);
    }

    fn accepts(&self, screen: Pos2) -> bool {
        self.canvas_rect.contains(screen) && self.visible_rect.contains(screen)
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    /// Map a screen position into canvas coordinates
    pub fn to_canvas(&self, screen: Pos2) -> Pos2 {
        (screen - self.canvas_rect.min).to_pos2()
    }

    /// Canvas position of the pointer if it is over the canvas
    pub fn hover_on_canvas(&self, screen: Option<Pos2>) -> Option<Pos2> {
        screen
            .filter(|pos| self.accepts(*pos))
            .map(|pos| self.to_canvas(pos))
    }

    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let keyboard_free = !ctx.wants_keyboard_input();
        let snapshot = ctx.input(|input| InputSnapshot::capture(input, keyboard_free));
        self.process(snapshot)
    }

    /// Turn one frame of input into events, in the order they should be handled
    pub fn process(&mut self, snapshot: InputSnapshot) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let modifiers = snapshot.modifiers;

        if let Some(pos) = snapshot.hover_pos {
            let inside = self.accepts(pos);
            let pointer = PointerState::with_modifiers(self.to_canvas(pos), modifiers);

            if snapshot.primary_pressed && inside {
                self.pointer_down = true;
                events.push(InputEvent::PointerDown(pointer));
            } else if self.pointer_down && self.last_pointer_pos != Some(pos) {
                if self.inside && !inside {
                    events.push(InputEvent::PointerLeave);
                }
                events.push(InputEvent::PointerMove(pointer));
            }

            self.inside = inside;
            self.last_pointer_pos = Some(pos);
        } else if self.pointer_down && self.inside {
            // Pointer left the window entirely
            events.push(InputEvent::PointerLeave);
            self.inside = false;
        }

        if snapshot.primary_released && self.pointer_down {
            self.pointer_down = false;
            let position = self.last_pointer_pos.map(|pos| self.to_canvas(pos)).unwrap_or_default();
            events.push(InputEvent::PointerUp(PointerState::with_modifiers(position, modifiers)));
        }

        if snapshot.delete_pressed {
            events.push(InputEvent::DeleteSelection);
        }

        events
    }
}
