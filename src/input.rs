use egui::{Context, LayerId, PointerButton, Pos2, Rect};

use crate::surface::PixelPos;

const BUTTONS: [PointerButton; 3] = [
    PointerButton::Primary,
    PointerButton::Secondary,
    PointerButton::Middle,
];

/// Pointer events in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    /// Mouse button was pressed over the canvas
    PointerDown { pos: PixelPos, button: PointerButton },
    /// Mouse moved over the canvas, or anywhere while the primary button is held
    PointerMove { pos: PixelPos, primary_held: bool },
    /// Mouse button was released, wherever the pointer is
    PointerUp { pos: PixelPos, button: PointerButton },
}

/// Pointer state copied out of egui input for one frame
struct PointerFrame {
    hover: Option<Pos2>,
    interact: Option<Pos2>,
    latest: Option<Pos2>,
    primary_held: bool,
    pressed: Vec<PointerButton>,
    released: Vec<PointerButton>,
}

/// Handles converting raw egui input into canvas events
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    // Layer the canvas is painted on; pointers over any other layer are ignored
    canvas_layer: Option<LayerId>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
            canvas_layer: None,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn set_canvas_layer(&mut self, layer: LayerId) {
        self.canvas_layer = Some(layer);
    }

    /// Screen position to pixel relative to the canvas origin
    pub fn to_pixel(&self, pos: Pos2) -> PixelPos {
        let local = pos - self.canvas_rect.min;
        PixelPos::new(local.x.floor() as i32, local.y.floor() as i32)
    }

    /// Inside the canvas rect and not covered by a popup or window
    fn hits_canvas(&self, ctx: &Context, pos: Pos2) -> bool {
        self.canvas_rect.contains(pos)
            && self
                .canvas_layer
                .is_none_or(|layer| ctx.layer_id_at(pos).is_none_or(|hit| hit == layer))
    }

    /// Process raw egui input and generate canvas events
    pub fn process_input(&mut self, ctx: &Context) -> Vec<CanvasEvent> {
        let frame = ctx.input(|input| {
            let pointer = &input.pointer;
            PointerFrame {
                hover: pointer.hover_pos(),
                interact: pointer.interact_pos(),
                latest: pointer.latest_pos(),
                primary_held: pointer.button_down(PointerButton::Primary),
                pressed: BUTTONS.into_iter().filter(|b| pointer.button_pressed(*b)).collect(),
                released: BUTTONS.into_iter().filter(|b| pointer.button_released(*b)).collect(),
            }
        });

        let mut events = Vec::new();

        if let Some(pos) = frame.hover {
            let moved = Some(pos) != self.last_pointer_pos;
            if moved && (frame.primary_held || self.hits_canvas(ctx, pos)) {
                events.push(CanvasEvent::PointerMove {
                    pos: self.to_pixel(pos),
                    primary_held: frame.primary_held,
                });
            }
        }
        let previous = self.last_pointer_pos;
        self.last_pointer_pos = frame.hover;

        for button in BUTTONS {
            if frame.pressed.contains(&button) {
                if let Some(pos) = frame.interact.filter(|pos| self.hits_canvas(ctx, *pos)) {
                    events.push(CanvasEvent::PointerDown {
                        pos: self.to_pixel(pos),
                        button,
                    });
                }
            }
            if frame.released.contains(&button) {
                let pos = frame
                    .latest
                    .or(previous)
                    .unwrap_or(self.canvas_rect.min);
                events.push(CanvasEvent::PointerUp {
                    pos: self.to_pixel(pos),
                    button,
                });
            }
        }

        events
    }
}
