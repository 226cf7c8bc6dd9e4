use egui::{Color32, PointerButton};
use rand::Rng;
use rand::rngs::StdRng;

use crate::document::Document;
use crate::input::CanvasEvent;
use crate::renderer::StrokeRenderer;
use crate::stroke::StrokeState;
use crate::surface::{PixelPos, PixelRect};
use crate::tools::{ToolConfig, ToolSelection};

/// Smallest surface the host may request
pub const MIN_CANVAS_SIZE: u32 = 10;

/// Informational text shown by the host around the canvas
pub trait UiUpdatePort {
    fn set_status_text(&mut self, text: &str);

    fn set_tool_text(&mut self, text: &str);
}

/// What the host needs to upload before the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repaint {
    Nothing,
    Region(PixelRect),
    /// The buffer was replaced or resized
    Full,
}

/// The painting widget. The host owns the event loop and forwards pointer
/// events to the `on_*` handlers.
#[derive(Debug)]
pub struct Canvas<R = StdRng> {
    document: Document,
    tool: ToolConfig,
    stroke: StrokeState,
    renderer: StrokeRenderer<R>,
    damage: PixelRect,
    shown_generation: Option<u64>,
}

impl Default for Canvas<StdRng> {
    fn default() -> Self {
        Self::new(Document::default(), ToolConfig::default())
    }
}

impl Canvas<StdRng> {
    pub fn new(document: Document, tool: ToolConfig) -> Self {
        Self::with_renderer(document, tool, StrokeRenderer::new())
    }
}

impl<R: Rng> Canvas<R> {
    pub fn with_renderer(document: Document, tool: ToolConfig, renderer: StrokeRenderer<R>) -> Self {
        Self {
            document,
            tool: tool.sanitized(),
            stroke: StrokeState::default(),
            renderer,
            damage: PixelRect::NOTHING,
            shown_generation: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn tool(&self) -> &ToolConfig {
        &self.tool
    }

    pub fn stroke(&self) -> &StrokeState {
        &self.stroke
    }

    pub fn handle_event(&mut self, event: CanvasEvent, port: &mut dyn UiUpdatePort) {
        match event {
            CanvasEvent::PointerDown { pos, button } => self.on_pointer_down(pos, button),
            CanvasEvent::PointerMove { pos, primary_held } => {
                self.on_pointer_move(pos, primary_held, port)
            }
            CanvasEvent::PointerUp { pos, button } => self.on_pointer_up(pos, button),
        }
    }

    pub fn on_pointer_down(&mut self, pos: PixelPos, button: PointerButton) {
        if button == PointerButton::Primary {
            self.stroke.begin(pos);
        }
    }

    /// Report the pointer position and, while a stroke is active, draw the
    /// segment from the previous position.
    pub fn on_pointer_move(&mut self, pos: PixelPos, primary_held: bool, port: &mut dyn UiUpdatePort) {
        port.set_status_text(&format!("Mouse at {}, {}", pos.x, pos.y));
        port.set_tool_text(&self.tool.status_text());

        if !primary_held {
            return;
        }
        if let Some((from, to)) = self.stroke.advance(pos) {
            let damage =
                self.renderer
                    .apply_stroke(self.document.surface_mut(), &self.tool, from, to);
            if !damage.is_empty() {
                self.document.mark_dirty();
                self.damage = self.damage.union(&damage);
            }
        }
    }

    pub fn on_pointer_up(&mut self, _pos: PixelPos, button: PointerButton) {
        if button == PointerButton::Primary {
            self.stroke.end();
        }
    }

    /// Take the pending repaint request
    pub fn on_repaint_requested(&mut self) -> Repaint {
        let damage = std::mem::replace(&mut self.damage, PixelRect::NOTHING);
        if self.shown_generation != Some(self.document.generation()) {
            self.shown_generation = Some(self.document.generation());
            Repaint::Full
        } else if damage.is_empty() {
            Repaint::Nothing
        } else {
            Repaint::Region(damage)
        }
    }

    pub fn select_tool(&mut self, selection: ToolSelection, port: &mut dyn UiUpdatePort) {
        self.tool.select_tool(selection);
        port.set_tool_text(&self.tool.status_text());
    }

    pub fn set_color(&mut self, color: Color32, port: &mut dyn UiUpdatePort) {
        self.tool.set_color(color);
        log::info!("Color selected: {:?}", self.tool.color.to_array());
        port.set_tool_text(&self.tool.status_text());
    }

    /// Match the surface to the widget size, never below [`MIN_CANVAS_SIZE`]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.document
            .resize(width.max(MIN_CANVAS_SIZE), height.max(MIN_CANVAS_SIZE));
    }

    /// Drop any in-progress stroke, e.g. after the surface was replaced
    pub fn cancel_stroke(&mut self) {
        self.stroke.end();
    }
}
