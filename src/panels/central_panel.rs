use egui::{Color32, Rect, TextureHandle, TextureOptions, pos2, vec2};

use crate::canvas::{Canvas, Repaint, UiUpdatePort};
use crate::input::InputHandler;

/// GPU side of the canvas: the texture mirroring the surface and the input mapping
pub struct CanvasView {
    texture: Option<TextureHandle>,
    input: InputHandler,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            texture: None,
            input: InputHandler::new(Rect::NOTHING),
        }
    }
}

impl CanvasView {
    /// Upload whatever changed since the last frame
    fn sync(&mut self, ctx: &egui::Context, canvas: &mut Canvas) {
        let repaint = canvas.on_repaint_requested();
        let surface = canvas.document().surface();
        match (repaint, &mut self.texture) {
            (Repaint::Full, Some(texture)) => {
                texture.set(surface.to_color_image(), TextureOptions::NEAREST);
            }
            (Repaint::Full, None) | (Repaint::Region(_), None) => {
                self.texture = Some(ctx.load_texture(
                    "canvas",
                    surface.to_color_image(),
                    TextureOptions::NEAREST,
                ));
            }
            (Repaint::Region(rect), Some(texture)) => {
                if let Some(region) = surface.region_image(rect) {
                    texture.set_partial(
                        [rect.min.x.max(0) as usize, rect.min.y.max(0) as usize],
                        region,
                        TextureOptions::NEAREST,
                    );
                }
            }
            (Repaint::Nothing, _) => {}
        }
    }
}

pub fn central_panel(
    ctx: &egui::Context,
    canvas: &mut Canvas,
    view: &mut CanvasView,
    port: &mut dyn UiUpdatePort,
    interactive: bool,
) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(Color32::from_gray(64)))
        .show(ctx, |ui| {
            let canvas_rect = ui.available_rect_before_wrap();
            canvas.resize(
                canvas_rect.width().floor().max(0.0) as u32,
                canvas_rect.height().floor().max(0.0) as u32,
            );

            let response = ui.allocate_rect(canvas_rect, egui::Sense::click_and_drag());

            view.input.set_canvas_rect(canvas_rect);
            view.input.set_canvas_layer(response.layer_id);
            let events = view.input.process_input(ctx);
            let had_events = !events.is_empty();
            if interactive {
                for event in events {
                    canvas.handle_event(event, port);
                }
            } else {
                // Pointer input belongs to the modal window
                canvas.cancel_stroke();
            }

            view.sync(ctx, canvas);

            if let Some(texture) = &view.texture {
                let [w, h] = canvas.document().surface().size();
                ui.painter().image(
                    texture.id(),
                    Rect::from_min_size(canvas_rect.min, vec2(w as f32, h as f32)),
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }

            if had_events && canvas.stroke().is_active() {
                ctx.request_repaint();
            }
        });
}
