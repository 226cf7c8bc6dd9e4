use egui::{Align2, Color32};

use crate::document::{PendingAction, PromptAnswer};

/// Result of the color picker window for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Confirmed(Color32),
    Cancelled,
}

fn modal(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
}

/// Ask whether to save before `action`. Returns the answer once a button is clicked.
pub fn save_prompt_window(
    ctx: &egui::Context,
    action: PendingAction,
    allow_cancel: bool,
) -> Option<PromptAnswer> {
    modal("Save File")
        .show(ctx, |ui| {
            ui.label(action.prompt_message());
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    return Some(PromptAnswer::Save);
                }
                if ui.button("Discard").clicked() {
                    return Some(PromptAnswer::Discard);
                }
                if allow_cancel && ui.button("Cancel").clicked() {
                    return Some(PromptAnswer::Cancel);
                }
                None
            })
            .inner
        })
        .and_then(|response| response.inner.flatten())
}

/// Edit `working` until the user confirms or cancels
pub fn color_picker_window(ctx: &egui::Context, working: &mut Color32) -> Option<ColorChoice> {
    modal("Colors")
        .show(ctx, |ui| {
            egui::color_picker::color_picker_color32(ui, working, egui::color_picker::Alpha::Opaque);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    return Some(ColorChoice::Confirmed(*working));
                }
                if ui.button("Cancel").clicked() {
                    return Some(ColorChoice::Cancelled);
                }
                None
            })
            .inner
        })
        .and_then(|response| response.inner.flatten())
}

/// Show a file error. Returns true once dismissed.
pub fn error_window(ctx: &egui::Context, message: &str) -> bool {
    modal("Error")
        .show(ctx, |ui| {
            ui.colored_label(ui.visuals().error_fg_color, message);
            ui.button("OK").clicked()
        })
        .and_then(|response| response.inner)
        .unwrap_or(false)
}
