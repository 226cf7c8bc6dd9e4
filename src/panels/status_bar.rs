use crate::canvas::UiUpdatePort;

/// Texts shown at the bottom of the window
#[derive(Debug, Default, Clone)]
pub struct StatusBar {
    status: String,
    tool: String,
}

impl StatusBar {
    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn tool_text(&self) -> &str {
        &self.tool
    }
}

impl UiUpdatePort for StatusBar {
    fn set_status_text(&mut self, text: &str) {
        text.clone_into(&mut self.status);
    }

    fn set_tool_text(&mut self, text: &str) {
        text.clone_into(&mut self.tool);
    }
}

pub fn status_bar(ctx: &egui::Context, status: &StatusBar) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(status.tool_text());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(status.status_text());
            });
        });
    });
}
