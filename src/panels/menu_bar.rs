use crate::command::Command;
use crate::tools::{ToolConfig, ToolKind};

fn command_button(ui: &mut egui::Ui, command: &Command) -> egui::Response {
    let mut button = egui::Button::new(command.label());
    if let Some(shortcut) = command.shortcut() {
        button = button.shortcut_text(ui.ctx().format_shortcut(&shortcut));
    }
    ui.add(button)
}

fn menu_title(tool: ToolKind) -> &'static str {
    match tool {
        ToolKind::Spray => "Spray",
        other => other.label(),
    }
}

/// File menu, tool size menus and the color picker button
pub fn menu_bar(ctx: &egui::Context, tool: &ToolConfig) -> Option<Command> {
    let mut picked = None;

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                for command in Command::FILE_MENU {
                    if command_button(ui, &command).clicked() {
                        picked = Some(command);
                        ui.close_menu();
                    }
                }
                ui.separator();
                if command_button(ui, &Command::Exit).clicked() {
                    picked = Some(Command::Exit);
                    ui.close_menu();
                }
            });

            ui.separator();

            for kind in ToolKind::ALL {
                ui.menu_button(menu_title(kind), |ui| {
                    for command in Command::tool_menu(kind) {
                        let Command::SelectTool(selection) = command else {
                            continue;
                        };
                        let checked = tool.tool == kind
                            && tool.active_size() == kind.width_for(selection.size_index);
                        if ui.radio(checked, command.label()).clicked() {
                            picked = Some(command);
                            ui.close_menu();
                        }
                    }
                });
            }

            let swatch = egui::RichText::new("■").color(tool.color);
            if ui.button(swatch).on_hover_text("Colors").clicked() {
                picked = Some(Command::PickColor);
            }
        });
    });

    picked
}
