use egui::Color32;

use crate::canvas::{Canvas, UiUpdatePort};
use crate::command::Command;
use crate::document::{Document, Outcome, PendingAction, PromptAnswer};
use crate::error::FileResult;
use crate::file_handler::NativeFileDialogs;
use crate::panels::{
    CanvasView, ColorChoice, StatusBar, central_panel, color_picker_window, error_window,
    menu_bar, save_prompt_window, status_bar,
};
use crate::settings::Settings;

/// The paint window: menus, canvas, status bar and modal dialogs
pub struct PaintApp {
    settings: Settings,
    canvas: Canvas,
    view: CanvasView,
    dialogs: NativeFileDialogs,
    status: StatusBar,
    // Modal state, at most one is shown at a time
    pending_prompt: Option<PendingAction>,
    color_picker: Option<Color32>,
    error_message: Option<String>,
    // Set once the exit flow finished so the next close request goes through
    closing: bool,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_settings(Settings::load(cc.storage))
    }

    pub fn with_settings(settings: Settings) -> Self {
        let canvas = Canvas::new(Document::default(), settings.tool);
        let mut status = StatusBar::default();
        status.set_tool_text(&canvas.tool().status_text());
        Self {
            dialogs: NativeFileDialogs::new(settings.last_directory.clone()),
            settings,
            canvas,
            view: CanvasView::default(),
            status,
            pending_prompt: None,
            color_picker: None,
            error_message: None,
            closing: false,
        }
    }

    fn modal_open(&self) -> bool {
        self.pending_prompt.is_some() || self.color_picker.is_some() || self.error_message.is_some()
    }

    pub fn execute_command(&mut self, ctx: &egui::Context, command: Command) {
        log::debug!("Executing command: {:?}", command);
        if let Some(action) = command.pending_action() {
            let outcome = self.canvas.document_mut().request(
                action,
                self.settings.prompt_policy,
                &mut self.dialogs,
            );
            self.handle_outcome(ctx, outcome);
            return;
        }

        match command {
            Command::Save => {
                let result = self.canvas.document_mut().save(&mut self.dialogs);
                self.report(result);
            }
            Command::SaveAs => {
                let result = self.canvas.document_mut().save_as(&mut self.dialogs);
                self.report(result);
            }
            Command::SelectTool(selection) => self.canvas.select_tool(selection, &mut self.status),
            Command::PickColor => self.color_picker = Some(self.canvas.tool().color),
            Command::New | Command::Open | Command::Exit => {}
        }
    }

    fn answer_prompt(&mut self, ctx: &egui::Context, action: PendingAction, answer: PromptAnswer) {
        let outcome = self
            .canvas
            .document_mut()
            .answer(action, answer, &mut self.dialogs);
        self.handle_outcome(ctx, outcome);
    }

    fn handle_outcome(&mut self, ctx: &egui::Context, outcome: FileResult<Outcome>) {
        match outcome {
            Ok(Outcome::NeedsPrompt(action)) => self.pending_prompt = Some(action),
            Ok(Outcome::Completed(PendingAction::Exit)) => {
                self.closing = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            Ok(Outcome::Completed(_)) => self.canvas.cancel_stroke(),
            Ok(Outcome::Aborted) => log::debug!("File action aborted"),
            Err(err) => self.report::<()>(Err(err)),
        }
    }

    fn report<T>(&mut self, result: FileResult<T>) {
        match result {
            Ok(_) => {}
            Err(err) if err.is_cancelled() => log::debug!("{err}"),
            Err(err) => {
                log::error!("{err}");
                self.error_message = Some(err.to_string());
            }
        }
    }

    fn show_modals(&mut self, ctx: &egui::Context) {
        if let Some(message) = &self.error_message {
            if error_window(ctx, message) {
                self.error_message = None;
            }
            return;
        }

        if let Some(action) = self.pending_prompt {
            let allow_cancel = self.settings.prompt_policy.allows_cancel();
            if let Some(answer) = save_prompt_window(ctx, action, allow_cancel) {
                self.pending_prompt = None;
                self.answer_prompt(ctx, action, answer);
            }
            return;
        }

        if let Some(working) = &mut self.color_picker {
            match color_picker_window(ctx, working) {
                Some(ColorChoice::Confirmed(color)) => {
                    self.color_picker = None;
                    self.canvas.set_color(color, &mut self.status);
                }
                Some(ColorChoice::Cancelled) => self.color_picker = None,
                None => {}
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        for (shortcut, command) in Command::with_shortcuts() {
            if ctx.input_mut(|i| i.consume_shortcut(&shortcut)) {
                self.execute_command(ctx, command);
            }
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.tool = *self.canvas.tool();
        self.settings.last_directory = self.dialogs.last_directory().map(|p| p.to_path_buf());
        self.settings.store(storage);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) && !self.closing {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            if !self.modal_open() {
                self.execute_command(ctx, Command::Exit);
            }
        }

        let menu_command = menu_bar(ctx, self.canvas.tool());
        if !self.modal_open() {
            self.handle_shortcuts(ctx);
            if let Some(command) = menu_command {
                self.execute_command(ctx, command);
            }
        }

        let interactive = !self.modal_open();
        status_bar(ctx, &self.status);
        central_panel(ctx, &mut self.canvas, &mut self.view, &mut self.status, interactive);

        self.show_modals(ctx);
    }
}
