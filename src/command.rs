use egui::{Key, KeyboardShortcut, Modifiers};

use crate::document::PendingAction;
use crate::tools::{ToolKind, ToolSelection};

/// Everything the menu bar and keyboard can ask the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Exit,
    SelectTool(ToolSelection),
    PickColor,
}

pub const NEW_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::N);
pub const OPEN_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
pub const SAVE_AS_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);

impl Command {
    pub const FILE_MENU: [Command; 4] = [Self::New, Self::Open, Self::Save, Self::SaveAs];

    pub fn label(&self) -> String {
        match self {
            Self::New => "New".to_owned(),
            Self::Open => "Open".to_owned(),
            Self::Save => "Save".to_owned(),
            Self::SaveAs => "Save As".to_owned(),
            Self::Exit => "Exit".to_owned(),
            Self::SelectTool(selection) => selection.label(),
            Self::PickColor => "Colors".to_owned(),
        }
    }

    pub fn shortcut(&self) -> Option<KeyboardShortcut> {
        match self {
            Self::New => Some(NEW_SHORTCUT),
            Self::Open => Some(OPEN_SHORTCUT),
            Self::SaveAs => Some(SAVE_AS_SHORTCUT),
            _ => None,
        }
    }

    /// File commands that may discard the drawing
    pub fn pending_action(&self) -> Option<PendingAction> {
        match self {
            Self::New => Some(PendingAction::New),
            Self::Open => Some(PendingAction::Open),
            Self::Exit => Some(PendingAction::Exit),
            _ => None,
        }
    }

    /// The size entries listed under a tool menu
    pub fn tool_menu(tool: ToolKind) -> impl Iterator<Item = Command> {
        tool.size_presets()
            .iter()
            .map(move |&n| Self::SelectTool(ToolSelection::new(tool, n)))
    }

    /// Commands bound to a keyboard shortcut
    pub fn with_shortcuts() -> impl Iterator<Item = (KeyboardShortcut, Command)> {
        [Self::New, Self::Open, Self::SaveAs]
            .into_iter()
            .filter_map(|cmd| cmd.shortcut().map(|shortcut| (shortcut, cmd)))
    }
}
