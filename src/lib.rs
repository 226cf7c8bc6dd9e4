#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod document;
pub mod error;
pub mod file_handler;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod settings;
pub mod stroke;
pub mod surface;
pub mod tools;

pub use app::PaintApp;
pub use canvas::{Canvas, Repaint, UiUpdatePort};
pub use command::Command;
pub use document::{Document, Outcome, PendingAction, PromptAnswer, PromptPolicy};
pub use error::{FileError, FileResult};
pub use file_handler::FileDialogs;
pub use renderer::StrokeRenderer;
pub use settings::Settings;
pub use stroke::StrokeState;
pub use surface::{PixelPos, PixelRect, Surface};
pub use tools::{ToolConfig, ToolKind, ToolSelection};
