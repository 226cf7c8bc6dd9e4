mod central_panel;
mod dialogs;
mod menu_bar;
mod status_bar;

pub use central_panel::{CanvasView, central_panel};
pub use dialogs::{ColorChoice, color_picker_window, error_window, save_prompt_window};
pub use menu_bar::menu_bar;
pub use status_bar::{StatusBar, status_bar};
