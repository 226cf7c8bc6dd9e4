use egui::Color32;
use serde::{Deserialize, Serialize};

pub mod spray;

/// The drawing tools offered by the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Pencil,
    Brush,
    Spray,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [Self::Pencil, Self::Brush, Self::Spray, Self::Eraser];

    /// Name shown in menus and the status bar
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pencil => "Pencil",
            Self::Brush => "Brush",
            Self::Spray => "Spray Paint",
            Self::Eraser => "Eraser",
        }
    }

    /// Pixels per size index step
    pub fn size_multiplier(&self) -> u32 {
        match self {
            Self::Eraser => 4,
            Self::Pencil | Self::Brush | Self::Spray => 2,
        }
    }

    /// Size indices listed in the tool's menu
    pub fn size_presets(&self) -> &'static [u32] {
        match self {
            Self::Pencil | Self::Spray => &[1, 2, 3, 4],
            Self::Brush => &[2, 4, 6, 8],
            Self::Eraser => &[4, 6, 8, 10],
        }
    }

    /// Width in pixels for a size index. Index 0 is treated as 1.
    pub fn width_for(&self, size_index: u32) -> u32 {
        self.size_multiplier().saturating_mul(size_index.max(1))
    }
}

/// A request to switch tool and size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSelection {
    pub tool: ToolKind,
    pub size_index: u32,
}

impl ToolSelection {
    pub fn new(tool: ToolKind, size_index: u32) -> Self {
        Self { tool, size_index }
    }

    /// Menu label such as "Brush 12px"
    pub fn label(&self) -> String {
        let name = match self.tool {
            ToolKind::Spray => "Spray",
            other => other.label(),
        };
        format!("{} {}px", name, self.tool.width_for(self.size_index))
    }
}

/// Active tool settings read by the renderer on every segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub tool: ToolKind,
    /// Line width for Pencil and Brush, scatter width for Spray
    pub stroke_width: u32,
    /// Side of the square cleared by the eraser
    pub eraser_size: u32,
    pub color: Color32,
    pub eraser_active: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pencil,
            stroke_width: 2,
            eraser_size: 4,
            color: Color32::BLACK,
            eraser_active: false,
        }
    }
}

impl ToolConfig {
    pub fn select_tool(&mut self, selection: ToolSelection) {
        let width = selection.tool.width_for(selection.size_index);
        self.tool = selection.tool;
        match selection.tool {
            ToolKind::Eraser => {
                self.eraser_active = true;
                self.eraser_size = width;
            }
            ToolKind::Pencil | ToolKind::Brush | ToolKind::Spray => {
                self.eraser_active = false;
                self.stroke_width = width;
            }
        }
        log::info!("Tool selected: {} ({}px)", self.tool.label(), width);
    }

    /// Set the paint color and leave eraser mode. Sizes are kept; an eraser
    /// selection falls back to the pencil.
    pub fn set_color(&mut self, color: Color32) {
        self.color = Color32::from_rgb(color.r(), color.g(), color.b());
        self.eraser_active = false;
        if self.tool == ToolKind::Eraser {
            self.tool = ToolKind::Pencil;
        }
    }

    /// Size that applies to the current tool
    pub fn active_size(&self) -> u32 {
        if self.eraser_active {
            self.eraser_size
        } else {
            self.stroke_width
        }
    }

    /// Clamp widths to at least one pixel, e.g. after restoring stale settings
    pub fn sanitized(mut self) -> Self {
        self.stroke_width = self.stroke_width.max(1);
        self.eraser_size = self.eraser_size.max(1);
        self.eraser_active = self.tool == ToolKind::Eraser || self.eraser_active;
        self
    }

    pub fn status_text(&self) -> String {
        format!(
            "Tool: {}, Size: {}px, Color: ({}, {}, {})",
            self.tool.label(),
            self.active_size(),
            self.color.r(),
            self.color.g(),
            self.color.b()
        )
    }
}
