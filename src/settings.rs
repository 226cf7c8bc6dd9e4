use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::document::PromptPolicy;
use crate::tools::ToolConfig;

/// User preferences restored between runs through eframe storage
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Settings {
    pub prompt_policy: PromptPolicy,
    /// Tool, sizes and color in use when the app was closed
    pub tool: ToolConfig,
    /// Directory the file dialogs start in
    pub last_directory: Option<PathBuf>,
}

impl Settings {
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|storage| eframe::get_value::<Settings>(storage, eframe::APP_KEY))
            .map(|settings| Self {
                tool: settings.tool.sanitized(),
                ..settings
            })
            .unwrap_or_default()
    }

    pub fn store(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolKind;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "prompt_policy": "Legacy" }"#).unwrap();
        assert_eq!(settings.prompt_policy, PromptPolicy::Legacy);
        assert_eq!(settings.tool, ToolConfig::default());
        assert_eq!(settings.last_directory, None);
    }

    #[test]
    fn test_partial_tool_config() {
        let settings: Settings =
            serde_json::from_str(r#"{ "tool": { "tool": "Spray", "stroke_width": 6 } }"#).unwrap();
        assert_eq!(settings.tool.tool, ToolKind::Spray);
        assert_eq!(settings.tool.stroke_width, 6);
        assert_eq!(settings.tool.eraser_size, 4);
    }

    #[test]
    fn test_load_without_storage() {
        assert_eq!(Settings::load(None), Settings::default());
    }
}
