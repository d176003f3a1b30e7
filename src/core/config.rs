use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::highlight::{
    compile_patterns, parse_pattern_list, HighlightOptions, HighlightStyle, DEFAULT_SLAYER_MASTERS,
};
use super::milestone::{MilestoneConfig, DEFAULT_CHAT_COLOR, DEFAULT_MULTIPLE, DEFAULT_REMINDER_MSG};
use super::model::Rgba;

pub const MAX_OUTLINE_FEATHER: u8 = 4;

/// Reminder settings, loaded from `settings.json`.
/// Every field has a default so partial files load.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Remind before every task that is a multiple of this
    pub multiple: u32,
    pub chat_message_color: Rgba,
    /// Reminder text; blank means the built-in message
    pub chat_message_text: String,
    /// Comma-separated wildcard patterns of NPCs to highlight
    pub npcs_to_highlight: String,
    pub other_highlight: bool,
    pub hide_other_masters: bool,
    pub highlight_hull: bool,
    pub highlight_tile: bool,
    pub highlight_outline: bool,
    pub highlight_color: Rgba,
    pub fill_color: Rgba,
    pub border_width: f64,
    pub outline_feather: u8,
}

impl Default for Settings {
    fn default() -> Self {
        let style = HighlightStyle::default();
        Self {
            multiple: DEFAULT_MULTIPLE,
            chat_message_color: DEFAULT_CHAT_COLOR,
            chat_message_text: DEFAULT_REMINDER_MSG.to_string(),
            npcs_to_highlight: DEFAULT_SLAYER_MASTERS.to_string(),
            other_highlight: true,
            hide_other_masters: false,
            highlight_hull: style.hull,
            highlight_tile: style.tile,
            highlight_outline: style.outline,
            highlight_color: style.highlight_color,
            fill_color: style.fill_color,
            border_width: style.border_width,
            outline_feather: style.outline_feather,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.multiple == 0 {
            return Err(ConfigError::InvalidMultiple);
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(ConfigError::InvalidBorderWidth(self.border_width));
        }
        if self.outline_feather > MAX_OUTLINE_FEATHER {
            return Err(ConfigError::InvalidOutlineFeather(self.outline_feather));
        }
        compile_patterns(&parse_pattern_list(&self.npcs_to_highlight))?;
        Ok(())
    }

    pub fn milestone_config(&self) -> Result<MilestoneConfig, ConfigError> {
        MilestoneConfig::new(self.multiple, &self.chat_message_text, self.chat_message_color)
    }

    pub fn highlight_options(&self) -> HighlightOptions {
        HighlightOptions {
            patterns: parse_pattern_list(&self.npcs_to_highlight),
            enabled: self.other_highlight,
            hide_others: self.hide_other_masters,
            style: HighlightStyle {
                highlight_color: self.highlight_color,
                fill_color: self.fill_color,
                hull: self.highlight_hull,
                tile: self.highlight_tile,
                outline: self.highlight_outline,
                border_width: self.border_width,
                outline_feather: self.outline_feather,
            },
        }
    }

    /// Parse and validate settings from JSON text.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(app_config_dir: PathBuf) -> Self {
        Self {
            config_path: app_config_dir.join("settings.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load settings, falling back to defaults when no file exists.
    /// A present but malformed or invalid file is an error, never silently replaced.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        if !self.config_path.exists() {
            info!(
                "No settings at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.config_path)?;
        Settings::from_json(&content).map_err(|e| {
            warn!("Rejected settings {}: {}", self.config_path.display(), e);
            e
        })
    }
}
