// Milestone evaluation: decides whether the next task completes a milestone.
//
// The streak message arrives before the next task is assigned, so the reminder
// fires one task early: streak 49 with multiple 50 means task 50 is next.

use std::num::NonZeroU32;

use log::info;

use super::error::ConfigError;
use super::model::Rgba;

pub const DEFAULT_MULTIPLE: u32 = 50;
pub const DEFAULT_MULTIPLE_NZ: NonZeroU32 = match NonZeroU32::new(DEFAULT_MULTIPLE) {
    Some(multiple) => multiple,
    None => panic!("default multiple must be non-zero"),
};
pub const DEFAULT_REMINDER_MSG: &str =
    "You should visit Konar to get bonus points for your next task.";
pub const DEFAULT_CHAT_COLOR: Rgba = Rgba::rgb(0x11, 0x97, 0x9b);

/// True when completing one more task after `streak` lands on a multiple of `multiple`.
pub fn lands_on_milestone(streak: u32, multiple: NonZeroU32) -> bool {
    (u64::from(streak) + 1) % u64::from(multiple.get()) == 0
}

/// Wrap `text` in a chat color tag.
pub fn wrap_with_color_tag(text: &str, color: Rgba) -> String {
    format!("<col={}>{}</col>", color.to_hex_rgb(), text)
}

/// Validated milestone settings. A zero multiple cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneConfig {
    pub multiple: NonZeroU32,
    pub reminder_template: String,
    pub color: Rgba,
}

impl MilestoneConfig {
    pub fn new(multiple: u32, reminder_template: &str, color: Rgba) -> Result<Self, ConfigError> {
        let multiple = NonZeroU32::new(multiple).ok_or(ConfigError::InvalidMultiple)?;
        Ok(Self {
            multiple,
            reminder_template: reminder_template.to_string(),
            color,
        })
    }

    /// The reminder chat line, falling back to the default text for a blank template.
    pub fn reminder_message(&self) -> String {
        let text = if self.reminder_template.trim().is_empty() {
            DEFAULT_REMINDER_MSG
        } else {
            self.reminder_template.as_str()
        };
        wrap_with_color_tag(text, self.color)
    }
}

impl Default for MilestoneConfig {
    fn default() -> Self {
        Self {
            multiple: DEFAULT_MULTIPLE_NZ,
            reminder_template: DEFAULT_REMINDER_MSG.to_string(),
            color: DEFAULT_CHAT_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderState {
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Show this formatted reminder
    Remind(String),
    Quiet,
}

pub struct MilestoneEvaluator {
    config: MilestoneConfig,
    state: ReminderState,
}

impl MilestoneEvaluator {
    pub fn new(config: MilestoneConfig) -> Self {
        Self::with_state(config, ReminderState::default())
    }

    /// Resume with a previously persisted reminder flag.
    pub fn with_state(config: MilestoneConfig, state: ReminderState) -> Self {
        Self { config, state }
    }

    pub fn update_config(&mut self, config: MilestoneConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &MilestoneConfig {
        &self.config
    }

    pub fn state(&self) -> ReminderState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Evaluate a freshly reported streak and update the reminder flag.
    pub fn evaluate(&mut self, streak: u32) -> Decision {
        self.state.active = lands_on_milestone(streak, self.config.multiple);

        if self.state.active {
            info!(
                "Streak {} -> next task is a multiple of {}, reminder active",
                streak, self.config.multiple
            );
            Decision::Remind(self.config.reminder_message())
        } else {
            Decision::Quiet
        }
    }
}
