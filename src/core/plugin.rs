use log::{debug, info, warn};

use super::config::Settings;
use super::error::ConfigError;
use super::highlight::{HighlightFilter, HighlightSet};
use super::milestone::{Decision, MilestoneEvaluator, ReminderState};
use super::model::{ChatEvent, Npc};
use super::streak::StreakExtractor;

/// What the host should do after an event.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PluginOutput {
    /// Formatted chat line to show
    pub reminder: Option<String>,
    /// Replacement highlight set, if it was rebuilt
    pub highlights: Option<HighlightSet>,
}

/// Chat handler tying streak extraction, milestone evaluation and highlighting together.
pub struct ReminderPlugin {
    settings: Settings,
    extractor: StreakExtractor,
    evaluator: MilestoneEvaluator,
    filter: HighlightFilter,
}

impl ReminderPlugin {
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        Self::with_state(settings, false)
    }

    /// Start with a reminder flag persisted by the host.
    pub fn with_state(settings: Settings, reminder_active: bool) -> Result<Self, ConfigError> {
        settings.validate()?;
        let evaluator = MilestoneEvaluator::with_state(
            settings.milestone_config()?,
            ReminderState {
                active: reminder_active,
            },
        );
        let filter = HighlightFilter::new(settings.highlight_options())?;

        Ok(Self {
            settings,
            extractor: StreakExtractor::new(),
            evaluator,
            filter,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn reminder_active(&self) -> bool {
        self.evaluator.is_active()
    }

    pub fn highlights(&self) -> &HighlightSet {
        self.filter.highlights()
    }

    pub fn on_chat_message(&mut self, event: &ChatEvent, roster: &[Npc]) -> PluginOutput {
        if !event.is_game_message() {
            return PluginOutput::default();
        }

        let streak = match self.extractor.extract(&event.text) {
            Ok(streak) => streak,
            Err(e) => {
                debug!("Ignoring message {:?}: {}", event.text, e);
                return PluginOutput::default();
            }
        };

        let reminder = match self.evaluator.evaluate(streak) {
            Decision::Remind(message) => Some(message),
            Decision::Quiet => None,
        };
        let highlights = self
            .filter
            .rebuild(roster, self.evaluator.is_active())
            .clone();

        PluginOutput {
            reminder,
            highlights: Some(highlights),
        }
    }

    /// Apply new settings and rebuild highlights. Invalid settings are rejected
    /// and the previous configuration stays in force.
    pub fn on_config_changed(
        &mut self,
        settings: Settings,
        roster: &[Npc],
    ) -> Result<PluginOutput, ConfigError> {
        if let Err(e) = settings.validate() {
            warn!("Keeping previous settings: {}", e);
            return Err(e);
        }

        let milestone = settings.milestone_config()?;
        self.filter.update_options(settings.highlight_options())?;
        self.evaluator.update_config(milestone);
        self.settings = settings;
        info!("Settings updated, multiple = {}", self.settings.multiple);

        Ok(self.rebuild(roster))
    }

    /// Rebuild highlights from the NPCs already present, e.g. on startup with a
    /// restored reminder flag.
    pub fn rebuild(&mut self, roster: &[Npc]) -> PluginOutput {
        let highlights = self
            .filter
            .rebuild(roster, self.evaluator.is_active())
            .clone();
        PluginOutput {
            reminder: None,
            highlights: Some(highlights),
        }
    }

    pub fn on_npc_spawned(&mut self, npc: &Npc) {
        self.filter.npc_spawned(npc, self.evaluator.is_active());
    }

    pub fn on_npc_despawned(&mut self, npc_id: u32) {
        self.filter.npc_despawned(npc_id);
    }

    /// An NPC transformed; its old highlight no longer applies.
    pub fn on_npc_changed(&mut self, npc_id: u32) {
        self.filter.npc_despawned(npc_id);
    }

    /// Logout or world hop.
    pub fn on_logout(&mut self) {
        self.filter.reset();
    }

    pub fn should_draw(&self, npc_name: &str) -> bool {
        self.filter.should_draw(npc_name, self.evaluator.is_active())
    }
}
