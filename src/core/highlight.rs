// Highlight filter for the other slayer masters while a Konar reminder is active.
//
// The candidate list comes from configuration. The set is rebuilt from the full
// NPC roster on every chat evaluation and config change; spawn/despawn events
// patch it between rebuilds.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::model::{Npc, Rgba};
use super::wildcard::WildcardPattern;

pub const DEFAULT_SLAYER_MASTERS: &str =
    "Turael,Aya,Spria,Krystilia,Mazchna,Achtryn,Vannaka,Chaeldar,Nieve,Steve,Duradel,Kuradal";

/// How a highlighted NPC should be drawn. Rendering belongs to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightStyle {
    pub highlight_color: Rgba,
    pub fill_color: Rgba,
    pub hull: bool,
    pub tile: bool,
    pub outline: bool,
    pub border_width: f64,
    pub outline_feather: u8,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            highlight_color: Rgba::RED,
            fill_color: Rgba::rgba(0, 255, 255, 20),
            hull: false,
            tile: false,
            outline: true,
            border_width: 2.0,
            outline_feather: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightedNpc {
    pub npc: Npc,
    pub style: HighlightStyle,
}

/// Highlighted NPCs keyed by id.
pub type HighlightSet = BTreeMap<u32, HighlightedNpc>;

/// Split a comma-separated pattern list, dropping blank entries.
pub fn parse_pattern_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn compile_patterns(patterns: &[String]) -> Result<Vec<WildcardPattern>, ConfigError> {
    patterns.iter().map(|p| WildcardPattern::new(p)).collect()
}

#[derive(Debug, Clone)]
pub struct HighlightOptions {
    pub patterns: Vec<String>,
    /// Highlight other masters at all
    pub enabled: bool,
    /// Hide other masters instead of only highlighting them
    pub hide_others: bool,
    pub style: HighlightStyle,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            patterns: parse_pattern_list(DEFAULT_SLAYER_MASTERS),
            enabled: true,
            hide_others: false,
            style: HighlightStyle::default(),
        }
    }
}

pub struct HighlightFilter {
    patterns: Vec<WildcardPattern>,
    enabled: bool,
    hide_others: bool,
    style: HighlightStyle,
    highlighted: HighlightSet,
}

impl HighlightFilter {
    pub fn new(options: HighlightOptions) -> Result<Self, ConfigError> {
        let mut filter = Self {
            patterns: Vec::new(),
            enabled: false,
            hide_others: false,
            style: HighlightStyle::default(),
            highlighted: HighlightSet::new(),
        };
        filter.update_options(options)?;
        Ok(filter)
    }

    /// Swap in new options. Call `rebuild` afterwards to refresh the set.
    /// On a bad pattern the current options are left untouched.
    pub fn update_options(&mut self, options: HighlightOptions) -> Result<(), ConfigError> {
        self.patterns = compile_patterns(&options.patterns)?;
        self.enabled = options.enabled;
        self.hide_others = options.hide_others;
        self.style = options.style;
        Ok(())
    }

    /// True if `name` matches any candidate pattern.
    pub fn matches_name(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    fn is_candidate(&self, npc: &Npc) -> bool {
        npc.name.as_deref().is_some_and(|name| self.matches_name(name))
    }

    /// Recompute the set from scratch.
    pub fn rebuild(&mut self, roster: &[Npc], reminder_active: bool) -> &HighlightSet {
        let rebuilt: HighlightSet = if self.enabled && reminder_active {
            roster
                .iter()
                .filter(|npc| self.is_candidate(npc))
                .map(|npc| {
                    (
                        npc.id,
                        HighlightedNpc {
                            npc: npc.clone(),
                            style: self.style.clone(),
                        },
                    )
                })
                .collect()
        } else {
            HighlightSet::new()
        };
        self.highlighted = rebuilt;

        debug!("Rebuilt highlights: {} NPC(s)", self.highlighted.len());
        &self.highlighted
    }

    pub fn npc_spawned(&mut self, npc: &Npc, reminder_active: bool) {
        if self.enabled && reminder_active && self.is_candidate(npc) {
            debug!("Highlighting spawned NPC {:?} ({})", npc.name, npc.id);
            self.highlighted.insert(
                npc.id,
                HighlightedNpc {
                    npc: npc.clone(),
                    style: self.style.clone(),
                },
            );
        }
    }

    pub fn npc_despawned(&mut self, npc_id: u32) {
        self.highlighted.remove(&npc_id);
    }

    /// Drop all highlights (logout, world hop).
    pub fn reset(&mut self) {
        self.highlighted.clear();
    }

    pub fn highlights(&self) -> &HighlightSet {
        &self.highlighted
    }

    /// False when a candidate NPC should be hidden while the reminder is active.
    pub fn should_draw(&self, npc_name: &str, reminder_active: bool) -> bool {
        !(reminder_active && self.hide_others && self.matches_name(npc_name))
    }
}
