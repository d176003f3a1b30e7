//! Parser for chat log lines.
//!
//! Format: `[HH:MM:SS] TYPE: message`. The timestamp is optional. Without a
//! timestamp only the known type tags are split off, so a game message that
//! opens with a capitalised word ("NOTE: ...") stays whole. A line without a
//! type tag is taken as a game message.

use chrono::NaiveTime;
use regex::Regex;

use crate::core::model::{ChatEvent, ChatMessageType};

pub struct ChatlogParser {
    line_regex: Regex,
    tag_regex: Regex,
}

impl ChatlogParser {
    pub fn new() -> Self {
        // Pattern: [12:34:56] GAMEMESSAGE: You've completed 49 tasks ...
        let line_regex = Regex::new(r"^(?:\[\s*(\d{1,2}:\d{2}:\d{2})\s*\]\s*)?(.*)$")
            .expect("Invalid chat line regex");
        let tag_regex =
            Regex::new(r"^([A-Z][A-Z_]*):(?:\s+|$)(.*)$").expect("Invalid chat tag regex");

        Self {
            line_regex,
            tag_regex,
        }
    }

    /// Parse a single line into a chat event. Blank lines yield `None`.
    pub fn parse_line(&self, line: &str) -> Option<ChatEvent> {
        // Strip BOM and trim whitespace
        let line = line.trim_start_matches('\u{feff}').trim();
        if line.is_empty() {
            return None;
        }
        let caps = self.line_regex.captures(line)?;

        let stamp = caps.get(1);
        let timestamp =
            stamp.and_then(|m| NaiveTime::parse_from_str(m.as_str(), "%H:%M:%S").ok());
        let rest = caps.get(2)?.as_str();

        let (message_type, text) = match self.tag_regex.captures(rest) {
            Some(tagged)
                if stamp.is_some() || ChatMessageType::is_known_tag(&tagged[1]) =>
            {
                (ChatMessageType::from_tag(&tagged[1]), tagged.get(2)?.as_str())
            }
            _ => (ChatMessageType::GameMessage, rest),
        };

        let text = text.trim().to_string();
        if text.is_empty() {
            return None;
        }

        Some(ChatEvent {
            text,
            message_type,
            timestamp,
        })
    }

    pub fn parse_lines(&self, lines: &[String]) -> Vec<ChatEvent> {
        lines.iter().filter_map(|line| self.parse_line(line)).collect()
    }
}

impl Default for ChatlogParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_line() {
        let parser = ChatlogParser::new();

        let event = parser
            .parse_line("[11:26:33] GAMEMESSAGE: You've completed 49 tasks in a row.")
            .expect("Should parse");
        assert_eq!(event.text, "You've completed 49 tasks in a row.");
        assert!(event.is_game_message());
        assert_eq!(event.timestamp, NaiveTime::from_hms_opt(11, 26, 33));
    }

    #[test]
    fn test_parse_public_chat() {
        let parser = ChatlogParser::new();

        let event = parser.parse_line("[09:00:01] PUBLICCHAT: Zezima: 49 tasks").unwrap();
        assert_eq!(event.message_type, ChatMessageType::Public);
        assert_eq!(event.text, "Zezima: 49 tasks");
    }

    #[test]
    fn test_untagged_line_is_game_message() {
        let parser = ChatlogParser::new();

        let event = parser.parse_line("Well done.").unwrap();
        assert!(event.is_game_message());
        assert_eq!(event.timestamp, None);
        assert_eq!(event.text, "Well done.");
    }

    #[test]
    fn test_capitalised_prefix_without_timestamp_stays_in_text() {
        let parser = ChatlogParser::new();

        let event = parser.parse_line("NOTE: You've completed 49 tasks").unwrap();
        assert!(event.is_game_message());
        assert_eq!(event.text, "NOTE: You've completed 49 tasks");

        let tagged = parser.parse_line("GAMEMESSAGE: You've completed 49 tasks").unwrap();
        assert!(tagged.is_game_message());
        assert_eq!(tagged.text, "You've completed 49 tasks");
    }

    #[test]
    fn test_unknown_tag_after_timestamp_is_typed() {
        let parser = ChatlogParser::new();

        let event = parser.parse_line("[12:00:00] TRADE: 49 tasks").unwrap();
        assert_eq!(event.message_type, ChatMessageType::Other("TRADE".to_string()));
        assert_eq!(event.text, "49 tasks");
    }

    #[test]
    fn test_parse_with_bom() {
        let parser = ChatlogParser::new();

        let line = "\u{feff}[11:26:33] GAMEMESSAGE: 49 tasks";
        let event = parser.parse_line(line).expect("Should parse with BOM");
        assert_eq!(event.text, "49 tasks");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let parser = ChatlogParser::new();

        assert!(parser.parse_line("").is_none());
        assert!(parser.parse_line("   ").is_none());
        assert!(parser.parse_line("[11:26:33] GAMEMESSAGE: ").is_none());
    }

    #[test]
    fn test_parse_lines() {
        let parser = ChatlogParser::new();
        let lines: Vec<String> = vec![
            "[11:26:33] GAMEMESSAGE: You've completed 48 tasks",
            "",
            "[11:40:02] CLANCHAT: gz",
            "You've completed 49 tasks",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let events = parser.parse_lines(&lines);
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].message_type, ChatMessageType::Clan);
    }
}
