use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::ConfigError;

pub type NpcName = String;

/// Chat channel a message arrived on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChatMessageType {
    #[default]
    GameMessage,
    Public,
    Private,
    Clan,
    Other(String),
}

impl ChatMessageType {
    /// True for the tags `from_tag` maps to a named channel.
    pub fn is_known_tag(tag: &str) -> bool {
        matches!(tag, "GAMEMESSAGE" | "PUBLICCHAT" | "PRIVATECHAT" | "CLANCHAT")
    }

    /// Map a chat log type tag ("GAMEMESSAGE", "PUBLICCHAT", ...) to a message type.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "GAMEMESSAGE" => Self::GameMessage,
            "PUBLICCHAT" => Self::Public,
            "PRIVATECHAT" => Self::Private,
            "CLANCHAT" => Self::Clan,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatEvent {
    pub text: String,
    pub message_type: ChatMessageType,
    /// Wall-clock time from the log line, when there was one
    pub timestamp: Option<NaiveTime>,
}

impl ChatEvent {
    pub fn game_message(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            message_type: ChatMessageType::GameMessage,
            timestamp: None,
        }
    }

    pub fn is_game_message(&self) -> bool {
        self.message_type == ChatMessageType::GameMessage
    }
}

/// An NPC currently visible to the host client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Npc {
    pub id: u32,
    pub name: Option<NpcName>,
}

impl Npc {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
        }
    }
}

/// RGBA color. Serialized as `#RRGGBB` or `#AARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Lowercase `rrggbb` as used inside chat color tags.
    pub fn to_hex_rgb(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgba {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        let [a, r, g, b] = value.to_be_bytes();
        match hex.len() {
            6 => Ok(Self::rgb(r, g, b)),
            8 => Ok(Self::rgba(r, g, b, a)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb_and_argb() {
        assert_eq!("#11979B".parse::<Rgba>().unwrap(), Rgba::rgb(0x11, 0x97, 0x9b));
        assert_eq!(
            "#1400FFFF".parse::<Rgba>().unwrap(),
            Rgba::rgba(0, 255, 255, 20)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("11979B".parse::<Rgba>().is_err());
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("#+1234567".parse::<Rgba>().is_err());
        assert!("#GGGGGG".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_display_roundtrips_through_json() {
        let fill = Rgba::rgba(0, 255, 255, 20);
        let json = serde_json::to_string(&fill).unwrap();
        assert_eq!(json, "\"#1400FFFF\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fill);
    }

    #[test]
    fn test_chat_tag_hex_is_lowercase_without_alpha() {
        assert_eq!(Rgba::rgb(0x11, 0x97, 0x9b).to_hex_rgb(), "11979b");
    }

    #[test]
    fn test_message_type_tags() {
        assert_eq!(ChatMessageType::from_tag("GAMEMESSAGE"), ChatMessageType::GameMessage);
        assert_eq!(ChatMessageType::from_tag("CLANCHAT"), ChatMessageType::Clan);
        assert_eq!(
            ChatMessageType::from_tag("TRADE"),
            ChatMessageType::Other("TRADE".to_string())
        );
        assert!(ChatMessageType::is_known_tag("PUBLICCHAT"));
        assert!(!ChatMessageType::is_known_tag("NOTE"));
    }
}
