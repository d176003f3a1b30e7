//! Chat log source for the reminder.
//!
//! Parses exported chat log lines into chat events and tails the log file
//! for new messages.

pub mod parser;
pub mod tailer;
pub mod watcher;
