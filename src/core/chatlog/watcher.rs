//! Watches a chat log file and turns new lines into chat events.

use std::io;
use std::path::Path;

use super::parser::ChatlogParser;
use super::tailer::LogTailer;
use crate::core::model::ChatEvent;

pub struct ChatlogWatcher {
    tailer: LogTailer,
    parser: ChatlogParser,
}

impl ChatlogWatcher {
    /// Watch only lines written from now on.
    pub fn new(path: &Path) -> io::Result<Self> {
        Ok(Self {
            tailer: LogTailer::open(path)?,
            parser: ChatlogParser::new(),
        })
    }

    /// Watch the whole file, including what is already in it.
    pub fn from_start(path: &Path) -> io::Result<Self> {
        Ok(Self {
            tailer: LogTailer::open_from_start(path)?,
            parser: ChatlogParser::new(),
        })
    }

    /// Poll for chat events written since the last call.
    pub fn read_events(&mut self) -> io::Result<Vec<ChatEvent>> {
        let lines = self.tailer.read_new_lines()?;
        Ok(self.parser.parse_lines(&lines))
    }

    pub fn path(&self) -> &Path {
        self.tailer.path()
    }
}
