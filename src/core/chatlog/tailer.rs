use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Follows a growing text file, handing out complete lines only.
pub struct LogTailer {
    file: File,
    position: u64,
    path: PathBuf,
}

impl LogTailer {
    /// Open positioned at the current end of the file.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref)?;
        let position = file.metadata()?.len();
        Ok(Self {
            file,
            position,
            path: path_ref.to_path_buf(),
        })
    }

    /// Open positioned at the start of the file.
    pub fn open_from_start(path: impl AsRef<Path>) -> io::Result<Self> {
        let mut tailer = Self::open(path)?;
        tailer.rewind()?;
        Ok(tailer)
    }

    pub fn read_new_lines(&mut self) -> io::Result<Vec<String>> {
        let mut lines = Vec::new();

        // Truncated or replaced underneath us: start over
        if self.file.metadata()?.len() < self.position {
            self.position = 0;
        }

        self.file.seek(SeekFrom::Start(self.position))?;
        let mut reader = BufReader::new(&self.file);
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            let bytes_read = reader.read_until(b'\n', &mut buffer)?;
            // A line without its newline is still being written
            if bytes_read == 0 || buffer.last() != Some(&b'\n') {
                break;
            }
            self.position += bytes_read as u64;
            // Invalid UTF-8 is replaced, never allowed to stall the tail
            let line = String::from_utf8_lossy(&buffer)
                .trim_end_matches(&['\r', '\n'][..])
                .to_string();
            lines.push(line);
        }

        Ok(lines)
    }

    pub fn rewind(&mut self) -> io::Result<()> {
        self.position = 0;
        self.file.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
