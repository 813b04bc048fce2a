//! Line reader over a file that is still being written.

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Yields complete lines only; a trailing partial line stays buffered until
/// its newline is written.
#[derive(Debug)]
pub struct LineReader {
    reader: BufReader<File>,
    pending: Vec<u8>,
}

impl LineReader {
    pub fn new(file: File) -> Self {
        Self {
            reader: BufReader::new(file),
            pending: Vec::new(),
        }
    }

    /// Next complete line without its terminator, or `None` at the current end
    /// of the file.
    ///
    /// Invalid UTF-8 is replaced rather than treated as an I/O failure.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let read = self.reader.read_until(b'\n', &mut self.pending).await?;
        if read == 0 || self.pending.last() != Some(&b'\n') {
            return Ok(None);
        }

        let mut end = self.pending.len() - 1;
        if end > 0 && self.pending[end - 1] == b'\r' {
            end -= 1;
        }
        let line = String::from_utf8_lossy(&self.pending[..end]).into_owned();
        self.pending.clear();
        Ok(Some(line))
    }

    /// Bytes of an incomplete line waiting for their newline.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
