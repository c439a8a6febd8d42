//! Line assembly from a live output channel.
//!
//! `LineReader` pulls one byte per `read` call so that a line is handed out as
//! soon as its terminator arrives, even when the tool keeps its pipe open and
//! writes progress with carriage returns.

use std::io::{self, Read};
use std::iter::FusedIterator;

/// Pull-based iterator over the lines of a byte stream.
///
/// `\n`, `\r\n` and `\r` all terminate a line and are stripped. Once the
/// stream is exhausted (or a read fails) the reader is finished and only
/// returns `None`.
pub struct LineReader<R> {
    reader: R,
    line: Vec<u8>,
    after_cr: bool,
    finished: bool,
}

impl<R: Read> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            after_cr: false,
            finished: false,
        }
    }

    /// True once end of stream has been reached.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn take_line(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.line).into_owned();
        self.line.clear();
        line
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.read_byte() {
                Ok(Some(b'\n')) => {
                    if std::mem::take(&mut self.after_cr) {
                        // Second half of a \r\n pair.
                        continue;
                    }
                    return Some(Ok(self.take_line()));
                }
                Ok(Some(b'\r')) => {
                    self.after_cr = true;
                    return Some(Ok(self.take_line()));
                }
                Ok(Some(byte)) => {
                    self.after_cr = false;
                    self.line.push(byte);
                }
                Ok(None) => {
                    self.finished = true;
                    if self.line.is_empty() {
                        return None;
                    }
                    return Some(Ok(self.take_line()));
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<R: Read> FusedIterator for LineReader<R> {}
