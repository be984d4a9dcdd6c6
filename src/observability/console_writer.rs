//! Browser console writer for formatted log lines.
//!
//! The fmt layer asks for a fresh writer per event and writes the formatted
//! line into it. [`ConsoleWriter`] buffers those bytes and hands the finished
//! line to `console.log` when it is dropped.

use std::io::{self, Write};

/// One log line on its way to the browser console.
#[derive(Debug, Default)]
pub struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&self.buffer);
        web_sys::console::log_1(&line.trim_end().into());
        self.buffer.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
