//! Shared helpers for unit tests

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::Logger;

/// Cloneable in-memory terminal writer
#[derive(Clone, Default)]
pub(crate) struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub(crate) fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_owned).collect()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Strip the 23-char timestamp and its separator
pub(crate) fn body(line: &str) -> &str {
    &line[24..]
}

/// Logger writing its terminal output into a [`Capture`]
pub(crate) fn capture_logger(is_terminal: bool) -> (Logger, Capture) {
    let capture = Capture::default();
    let logger = Logger::builder()
        .is_terminal(is_terminal)
        .terminal_writer(capture.clone())
        .build()
        .unwrap();
    (logger, capture)
}
