//! Ring buffer of recent navigation events.
//!
//! The navigator records every transition and shutdown event here, and the
//! journal page lists them. The same lines also go to `log::info!`, so the
//! buffer is only a short on-screen history, not the log of record.

use core::fmt::{self, Write};

use heapless::{Deque, String};

use crate::config::{JOURNAL_LINE_LENGTH, JOURNAL_SIZE};

/// Keeps the last [`JOURNAL_SIZE`] lines. Older lines are dropped.
#[derive(Debug)]
pub struct Journal {
    buffer: Deque<String<JOURNAL_LINE_LENGTH>, JOURNAL_SIZE>,
}

impl Journal {
    pub const fn new() -> Self { Self { buffer: Deque::new() } }

    /// Append a line, truncated to fit. Drops the oldest line when full.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        let mut line: String<JOURNAL_LINE_LENGTH> = String::new();
        for c in msg.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        self.push_line(line);
    }

    /// Append a formatted line. Text past the line length is cut off.
    pub fn push_fmt(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        let mut line = Truncating(String::new());
        line.write_fmt(args).ok();
        self.push_line(line.0);
    }

    fn push_line(
        &mut self,
        line: String<JOURNAL_LINE_LENGTH>,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }
        self.buffer.push_back(line).ok();
    }

    /// Lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.buffer.iter().map(heapless::string::StringInner::as_str) }

    pub fn last(&self) -> Option<&str> { self.buffer.back().map(heapless::string::StringInner::as_str) }

    #[inline]
    pub const fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    pub fn clear(&mut self) { self.buffer.clear(); }
}

impl Default for Journal {
    fn default() -> Self { Self::new() }
}

/// Writer that keeps whatever fits and drops the rest character by character.
struct Truncating(String<JOURNAL_LINE_LENGTH>);

impl Write for Truncating {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}
