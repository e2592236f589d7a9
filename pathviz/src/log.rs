//! On-screen message log.

use std::collections::VecDeque;

/// Style of a log entry, mapped to display colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogStyle {
    Normal,
    /// A search found its path.
    Confirm,
    /// A search failed or a request was rejected.
    Error,
}

/// A single log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub style: LogStyle,
    pub dups: u32,
}

impl LogEntry {
    /// The entry as displayed, with a repeat counter when collapsed.
    pub fn display(&self) -> String {
        if self.dups > 0 {
            format!("{} ({}×)", self.text, self.dups + 1)
        } else {
            self.text.clone()
        }
    }
}

/// The last [`MessageLog::LINES`] messages, newest at the back. A message
/// equal to the newest one bumps its repeat counter instead of taking a line.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: VecDeque<LogEntry>,
}

impl MessageLog {
    pub const LINES: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: &str, style: LogStyle) {
        let repeat = self
            .entries
            .back_mut()
            .filter(|last| last.text == text && last.style == style);
        if let Some(last) = repeat {
            last.dups += 1;
            return;
        }
        if self.entries.len() == Self::LINES {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            text: text.to_owned(),
            style,
            dups: 0,
        });
    }

    pub fn log(&mut self, text: &str) {
        self.push(text, LogStyle::Normal);
    }

    pub fn error(&mut self, text: &str) {
        self.push(text, LogStyle::Error);
    }

    /// Entries oldest first.
    pub fn entries(&self) -> &VecDeque<LogEntry> {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_lines() {
        let mut log = MessageLog::new();
        for i in 0..12 {
            log.log(&format!("message {i}"));
        }
        assert_eq!(log.entries().len(), MessageLog::LINES);
        assert_eq!(log.entries()[0].text, "message 4");
        assert_eq!(log.last().unwrap().text, "message 11");
    }

    #[test]
    fn collapses_consecutive_duplicates() {
        let mut log = MessageLog::new();
        log.log("no path");
        log.log("no path");
        log.log("no path");
        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.last().unwrap().display(), "no path (3×)");

        // Same text in another style is a new entry.
        log.error("no path");
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.last().unwrap().display(), "no path");
    }

    #[test]
    fn duplicates_do_not_evict() {
        let mut log = MessageLog::new();
        for i in 0..MessageLog::LINES {
            log.log(&i.to_string());
        }
        log.log("7");
        assert_eq!(log.entries()[0].text, "0");
        assert_eq!(log.last().unwrap().dups, 1);
    }
}
