//! Run log - bounded record of client-observed events
//!
//! Entries are kept newest-first. Appending past capacity silently drops
//! the oldest entries; nothing is archived.

use std::collections::VecDeque;
use std::fmt;

use chrono::Local;
use parking_lot::RwLock;

/// Number of entries kept by default
pub const DEFAULT_LOG_CAPACITY: usize = 100;

/// A single log line, immutable once created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    timestamp: String,
    message: String,
}

impl LogEntry {
    /// Create an entry stamped with the current local time of day
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            message: message.into(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.message)
    }
}

/// Append-only, capacity-bounded, newest-first log
#[derive(Debug)]
pub struct LogBuffer {
    capacity: usize,
    entries: RwLock<VecDeque<LogEntry>>,
}

impl LogBuffer {
    /// Create a buffer holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Prepend a new entry and evict anything past capacity
    pub fn append(&self, message: impl Into<String>) {
        let entry = LogEntry::new(message);
        let mut entries = self.entries.write();
        entries.push_front(entry);
        entries.truncate(self.capacity);
    }

    /// Snapshot of the log, newest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_newest_entry_first() {
        let log = LogBuffer::default();
        log.append("first");
        log.append("second");

        let entries = log.entries();
        assert_eq!(entries[0].message(), "second");
        assert_eq!(entries[1].message(), "first");
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let log = LogBuffer::default();
        for i in 0..101 {
            log.append(format!("x{}", i));
        }

        let entries = log.entries();
        assert_eq!(entries.len(), 100);
        assert_eq!(entries[0].message(), "x100");
        assert_eq!(entries[99].message(), "x1");
        assert!(entries.iter().all(|e| e.message() != "x0"));
    }

    #[test]
    fn test_identical_messages_still_capped() {
        let log = LogBuffer::default();
        for _ in 0..101 {
            log.append("x");
        }
        assert_eq!(log.len(), 100);
    }

    #[test]
    fn test_display_format() {
        let entry = LogEntry::new("hello");
        let line = entry.to_string();
        assert!(line.starts_with('['));
        assert!(line.ends_with("] hello"));
        // HH:MM:SS
        assert_eq!(entry.timestamp().len(), 8);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let log = LogBuffer::new(0);
        log.append("only");
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_keeps_last_capacity_entries_newest_first(n in 0usize..350) {
            let log = LogBuffer::default();
            for i in 0..n {
                log.append(i.to_string());
            }

            let messages: Vec<String> = log.entries().iter().map(|e| e.message().to_string()).collect();
            let expected: Vec<String> = (0..n).rev().take(DEFAULT_LOG_CAPACITY).map(|i| i.to_string()).collect();
            prop_assert_eq!(messages, expected);
        }
    }
}
