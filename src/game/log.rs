//! Bounded event log.

use super::catalog::LOG_CAPACITY;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Ordered, human-readable record of what happened in the session.
///
/// A bounded FIFO ring: once the capacity (30 entries) is reached, the
/// oldest entry is dropped for each new one. Purely observational output
/// for the presentation layer; no game logic reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl EventLog {
    /// Creates an empty log with the standard capacity.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(LOG_CAPACITY),
            capacity: LOG_CAPACITY,
        }
    }

    /// Appends an entry, evicting the oldest if the log is full.
    pub fn push(&mut self, entry: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.into());
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
