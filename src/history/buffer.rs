/*!
 * History Buffer
 * Append-only record of produced snapshots with a replay cursor
 */

use crate::scheduler::{PolicyParams, SchedulerState};
use serde::Serialize;

/// One executed tick: the resulting snapshot and the counters that follow it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub state: SchedulerState,
    pub params: PolicyParams,
}

/// Append-only snapshot buffer
///
/// Entries are only ever appended or dropped wholesale by `clear`. The
/// cursor moves freely over what has been recorded; nothing is recomputed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entry under the cursor
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.cursor.and_then(|i| self.entries.get(i))
    }

    /// True when the cursor sits on the newest entry (or nothing is recorded)
    pub fn at_end(&self) -> bool {
        match self.cursor {
            Some(i) => i + 1 == self.entries.len(),
            None => self.entries.is_empty(),
        }
    }

    /// Record a freshly computed tick and move the cursor onto it
    pub(super) fn push(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        debug_assert!(self.at_end(), "appending while replaying would fork history");
        self.entries.push(entry);
        let index = self.entries.len() - 1;
        self.cursor = Some(index);
        &self.entries[index]
    }

    /// Move onto the next recorded entry, if there is one
    pub(super) fn forward(&mut self) -> Option<&HistoryEntry> {
        let next = match self.cursor {
            Some(i) if i + 1 < self.entries.len() => i + 1,
            None if !self.entries.is_empty() => 0,
            _ => return None,
        };
        self.cursor = Some(next);
        self.entries.get(next)
    }

    /// Move back one entry; stays put on the first entry
    pub(super) fn back(&mut self) -> Option<&HistoryEntry> {
        if let Some(i) = self.cursor {
            self.cursor = Some(i.saturating_sub(1));
        }
        self.current()
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tick: u64) -> HistoryEntry {
        HistoryEntry {
            state: SchedulerState {
                current_time: tick,
                ..SchedulerState::default()
            },
            params: PolicyParams::default(),
        }
    }

    #[test]
    fn test_push_moves_cursor_to_end() {
        let mut history = History::new();
        assert!(history.at_end());
        assert!(history.current().is_none());

        history.push(entry(1));
        history.push(entry(2));
        assert_eq!(history.cursor(), Some(1));
        assert!(history.at_end());
    }

    #[test]
    fn test_back_stops_at_first_entry() {
        let mut history = History::new();
        history.push(entry(1));
        history.push(entry(2));

        assert_eq!(history.back().map(|e| e.state.current_time), Some(1));
        assert_eq!(history.back().map(|e| e.state.current_time), Some(1));
        assert_eq!(history.cursor(), Some(0));
        assert!(!history.at_end());
    }

    #[test]
    fn test_forward_replays_without_growing() {
        let mut history = History::new();
        history.push(entry(1));
        history.push(entry(2));
        history.back();

        assert_eq!(history.forward().map(|e| e.state.current_time), Some(2));
        assert!(history.forward().is_none());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.push(entry(1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
    }
}
