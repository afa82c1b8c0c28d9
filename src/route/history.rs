//! Session navigation history of catalog locations.

use super::location::Location;

/// How a state change is recorded in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Append a new entry; back-navigation steps through it.
    Push,
    /// Overwrite the current entry in place.
    Replace,
}

/// Linear back/forward history with a cursor, like a browser tab.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
}

impl History {
    /// Start a history whose only entry is `initial`.
    #[must_use]
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// Entry under the cursor.
    #[must_use]
    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Number of entries, including forward ones.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a history holds at least its initial entry.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// What: Record `location` according to `mode`.
    ///
    /// Inputs:
    /// - `location`: New address
    /// - `mode`: Push (drops forward entries first) or replace
    pub fn record(&mut self, location: Location, mode: HistoryMode) {
        match mode {
            HistoryMode::Push => {
                self.entries.truncate(self.index + 1);
                self.entries.push(location);
                self.index = self.entries.len() - 1;
            }
            HistoryMode::Replace => {
                self.entries[self.index] = location;
            }
        }
    }

    /// Step back one entry; `None` at the start of history.
    pub fn back(&mut self) -> Option<&Location> {
        self.index = self.index.checked_sub(1)?;
        Some(self.current())
    }

    /// Step forward one entry; `None` at the newest entry.
    pub fn forward(&mut self) -> Option<&Location> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }
}
