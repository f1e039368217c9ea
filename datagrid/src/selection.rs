//! Selection state management.
//!
//! Selection is tracked by key, independent of which page or filter view is
//! active. Keys are only removed by an explicit toggle, page deselect or clear.

use std::collections::HashSet;
use std::hash::Hash;

/// Key-based selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K: Eq + Hash> {
    selected: HashSet<K>,
}

impl<K: Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    /// Get the number of selected keys.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Iterate over selected keys (unordered).
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.selected.iter()
    }

    /// Toggle a key. Returns `true` if it is now selected.
    pub fn toggle(&mut self, key: K) -> bool {
        if self.selected.remove(&key) {
            false
        } else {
            self.selected.insert(key);
            true
        }
    }

    /// Select every key in `keys`, keeping other selections.
    /// Returns the keys that were newly selected.
    pub fn select_many<'a>(&mut self, keys: impl IntoIterator<Item = &'a K>) -> Vec<K>
    where
        K: 'a,
    {
        keys.into_iter()
            .filter(|key| self.selected.insert((*key).clone()))
            .cloned()
            .collect()
    }

    /// Deselect every key in `keys`, keeping other selections.
    /// Returns the keys that were deselected.
    pub fn deselect_many<'a>(&mut self, keys: impl IntoIterator<Item = &'a K>) -> Vec<K>
    where
        K: 'a,
    {
        keys.into_iter()
            .filter(|key| self.selected.remove(*key))
            .cloned()
            .collect()
    }

    /// Clear all selection.
    /// Returns the keys that were deselected.
    pub fn clear(&mut self) -> Vec<K> {
        self.selected.drain().collect()
    }

    /// Selection status of a set of keys (typically the current page).
    pub fn status_of<'a>(&self, keys: impl IntoIterator<Item = &'a K>) -> SelectionStatus
    where
        K: 'a,
    {
        let mut total = 0;
        let mut selected = 0;
        for key in keys {
            total += 1;
            if self.selected.contains(key) {
                selected += 1;
            }
        }
        match selected {
            0 => SelectionStatus::None,
            n if n == total => SelectionStatus::All,
            _ => SelectionStatus::Some,
        }
    }
}

/// Selection status of a group of rows, as shown by a header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    /// No row selected (or no rows at all).
    None,
    /// Some but not all rows selected.
    Some,
    /// Every row selected; never reported for an empty group.
    All,
}

impl SelectionStatus {
    /// Every row selected.
    pub fn is_all(self) -> bool {
        self == SelectionStatus::All
    }

    /// Some but not all rows selected.
    pub fn is_indeterminate(self) -> bool {
        self == SelectionStatus::Some
    }

    /// Header checkbox indicator.
    pub fn indicator(self) -> &'static str {
        match self {
            SelectionStatus::None => "□",
            SelectionStatus::Some => "▣",
            SelectionStatus::All => "■",
        }
    }
}

/// Row checkbox indicator: `"■"` for selected, `"□"` for unselected.
pub fn selection_indicator(selected: bool) -> &'static str {
    if selected { "■" } else { "□" }
}
