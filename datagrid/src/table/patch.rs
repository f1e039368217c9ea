//! Speculative patches on the input collection.
//!
//! An optimistic UI update is applied to the input item right away and
//! remembered with the item's pre-patch value. It stays pending until the
//! caller confirms it (the server agreed) or rolls it back (it did not).

use std::collections::HashMap;

use crate::value::RowKey;

/// Lifecycle of a speculative patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchState {
    /// Applied, awaiting confirmation.
    Pending,
    /// Kept; the original is forgotten.
    Confirmed,
    /// Reverted to the original.
    RolledBack,
}

/// Originals of pending patches, by key.
#[derive(Debug, Clone)]
pub(crate) struct PatchLedger<T> {
    originals: HashMap<RowKey, (usize, T)>,
}

impl<T> Default for PatchLedger<T> {
    fn default() -> Self {
        Self {
            originals: HashMap::new(),
        }
    }
}

impl<T: Clone> PatchLedger<T> {
    /// Patches `items[index]`, keeping the first original for `key`.
    pub fn apply(&mut self, items: &mut [T], index: usize, key: RowKey, patch: impl FnOnce(&mut T)) {
        let item = &mut items[index];
        self.originals
            .entry(key)
            .or_insert_with(|| (index, item.clone()));
        patch(item);
    }

    /// Forgets the original. `None` if nothing was pending for `key`.
    pub fn confirm(&mut self, key: &RowKey) -> Option<PatchState> {
        self.originals.remove(key).map(|_| PatchState::Confirmed)
    }

    /// Restores the original. `None` if nothing was pending for `key`.
    pub fn rollback(&mut self, items: &mut [T], key: &RowKey) -> Option<PatchState> {
        let (index, original) = self.originals.remove(key)?;
        if let Some(slot) = items.get_mut(index) {
            *slot = original;
        }
        Some(PatchState::RolledBack)
    }

    pub fn is_pending(&self, key: &RowKey) -> bool {
        self.originals.contains_key(key)
    }

    pub fn pending(&self) -> Vec<RowKey> {
        let mut keys: Vec<_> = self.originals.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn clear(&mut self) -> usize {
        let n = self.originals.len();
        self.originals.clear();
        n
    }
}
