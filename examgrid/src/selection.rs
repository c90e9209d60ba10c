//! Selection state management.
//!
//! Selection is a set of row keys. It is independent of sorting and
//! pagination: a key stays selected while its row is off-screen.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::row::RowKey;

/// Tri-state header checkbox, computed over the current page window only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderCheckbox {
    /// No key on the page is selected (or the page is empty).
    #[default]
    None,
    /// Some but not all keys on the page are selected.
    Some,
    /// Every key on a non-empty page is selected.
    All,
}

/// Key-based selection state.
///
/// Keys are kept ordered so [`selected`](Selection::selected) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    selected: BTreeSet<RowKey>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected keys in order.
    pub fn selected(&self) -> Vec<RowKey> {
        self.selected.iter().cloned().collect()
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &RowKey) -> bool {
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

    /// Toggle selection of a key.
    /// Returns `true` if the key is now selected.
    pub fn toggle(&mut self, key: &RowKey) -> bool {
        if self.selected.remove(key) {
            false
        } else {
            self.selected.insert(key.clone())
        }
    }

    /// Add every key in `keys` (set union).
    /// Returns `true` if any key was newly selected.
    pub fn select_all<'a>(&mut self, keys: impl IntoIterator<Item = &'a RowKey>) -> bool {
        keys.into_iter()
            .fold(false, |changed, key| self.selected.insert(key.clone()) || changed)
    }

    /// Remove every key in `keys`, leaving other keys untouched.
    /// Returns `true` if any key was deselected.
    pub fn deselect_all<'a>(&mut self, keys: impl IntoIterator<Item = &'a RowKey>) -> bool {
        keys.into_iter()
            .fold(false, |changed, key| self.selected.remove(key) || changed)
    }

    /// Header state for a page holding `page_keys`.
    pub fn header_state(&self, page_keys: &[RowKey]) -> HeaderCheckbox {
        let hits = page_keys.iter().filter(|k| self.is_selected(k)).count();
        if hits == 0 {
            HeaderCheckbox::None
        } else if hits == page_keys.len() {
            HeaderCheckbox::All
        } else {
            HeaderCheckbox::Some
        }
    }

    /// Header checkbox click over a page holding `page_keys`.
    ///
    /// If the whole page is selected its keys are removed; otherwise they
    /// are all added. Keys on other pages are never touched.
    /// Returns `true` if the selection changed.
    pub fn toggle_page(&mut self, page_keys: &[RowKey]) -> bool {
        match self.header_state(page_keys) {
            HeaderCheckbox::All => self.deselect_all(page_keys),
            _ => self.select_all(page_keys),
        }
    }
}

impl FromIterator<RowKey> for Selection {
    fn from_iter<I: IntoIterator<Item = RowKey>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<RowKey>> for Selection {
    fn from(keys: Vec<RowKey>) -> Self {
        keys.into_iter().collect()
    }
}
