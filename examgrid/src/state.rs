//! Controlled/uncontrolled state ownership.
//!
//! Each of the grid's state machines (sort, page, selection) lives in a
//! [`Controlled`] cell. The grid always reads the cell. Writes update the
//! cell and are forwarded to the caller's callback if one is installed;
//! a value pushed by the caller with [`Controlled::sync`] overwrites the
//! cell without echoing back.

use std::fmt;
use std::sync::Arc;

use crate::pagination::Pagination;
use crate::selection::Selection;
use crate::sort::SortState;

/// Callback receiving the new value after a grid-initiated change.
pub type ChangeCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A value owned by the grid, optionally mirrored by an external owner.
pub struct Controlled<T> {
    value: T,
    on_change: Option<ChangeCallback<T>>,
}

impl<T: Clone + PartialEq> Controlled<T> {
    /// Cell holding `initial`, with no callback installed.
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            on_change: None,
        }
    }

    /// Current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Install the change callback.
    pub fn set_on_change(&mut self, callback: ChangeCallback<T>) {
        self.on_change = Some(callback);
    }

    /// Grid-initiated write. Returns `true` if the value changed.
    ///
    /// The callback fires only on an actual change.
    pub fn set(&mut self, next: T) -> bool {
        if next == self.value {
            return false;
        }
        self.value = next;
        if let Some(callback) = &self.on_change {
            callback(&self.value);
        }
        true
    }

    /// Caller-initiated write. Overwrites the cached value, no callback.
    pub fn sync(&mut self, external: T) {
        self.value = external;
    }

    /// Write without notifying, used for normalization (page reclamp).
    pub(crate) fn replace_silently(&mut self, next: T) {
        self.value = next;
    }
}

impl<T: Default + Clone + PartialEq> Default for Controlled<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Controlled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controlled")
            .field("value", &self.value)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

/// All mutable state of one grid instance.
#[derive(Debug, Default)]
pub struct GridState {
    pub sort: Controlled<SortState>,
    pub pagination: Controlled<Pagination>,
    pub selection: Controlled<Selection>,
}

impl GridState {
    /// Fresh state: unsorted, page 1 of `page_size` rows, nothing selected.
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: Controlled::new(SortState::unsorted()),
            pagination: Controlled::new(Pagination::new(page_size)),
            selection: Controlled::new(Selection::new()),
        }
    }
}
