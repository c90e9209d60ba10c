//! The grid engine: derives the visible row window from caller rows and
//! applies header, page and checkbox interactions to the grid state.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::column::Column;
use crate::config::GridConfig;
use crate::pagination::{PageInfo, Pagination};
use crate::row::{Row, RowKey, RowSource};
use crate::selection::{HeaderCheckbox, Selection};
use crate::sort::{SortState, sort_rows};
use crate::state::GridState;

/// Callback invoked with a clicked row.
pub type RowClickHandler<R> = Arc<dyn Fn(&R) + Send + Sync>;

/// What a derivation resolved to, in rendering precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStatus {
    /// Rows are still being fetched; show placeholders.
    Loading,
    /// No rows; show the empty state instead of the table.
    Empty,
    /// Show the table.
    Ready,
}

/// Result of one derivation pass.
///
/// Borrows the caller's rows; nothing is copied.
#[derive(Debug)]
pub struct Derived<'r, R> {
    pub status: GridStatus,
    /// Rows on the current page, in display order.
    pub rows: Vec<&'r R>,
    pub page: PageInfo,
    pub sort: SortState,
    /// Header checkbox state over `rows` (always `None` when not selectable).
    pub header_checkbox: HeaderCheckbox,
}

impl<R> Derived<'_, R> {
    /// Returns `true` if the page window is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A sortable, paginated, selectable data grid over caller-owned rows.
///
/// The grid never stores rows. Every method that depends on row content
/// takes the current snapshot as a [`RowSource`]; `None` is treated as no
/// rows.
///
/// # Example
///
/// ```
/// use examgrid::{Column, Grid, GridConfig, Record, Value};
///
/// let rows = vec![
///     Record::new().set("id", 1).set("score", 50),
///     Record::new().set("id", 2).set("score", 90),
///     Record::new().set("id", 3).set("score", 70),
/// ];
/// let mut grid = Grid::new(vec![Column::new("score", "Score")], GridConfig::default());
///
/// grid.click_header("score");
/// let derived = grid.derive(&rows, false);
/// let ids: Vec<_> = derived.rows.iter().map(|r| r.get("id").cloned()).collect();
/// assert_eq!(ids, vec![Some(Value::Int(1)), Some(Value::Int(3)), Some(Value::Int(2))]);
/// ```
pub struct Grid<R> {
    columns: Vec<Column<R>>,
    config: GridConfig,
    state: GridState,
    on_row_click: Option<RowClickHandler<R>>,
}

impl<R: Row> Grid<R> {
    /// Create a grid over `columns`.
    ///
    /// Invalid settings are normalized rather than rejected: a zero page size
    /// becomes 1 and a blank row key becomes `"id"`.
    pub fn new(columns: Vec<Column<R>>, mut config: GridConfig) -> Self {
        if config.page_size == 0 {
            warn!("Grid page size 0 is invalid, using 1");
            config.page_size = 1;
        }
        if config.row_key.trim().is_empty() {
            warn!("Grid row key is blank, using \"id\"");
            config.row_key = "id".to_string();
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                warn!(
                    "Duplicate column key '{}': the later column wins for key lookups",
                    column.key
                );
            }
        }

        if let Some(names) = R::field_names() {
            for column in &columns {
                if !names.contains(&column.key.as_str()) {
                    warn!("Column key '{}' is not a field of the row type", column.key);
                }
            }
        }

        Self {
            state: GridState::new(config.page_size),
            columns,
            config,
            on_row_click: None,
        }
    }

    // -------------------------------------------------------------------------
    // Callbacks and external control
    // -------------------------------------------------------------------------

    /// Invoke `f` with the row on every row click.
    pub fn on_row_click<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) + Send + Sync + 'static,
    {
        self.on_row_click = Some(Arc::new(f));
        self
    }

    /// Invoke `f` with the full new selection after every selection change.
    pub fn on_selection_change<F>(mut self, f: F) -> Self
    where
        F: Fn(Vec<RowKey>) + Send + Sync + 'static,
    {
        self.state
            .selection
            .set_on_change(Arc::new(move |s: &Selection| f(s.selected())));
        self
    }

    /// Invoke `f` after every sort change.
    pub fn on_sort_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&SortState) + Send + Sync + 'static,
    {
        self.state.sort.set_on_change(Arc::new(f));
        self
    }

    /// Invoke `f` with the new page number after every navigation.
    pub fn on_page_change<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.state
            .pagination
            .set_on_change(Arc::new(move |p: &Pagination| f(p.current_page)));
        self
    }

    /// Push the externally owned selection. Overwrites the grid's copy.
    pub fn sync_selection(&mut self, keys: impl IntoIterator<Item = RowKey>) {
        let selection: Selection = keys.into_iter().collect();
        debug!("Selection synced from caller: {} keys", selection.len());
        self.state.selection.sync(selection);
    }

    /// Push the externally owned sort state.
    pub fn sync_sort(&mut self, sort: SortState) {
        debug!("Sort synced from caller: {sort:?}");
        self.state.sort.sync(sort);
    }

    /// Push the externally owned page number. Clamped on the next derivation.
    pub fn sync_page(&mut self, page: usize) {
        debug!("Page synced from caller: {page}");
        let pagination = Pagination {
            current_page: page.max(1),
            ..*self.state.pagination.get()
        };
        self.state.pagination.sync(pagination);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Column definitions in display order.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Column with `key`. With duplicate keys the last one wins.
    pub fn column(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().rev().find(|c| c.key == key)
    }

    /// The grid configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Current sort state.
    pub fn sort(&self) -> &SortState {
        self.state.sort.get()
    }

    /// Current (last committed) page number.
    pub fn current_page(&self) -> usize {
        self.state.pagination.get().current_page
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.state.pagination.get().page_size
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        self.state.selection.get()
    }

    /// Selected keys in order.
    pub fn selected_keys(&self) -> Vec<RowKey> {
        self.selection().selected()
    }

    /// Returns `true` if header clicks on `key` change the sort.
    pub fn is_column_sortable(&self, key: &str) -> bool {
        self.config.sortable && self.column(key).is_some_and(|c| c.sortable)
    }

    /// Identity of `row`, if it has a usable key field.
    pub fn row_key(&self, row: &R) -> Option<RowKey> {
        RowKey::of(row, &self.config.row_key)
    }

    /// Returns `true` if `row` has a key and that key is selected.
    pub fn is_selected(&self, row: &R) -> bool {
        self.row_key(row)
            .is_some_and(|key| self.selection().is_selected(&key))
    }

    // -------------------------------------------------------------------------
    // Derivation
    // -------------------------------------------------------------------------

    /// Rows in sort order, or input order if no sort applies.
    pub fn sorted<'r>(&self, rows: &'r [R]) -> Vec<&'r R> {
        let sort = self.state.sort.get();
        let Some(key) = sort.column.as_deref() else {
            return rows.iter().collect();
        };
        if !self.config.sortable {
            return rows.iter().collect();
        }
        match self.column(key) {
            Some(column) if column.sortable => sort_rows(rows, column, sort.direction),
            Some(_) => {
                debug!("Sort column '{key}' is not sortable, ignoring");
                rows.iter().collect()
            }
            None => {
                warn!("Sort column '{key}' is not a column of this grid, ignoring");
                rows.iter().collect()
            }
        }
    }

    /// Page state clamped to `row_count` rows.
    fn clamped(&self, row_count: usize) -> Pagination {
        self.state.pagination.get().clamp(row_count)
    }

    /// Rows on the current page, without committing a reclamp.
    fn window<'r>(&self, rows: &'r [R]) -> (Vec<&'r R>, Pagination, usize) {
        let sorted = self.sorted(rows);
        let total = sorted.len();
        let pagination = self.clamped(total);
        let page_rows = if self.config.paginated {
            sorted[pagination.window(total)].to_vec()
        } else {
            sorted
        };
        (page_rows, pagination, total)
    }

    /// Run the full pipeline over the current row snapshot.
    ///
    /// A page number left out of range by a shrinking row set is pulled
    /// back into range and committed here.
    pub fn derive<'r>(&mut self, rows: impl RowSource<'r, R>, loading: bool) -> Derived<'r, R>
    where
        R: 'r,
    {
        let (page_rows, pagination, total) = self.window(rows.into_rows());

        if pagination != *self.state.pagination.get() {
            debug!(
                "Page {} out of range for {} rows, clamped to {}",
                self.current_page(),
                total,
                pagination.current_page
            );
            self.state.pagination.replace_silently(pagination);
        }

        let status = if loading {
            GridStatus::Loading
        } else if total == 0 {
            GridStatus::Empty
        } else {
            GridStatus::Ready
        };

        let page = if self.config.paginated {
            PageInfo::new(pagination, &pagination.window(total), total)
        } else {
            PageInfo::new(Pagination::new(total.max(1)), &(0..total), total)
        };

        let header_checkbox = if self.config.selectable {
            self.selection().header_state(&self.keys_of(&page_rows))
        } else {
            HeaderCheckbox::None
        };

        trace!(
            "Derived {:?}: {} of {} rows, page {}/{}",
            status,
            page_rows.len(),
            total,
            page.current_page,
            page.total_pages
        );

        Derived {
            status,
            rows: page_rows,
            page,
            sort: self.sort().clone(),
            header_checkbox,
        }
    }

    fn keys_of(&self, rows: &[&R]) -> Vec<RowKey> {
        rows.iter().filter_map(|row| self.row_key(row)).collect()
    }

    /// Keys of the rows on the current page.
    pub fn page_keys<'r>(&self, rows: impl RowSource<'r, R>) -> Vec<RowKey>
    where
        R: 'r,
    {
        let (page_rows, _, _) = self.window(rows.into_rows());
        self.keys_of(&page_rows)
    }

    /// Header checkbox state for the current page.
    pub fn header_checkbox<'r>(&self, rows: impl RowSource<'r, R>) -> HeaderCheckbox
    where
        R: 'r,
    {
        if !self.config.selectable {
            return HeaderCheckbox::None;
        }
        self.selection().header_state(&self.page_keys(rows))
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Header click on column `key`.
    ///
    /// Returns `true` if the sort changed. Clicks on non-sortable columns,
    /// unknown columns, or any column while sorting is disabled do nothing.
    pub fn click_header(&mut self, key: &str) -> bool {
        if !self.is_column_sortable(key) {
            trace!("Header click on '{key}' ignored: not sortable");
            return false;
        }
        let next = self.sort().toggled(key);
        debug!("Sort: {:?} -> {:?}", self.sort(), next);
        self.state.sort.set(next)
    }

    /// Clear the sort, restoring input order.
    pub fn clear_sort(&mut self) -> bool {
        self.state.sort.set(SortState::unsorted())
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Go to page `page`, clamped into the valid range for `rows`.
    ///
    /// Returns the page now current.
    pub fn go_to_page<'r>(&mut self, page: usize, rows: impl RowSource<'r, R>) -> usize
    where
        R: 'r,
    {
        let total = rows.into_rows().len();
        let next = self.state.pagination.get().at(page, total);
        if self.state.pagination.set(next) {
            debug!("Page -> {}", next.current_page);
        }
        next.current_page
    }

    /// Go to the next page, if any.
    pub fn next_page<'r>(&mut self, rows: impl RowSource<'r, R>) -> usize
    where
        R: 'r,
    {
        let page = self.current_page().saturating_add(1);
        self.go_to_page(page, rows)
    }

    /// Go to the previous page, if any.
    pub fn prev_page<'r>(&mut self, rows: impl RowSource<'r, R>) -> usize
    where
        R: 'r,
    {
        let page = self.current_page().saturating_sub(1);
        self.go_to_page(page, rows)
    }

    /// Go to the first page.
    pub fn first_page<'r>(&mut self, rows: impl RowSource<'r, R>) -> usize
    where
        R: 'r,
    {
        self.go_to_page(1, rows)
    }

    /// Go to the last page.
    pub fn last_page<'r>(&mut self, rows: impl RowSource<'r, R>) -> usize
    where
        R: 'r,
    {
        self.go_to_page(usize::MAX, rows)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    fn commit_selection(&mut self, next: Selection) -> bool {
        let changed = self.state.selection.set(next);
        if changed {
            debug!("Selection changed: {} keys", self.selection().len());
        }
        changed
    }

    /// Header checkbox click.
    ///
    /// Deselects the current page if it is fully selected, otherwise selects
    /// all of it. Selections on other pages are kept. Returns the new header
    /// state.
    pub fn toggle_header<'r>(&mut self, rows: impl RowSource<'r, R>) -> HeaderCheckbox
    where
        R: 'r,
    {
        if !self.config.selectable {
            return HeaderCheckbox::None;
        }
        let keys = self.page_keys(rows);
        let mut next = self.selection().clone();
        if next.toggle_page(&keys) {
            self.commit_selection(next);
        }
        self.selection().header_state(&keys)
    }

    /// Row checkbox click. Toggles the row's key.
    ///
    /// Never triggers the row click handler. Returns `false` if the grid is
    /// not selectable or the row has no usable key.
    pub fn toggle_row(&mut self, row: &R) -> bool {
        if !self.config.selectable {
            return false;
        }
        let Some(key) = self.row_key(row) else {
            debug!("Row without '{}' cannot be selected", self.config.row_key);
            return false;
        };
        let mut next = self.selection().clone();
        let selected = next.toggle(&key);
        trace!(
            "Row {key} {}",
            if selected { "selected" } else { "deselected" }
        );
        self.commit_selection(next)
    }

    /// Select every row with a key across all pages.
    pub fn select_all<'r>(&mut self, rows: impl RowSource<'r, R>) -> bool
    where
        R: 'r,
    {
        if !self.config.selectable {
            return false;
        }
        let keys: Vec<RowKey> = rows
            .into_rows()
            .iter()
            .filter_map(|row| self.row_key(row))
            .collect();
        let mut next = self.selection().clone();
        next.select_all(&keys) && self.commit_selection(next)
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) -> bool {
        self.commit_selection(Selection::new())
    }

    // -------------------------------------------------------------------------
    // Row activation
    // -------------------------------------------------------------------------

    /// Row click. Invokes the row click handler once; state is unchanged.
    pub fn click_row(&self, row: &R) {
        if let Some(handler) = &self.on_row_click {
            handler(row);
        }
    }
}

impl<R> fmt::Debug for Grid<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("columns", &self.columns)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("on_row_click", &self.on_row_click.is_some())
            .finish()
    }
}
