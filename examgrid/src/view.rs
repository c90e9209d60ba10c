//! View model: what a host renders for one derivation.
//!
//! Exactly one of skeleton, empty state or table is produced, in that
//! precedence order. The empty state carries no header, sort or
//! pagination controls.

use crate::column::Alignment;
use crate::grid::{Derived, Grid, GridStatus};
use crate::pagination::PageInfo;
use crate::row::{Row, RowKey, RowSource};
use crate::selection::HeaderCheckbox;
use crate::sort::Direction;

/// Placeholder grid shown while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonView {
    /// Column count, including the checkbox column when selectable.
    pub columns: usize,
    pub rows: usize,
}

/// Shown instead of the table when there are no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyView {
    pub message: String,
    pub icon: Option<String>,
    /// Call-to-action label.
    pub action: Option<String>,
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub align: Alignment,
    pub width: Option<u16>,
    /// Whether a click on this header changes the sort.
    pub sortable: bool,
    /// Direction indicator when this column is the active sort column.
    pub sort: Option<Direction>,
}

/// One body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRow {
    /// Row identity; `None` rows get no working checkbox.
    pub key: Option<RowKey>,
    pub selected: bool,
    pub cells: Vec<String>,
}

/// The table body with its controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: Vec<HeaderCell>,
    /// Header checkbox, present only for selectable grids.
    pub header_checkbox: Option<HeaderCheckbox>,
    pub rows: Vec<BodyRow>,
    /// Pagination footer, present only for paginated grids.
    pub footer: Option<PageInfo>,
    /// Selected keys across all pages.
    pub selected_count: usize,
}

/// Everything a host needs to draw the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridView {
    Skeleton(SkeletonView),
    Empty(EmptyView),
    Table(TableView),
}

impl<R: Row> Grid<R> {
    /// Derive and build the view model in one step.
    pub fn view<'r>(&mut self, rows: impl RowSource<'r, R>, loading: bool) -> GridView
    where
        R: 'r,
    {
        let derived = self.derive(rows, loading);
        self.build_view(&derived)
    }

    /// Build the view model for an existing derivation.
    pub fn build_view(&self, derived: &Derived<'_, R>) -> GridView {
        let config = self.config();
        match derived.status {
            GridStatus::Loading => GridView::Skeleton(SkeletonView {
                columns: self.columns().len() + usize::from(config.selectable),
                rows: config.skeleton_rows,
            }),
            GridStatus::Empty => GridView::Empty(EmptyView {
                message: config.empty_message.clone(),
                icon: config.empty_icon.clone(),
                action: config.empty_action.clone(),
            }),
            GridStatus::Ready => GridView::Table(self.table_view(derived)),
        }
    }

    fn table_view(&self, derived: &Derived<'_, R>) -> TableView {
        let config = self.config();
        let header = self
            .columns()
            .iter()
            .map(|column| {
                let sortable = self.is_column_sortable(&column.key);
                HeaderCell {
                    key: column.key.clone(),
                    label: column.header_text(),
                    align: column.align,
                    width: column.width,
                    sortable,
                    sort: sortable
                        .then(|| derived.sort.direction_of(&column.key))
                        .flatten(),
                }
            })
            .collect();

        let rows = derived
            .rows
            .iter()
            .map(|row| {
                let key = self.row_key(row);
                let selected = key
                    .as_ref()
                    .is_some_and(|k| self.selection().is_selected(k));
                BodyRow {
                    key,
                    selected,
                    cells: self.columns().iter().map(|c| c.render_cell(row)).collect(),
                }
            })
            .collect();

        TableView {
            header,
            header_checkbox: config.selectable.then_some(derived.header_checkbox),
            rows,
            footer: config.paginated.then_some(derived.page),
            selected_count: self.selection().len(),
        }
    }
}
