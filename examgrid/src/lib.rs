//! Sortable, paginated, selectable data grid engine.
//!
//! The grid reads caller-owned rows through the [`Row`] trait, orders them
//! by a column, cuts out the current page, and tracks which rows are
//! selected by key. Rendering is left to the host; [`view`] builds a view
//! model and [`render`] turns it into plain text.

pub mod column;
pub mod config;
pub mod error;
pub mod grid;
pub mod pagination;
pub mod render;
pub mod row;
pub mod selection;
pub mod sort;
pub mod state;
pub mod value;
pub mod view;

pub use column::{Alignment, CellRenderer, Column, Comparator, Header};
pub use config::{GridConfig, SKELETON_ROWS};
pub use error::{GridError, Result};
pub use examgrid_derive::Row;
pub use grid::{Derived, Grid, GridStatus, RowClickHandler};
pub use pagination::{DEFAULT_PAGE_SIZE, PageInfo, Pagination, total_pages};
pub use row::{Record, Row, RowKey, RowSource};
pub use selection::{HeaderCheckbox, Selection};
pub use sort::{Direction, SortState, sort_rows};
pub use state::{ChangeCallback, Controlled, GridState};
pub use value::{Value, compare_values};
pub use view::{BodyRow, EmptyView, GridView, HeaderCell, SkeletonView, TableView};

pub mod prelude {
    pub use crate::column::{Alignment, Column};
    pub use crate::config::GridConfig;
    pub use crate::grid::{Grid, GridStatus};
    pub use crate::render::render_text;
    pub use crate::Row;
    pub use crate::row::{Record, RowKey};
    pub use crate::selection::HeaderCheckbox;
    pub use crate::sort::{Direction, SortState};
    pub use crate::value::Value;
    pub use crate::view::GridView;
}
