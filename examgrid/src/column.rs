//! Column descriptors.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::row::Row;
use crate::value::{Value, compare_values};

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

/// Renders one cell from the field value and the whole row.
pub type CellRenderer<R> = Arc<dyn Fn(&Value, &R) -> String + Send + Sync>;

/// Orders two field values.
pub type Comparator = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// Column header text, fixed or computed at render time.
#[derive(Clone)]
pub enum Header {
    Static(String),
    Computed(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Header {
    /// Resolve the header text.
    pub fn text(&self) -> String {
        match self {
            Header::Static(s) => s.clone(),
            Header::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::Static(s) => f.debug_tuple("Static").field(s).finish(),
            Header::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Header {
    fn from(s: &str) -> Self {
        Header::Static(s.to_string())
    }
}

impl From<String> for Header {
    fn from(s: String) -> Self {
        Header::Static(s)
    }
}

/// Column configuration.
///
/// A column names the row field it reads, how its header reads, and how
/// its cells are rendered and ordered. Columns are sortable unless
/// [`unsortable`](Column::unsortable) is called.
///
/// # Examples
///
/// ```
/// use examgrid::{Alignment, Column, Record};
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("name", "Name").width(30),
///     Column::new("score", "Score").align(Alignment::End),
///     Column::new("actions", "").unsortable(),
/// ];
/// ```
pub struct Column<R> {
    /// Field key read from each row
    pub key: String,
    /// Column header
    pub header: Header,
    /// Explicit width in terminal columns (computed from content if `None`)
    pub width: Option<u16>,
    /// Horizontal alignment
    pub align: Alignment,
    /// Whether this column is sortable
    pub sortable: bool,
    renderer: Option<CellRenderer<R>>,
    comparator: Option<Comparator>,
}

impl<R> Column<R> {
    /// Create a sortable, start-aligned column for field `key`.
    pub fn new(key: impl Into<String>, header: impl Into<Header>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            width: None,
            align: Alignment::Start,
            sortable: true,
            renderer: None,
            comparator: None,
        }
    }

    /// Header computed each time the grid renders.
    pub fn computed_header<F>(mut self, f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.header = Header::Computed(Arc::new(f));
        self
    }

    /// Set an explicit width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set whether header clicks sort by this column.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Exclude this column from sorting.
    pub fn unsortable(self) -> Self {
        self.sortable(false)
    }

    /// Render cells with a custom function instead of [`Value::display`].
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &R) -> String + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(f));
        self
    }

    /// Order rows with a custom comparator instead of [`compare_values`].
    pub fn compare_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(f));
        self
    }

    /// Compare two field values with this column's comparator.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match &self.comparator {
            Some(cmp) => cmp(a, b),
            None => compare_values(a, b),
        }
    }

    /// Header text for this render pass.
    pub fn header_text(&self) -> String {
        self.header.text()
    }
}

impl<R: Row> Column<R> {
    /// Field value of this column for `row`; missing fields read as null.
    pub fn value(&self, row: &R) -> Value {
        row.field(&self.key).unwrap_or_default()
    }

    /// Cell text for `row`.
    pub fn render_cell(&self, row: &R) -> String {
        let value = self.value(row);
        match &self.renderer {
            Some(render) => render(&value, row),
            None => value.display(),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            width: self.width,
            align: self.align,
            sortable: self.sortable,
            renderer: self.renderer.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("custom_renderer", &self.renderer.is_some())
            .field("custom_comparator", &self.comparator.is_some())
            .finish()
    }
}
