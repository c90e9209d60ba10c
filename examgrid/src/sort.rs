//! Sort state and the sort step of the derivation.

use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;
use crate::row::Row;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// Which column the rows are ordered by.
///
/// `direction` only means something while `column` is set. The default
/// state is unsorted: rows keep the order the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: Direction,
}

impl SortState {
    /// Unsorted state.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Ascending on `column`.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            direction: Direction::Asc,
        }
    }

    /// Descending on `column`.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            direction: Direction::Desc,
        }
    }

    /// Returns `true` if no ordering is applied.
    pub fn is_unsorted(&self) -> bool {
        self.column.is_none()
    }

    /// Direction of `column` if it is the active sort column.
    pub fn direction_of(&self, column: &str) -> Option<Direction> {
        match &self.column {
            Some(active) if active == column => Some(self.direction),
            _ => None,
        }
    }

    /// State after a header click on `column`.
    ///
    /// Clicking the active column flips its direction; clicking another
    /// column makes it active in ascending order.
    pub fn toggled(&self, column: &str) -> Self {
        match self.direction_of(column) {
            Some(direction) => Self {
                column: Some(column.to_string()),
                direction: direction.toggled(),
            },
            None => Self::asc(column),
        }
    }
}

/// Order `rows` by `column` in `direction`.
///
/// The sort is stable in both directions: rows whose values compare equal
/// keep their input order. Field values are read once per row.
pub fn sort_rows<'r, R: Row>(
    rows: &'r [R],
    column: &Column<R>,
    direction: Direction,
) -> Vec<&'r R> {
    let mut keyed: Vec<_> = rows.iter().map(|row| (column.value(row), row)).collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ord = column.compare(a, b);
        match direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    });
    keyed.into_iter().map(|(_, row)| row).collect()
}
