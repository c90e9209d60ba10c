//! Grid configuration.

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::{GridError, Result};
use crate::pagination::DEFAULT_PAGE_SIZE;

/// Number of placeholder rows shown while loading.
pub const SKELETON_ROWS: usize = 5;

/// Behaviour switches for one grid.
///
/// Every field has a default, so a JSON config only needs the keys it
/// changes.
///
/// # Example
///
/// ```
/// use examgrid::GridConfig;
///
/// let config = GridConfig::default()
///     .page_size(25)
///     .selectable(true)
///     .row_key("user_id");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Global sort gate. When false no column sorts.
    pub sortable: bool,

    /// When false all rows are shown on a single page.
    pub paginated: bool,

    /// Rows per page.
    pub page_size: usize,

    /// Show the header checkbox and per-row checkboxes.
    pub selectable: bool,

    /// Field used as row identity for selection.
    pub row_key: String,

    /// Message shown when there are no rows.
    pub empty_message: String,

    /// Optional icon shown with the empty message.
    pub empty_icon: Option<String>,

    /// Optional call-to-action label shown with the empty message.
    pub empty_action: Option<String>,

    /// Placeholder rows rendered while loading.
    pub skeleton_rows: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            sortable: true,
            paginated: true,
            page_size: DEFAULT_PAGE_SIZE,
            selectable: false,
            row_key: "id".to_string(),
            empty_message: "No data available".to_string(),
            empty_icon: None,
            empty_action: None,
            skeleton_rows: SKELETON_ROWS,
        }
    }
}

impl GridConfig {
    /// Parse a config from JSON. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(GridError::InvalidConfig(
                "page_size must be greater than 0".to_string(),
            ));
        }
        if self.row_key.trim().is_empty() {
            return Err(GridError::InvalidConfig(
                "row_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the global sort gate.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Enable or disable pagination.
    pub fn paginated(mut self, paginated: bool) -> Self {
        self.paginated = paginated;
        self
    }

    /// Set rows per page.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Enable or disable selection checkboxes.
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Set the row identity field.
    pub fn row_key(mut self, row_key: impl Into<String>) -> Self {
        self.row_key = row_key.into();
        self
    }

    /// Set the empty-state message.
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Set the empty-state icon.
    pub fn empty_icon(mut self, icon: impl Into<String>) -> Self {
        self.empty_icon = Some(icon.into());
        self
    }

    /// Set the empty-state call-to-action label.
    pub fn empty_action(mut self, label: impl Into<String>) -> Self {
        self.empty_action = Some(label.into());
        self
    }
}
