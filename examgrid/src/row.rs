//! Row access: the [`Row`] trait, row identity keys and the dynamic [`Record`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{GridError, Result};
use crate::value::Value;

/// Trait for anything the grid can display as a row.
///
/// The grid only ever reads fields by name: the fields named by column
/// keys and the configured row-key field. Rows are owned by the caller.
///
/// Structs usually get this through `#[derive(Row)]`; open mappings use
/// [`Record`].
///
/// # Example
///
/// ```
/// use examgrid::{Row, Value};
///
/// struct Exam {
///     id: i64,
///     title: String,
/// }
///
/// impl Row for Exam {
///     fn field(&self, key: &str) -> Option<Value> {
///         match key {
///             "id" => Some(self.id.into()),
///             "title" => Some(self.title.clone().into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Row {
    /// Read a field by name. `None` means the row has no such field.
    fn field(&self, key: &str) -> Option<Value>;

    /// Field names this row type declares, when its shape is static.
    ///
    /// Open mappings return `None`; column keys are then not checked.
    fn field_names() -> Option<&'static [&'static str]>
    where
        Self: Sized,
    {
        None
    }
}

impl<T: Row> Row for &T {
    fn field(&self, key: &str) -> Option<Value> {
        (**self).field(key)
    }
}

/// Anything the grid accepts as the current row snapshot.
///
/// Slices, vectors and arrays are taken as-is; `None` normalizes to an
/// empty collection so a missing fetch result renders the empty state.
pub trait RowSource<'r, R: 'r> {
    /// Borrow the rows as a slice.
    fn into_rows(self) -> &'r [R];
}

impl<'r, R> RowSource<'r, R> for &'r [R] {
    fn into_rows(self) -> &'r [R] {
        self
    }
}

impl<'r, R> RowSource<'r, R> for &'r Vec<R> {
    fn into_rows(self) -> &'r [R] {
        self.as_slice()
    }
}

impl<'r, R, const N: usize> RowSource<'r, R> for &'r [R; N] {
    fn into_rows(self) -> &'r [R] {
        self.as_slice()
    }
}

impl<'r, R: 'r, S: RowSource<'r, R>> RowSource<'r, R> for Option<S> {
    fn into_rows(self) -> &'r [R] {
        match self {
            Some(rows) => rows.into_rows(),
            None => &[],
        }
    }
}

/// Identity of a row for selection purposes.
///
/// Only values with a stable equality make usable keys: integers, strings
/// and UUIDs. Floats, booleans, datetimes and nulls are not keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowKey {
    /// Integer identifier.
    Int(i64),
    /// UUID identifier.
    Guid(Uuid),
    /// String identifier.
    Text(String),
}

impl RowKey {
    /// Converts a field value into a key, if the value can identify a row.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(RowKey::Int(*v)),
            Value::Guid(v) => Some(RowKey::Guid(*v)),
            Value::String(v) => Some(RowKey::Text(v.clone())),
            _ => None,
        }
    }

    /// Extracts the key of `row` from field `key_field`.
    pub fn of<R: Row + ?Sized>(row: &R, key_field: &str) -> Option<Self> {
        row.field(key_field).as_ref().and_then(Self::from_value)
    }

    /// Parses a key typed by a user: integers first, then UUIDs, else text.
    pub fn parse(s: &str) -> Self {
        if let Ok(i) = s.parse::<i64>() {
            RowKey::Int(i)
        } else if let Ok(guid) = Uuid::parse_str(s) {
            RowKey::Guid(guid)
        } else {
            RowKey::Text(s.to_string())
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Int(v) => write!(f, "{v}"),
            RowKey::Guid(v) => write!(f, "{v}"),
            RowKey::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for RowKey {
    fn from(v: i64) -> Self {
        RowKey::Int(v)
    }
}

impl From<i32> for RowKey {
    fn from(v: i32) -> Self {
        RowKey::Int(i64::from(v))
    }
}

impl From<Uuid> for RowKey {
    fn from(v: Uuid) -> Self {
        RowKey::Guid(v)
    }
}

impl From<&str> for RowKey {
    fn from(v: &str) -> Self {
        RowKey::Text(v.to_string())
    }
}

impl From<String> for RowKey {
    fn from(v: String) -> Self {
        RowKey::Text(v)
    }
}

/// A dynamic row: an ordered mapping from field name to [`Value`].
///
/// This is the shape rows have when they come straight from a remote
/// fetch with no static schema.
///
/// # Example
///
/// ```
/// use examgrid::{Record, Row, Value};
///
/// let row = Record::new().set("id", 7).set("name", "Quiz bank A");
/// assert_eq!(row.field("id"), Some(Value::Int(7)));
/// assert_eq!(row.field("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value (builder style).
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Sets a field value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Returns a field value by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the field names of this record.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a record from a JSON object.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Object(map) => Ok(Self {
                fields: map
                    .into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            }),
            other => Err(GridError::InvalidRows(format!(
                "expected an object, found {other}"
            ))),
        }
    }

    /// Parses a JSON array of objects into records.
    ///
    /// `null` is accepted and yields no rows.
    pub fn parse_rows(json: &str) -> Result<Vec<Self>> {
        match serde_json::from_str::<serde_json::Value>(json)? {
            serde_json::Value::Array(items) => items.into_iter().map(Self::from_json).collect(),
            serde_json::Value::Null => Ok(Vec::new()),
            _ => Err(GridError::InvalidRows(
                "expected a JSON array of objects".to_string(),
            )),
        }
    }
}

impl Row for Record {
    fn field(&self, key: &str) -> Option<Value> {
        self.fields.get(key).cloned()
    }
}

impl Row for BTreeMap<String, Value> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl Row for std::collections::HashMap<String, Value> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
