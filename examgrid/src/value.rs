//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A dynamic value read from a row field.
///
/// Rows are open mappings from field name to value. Every field the grid
/// reads (for display, sorting or row identity) is surfaced as a `Value`.
///
/// # Type Mapping
///
/// | JSON / Rust type | Variant |
/// |------------------|---------|
/// | null, `None` | `Null` |
/// | bool | `Bool` |
/// | integer | `Int` |
/// | floating point | `Float` |
/// | UUID string, `Uuid` | `Guid` |
/// | RFC 3339 string, `DateTime<Utc>` | `DateTime` |
/// | any other string | `String` |
///
/// # Example
///
/// ```
/// use examgrid::Value;
///
/// let title = Value::from("Algebra midterm");
/// let score = Value::from(87);
/// let empty = Value::from(None::<i64>);
/// assert!(empty.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// String value.
    String(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Guid(_) => "guid",
            Value::DateTime(_) => "datetime",
            Value::String(_) => "string",
        }
    }

    /// Returns the value as a string slice if it holds a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as `f64` if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Text shown in a cell when the column has no custom renderer.
    pub fn display(&self) -> String {
        self.to_string()
    }

    /// Converts an arbitrary JSON value.
    ///
    /// Objects and arrays have no grid representation and are kept as their
    /// compact JSON text.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => {
                if let Ok(guid) = Uuid::parse_str(&s) {
                    Value::Guid(guid)
                } else if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
                    Value::DateTime(dt.with_timezone(&Utc))
                } else {
                    Value::String(s)
                }
            }
            other => Value::String(other.to_string()),
        }
    }

    /// Position of the variant in the cross-type ordering.
    ///
    /// Ints and floats share a rank so they compare numerically.
    fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::DateTime(_) => 3,
            Value::Guid(_) => 4,
            Value::String(_) => 5,
        }
    }
}

/// Type-aware total ordering used when a column has no comparator.
///
/// Numbers compare numerically regardless of int/float representation,
/// strings lexically, datetimes chronologically. Values of different types
/// order by type: null, bool, number, datetime, guid, string.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Int(x), Value::Float(y)) => compare_int_float(*x, *y),
        (Value::Float(x), Value::Int(y)) => compare_int_float(*y, *x).reverse(),
        (Value::Float(x), Value::Float(y)) => compare_floats(*x, *y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::Guid(x), Value::Guid(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => a.type_rank().cmp(&b.type_rank()),
    }
}

/// Numeric order with `-0.0 == 0.0`. NaNs sort after (or, when negative,
/// before) every number.
fn compare_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Exact comparison of an integer with a float.
///
/// `i as f64` rounds above 2^53, but rounding is monotonic, so a strict
/// result after the cast is exact. A tie means the float is integral and
/// within `i128`, where the two compare without loss.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    match (i as f64).partial_cmp(&f) {
        Some(Ordering::Equal) | None => i128::from(i).cmp(&(f as i128)),
        Some(ord) => ord,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", if *b { "Yes" } else { "No" }),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Guid(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M")),
            Value::String(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Float(v as f64),
        }
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::from(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
