//! Result-set value types
//!
//! `Value` is the unified cell representation used for parameter binding
//! and result comparison. Cell equality in the comparison engine is
//! type-aware: it pairs the `type_name` tag with the canonical `repr`
//! text, so `Int64(1)` and `String("1")` never compare equal.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters kept when building the canonical text of
/// large string/binary cells. Values longer than this compare by their
/// preview text only - a known limitation of the comparison engine.
pub const PREVIEW_LEN: usize = 1024;

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// 16-bit signed integer
    Int16(i16),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),
    /// 32-bit floating point
    Float32(f32),
    /// 64-bit floating point
    Float64(f64),
    /// Decimal/Numeric (stored as string for precision)
    Decimal(String),
    /// UTF-8 string
    String(String),
    /// Binary data
    Bytes(Vec<u8>),
    /// UUID
    Uuid(Uuid),
    /// Date (year, month, day)
    Date(NaiveDate),
    /// Time (hour, minute, second, nanosecond)
    Time(NaiveTime),
    /// DateTime without timezone
    DateTime(NaiveDateTime),
    /// DateTime with timezone (UTC)
    DateTimeUtc(DateTime<Utc>),
    /// JSON value
    Json(serde_json::Value),
}

impl Value {
    /// Check if the value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type tag used by type-aware cell equality
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int16(_) | Value::Int32(_) | Value::Int64(_) => "integer",
            Value::Float32(_) | Value::Float64(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Uuid(_) => "uuid",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::DateTime(_) | Value::DateTimeUtc(_) => "datetime",
            Value::Json(_) => "json",
        }
    }

    /// Returns the canonical text used for key matching and cell equality.
    ///
    /// Strings and binary values are truncated at [`PREVIEW_LEN`]; two
    /// distinct values sharing an identical preview prefix compare equal.
    pub fn repr(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Int16(v) => v.to_string(),
            Value::Int32(v) => v.to_string(),
            Value::Int64(v) => v.to_string(),
            Value::Float32(v) => v.to_string(),
            Value::Float64(v) => v.to_string(),
            Value::Decimal(v) => v.clone(),
            Value::String(v) => v.chars().take(PREVIEW_LEN).collect(),
            Value::Bytes(v) => {
                let mut out = String::with_capacity(2 + v.len().min(PREVIEW_LEN / 2) * 2);
                out.push_str("0x");
                for b in v.iter().take(PREVIEW_LEN / 2) {
                    out.push_str(&format!("{:02x}", b));
                }
                out
            }
            Value::Uuid(v) => v.to_string(),
            Value::Date(v) => v.to_string(),
            Value::Time(v) => v.to_string(),
            Value::DateTime(v) => v.to_string(),
            Value::DateTimeUtc(v) => v.to_rfc3339(),
            Value::Json(v) => v.to_string(),
        }
    }

    /// Returns the full literal text of the value, with no truncation.
    ///
    /// This is the rendering used when a value is written back into SQL
    /// text; [`Value::repr`] is the preview-bounded form used for
    /// comparison and key matching only.
    pub fn literal_text(&self) -> String {
        match self {
            Value::String(v) => v.clone(),
            Value::Bytes(v) => {
                let mut out = String::with_capacity(2 + v.len() * 2);
                out.push_str("0x");
                for b in v {
                    out.push_str(&format!("{:02x}", b));
                }
                out
            }
            other => other.repr(),
        }
    }

    /// Try to get as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int16(v) => Some(*v as i64),
            Value::Int32(v) => Some(*v as i64),
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.repr())
    }
}

/// A row from a query result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Column values
    pub values: Vec<Value>,
}

impl Row {
    /// Create a new row
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Get a value by column index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

/// Column metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Column name
    pub name: String,
    /// Data type (database-specific string)
    pub data_type: String,
    /// Whether the column can be NULL
    pub nullable: bool,
    /// Column ordinal position (0-based)
    pub ordinal: usize,
}

impl ColumnMeta {
    /// Create column metadata with just a name and type
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            ordinal: 0,
        }
    }
}

/// Result set returned by the external execution collaborator
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Column metadata
    pub columns: Vec<ColumnMeta>,
    /// Result rows
    pub rows: Vec<Row>,
    /// Rows affected (for DML statements)
    pub affected_rows: u64,
    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

impl QueryResult {
    /// Resolve a column name to its index, case-insensitively
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}
