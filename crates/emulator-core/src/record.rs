//! Ordered row representation for sampled records.

use chrono::NaiveDateTime;

/// A single column value in a sampled row.
///
/// `RecordValue` is the value universe the record sources can produce. It is
/// source-agnostic: the MySQL adapter maps its native values into this enum,
/// and the serializer maps it to transport JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// SQL NULL
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed integer
    Int(i64),

    /// Unsigned integer
    UInt(u64),

    /// 64-bit floating point
    Float(f64),

    /// String value
    String(String),

    /// Raw binary data (non-UTF-8)
    Bytes(Vec<u8>),

    /// Timestamp without timezone
    DateTime(NaiveDateTime),

    /// Sequence of values, order-preserving
    Array(Vec<RecordValue>),

    /// Nested mapping, order-preserving
    Object(Vec<(String, RecordValue)>),
}

impl RecordValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a DateTime.
    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

// Lets already-serialized JSON be fed back through the serializer.
impl From<serde_json::Value> for RecordValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    // serde_json numbers are i64, u64 or finite f64
                    Self::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// One sampled row: an ordered mapping of field name to value.
///
/// Field order matches the column order of the source table and is preserved
/// through serialization. A record is immutable once fetched; it is read once,
/// serialized once, and discarded after dispatch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, RecordValue)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Fields keep insertion order.
    pub fn push(&mut self, name: impl Into<String>, value: RecordValue) {
        self.fields.push((name.into(), value));
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&RecordValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, RecordValue)> {
        self.fields.iter()
    }
}

impl FromIterator<(String, RecordValue)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, RecordValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
