//! Coerced column values and output records.

use chrono::{DateTime, SecondsFormat, Utc};

/// A value after coercion to its column's target type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    String(String),
    /// The column's variable was unbound in this row.
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) | Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Timestamp as a UTC date-time, if this is a representable timestamp.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(millis) => DateTime::from_timestamp_millis(*millis),
            _ => None,
        }
    }

    /// RFC 3339 rendering of a timestamp with millisecond precision.
    pub fn timestamp_rfc3339(millis: i64) -> String {
        DateTime::from_timestamp_millis(millis)
            .map_or_else(|| millis.to_string(), |dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// One coerced value per schema column, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    values: Vec<Value>,
}

impl OutputRecord {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
