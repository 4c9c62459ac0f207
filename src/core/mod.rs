//! Core data structures: target schema, RDF terms, and coerced output values

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub mod term;
pub mod value;

pub use term::{LiteralRef, RdfTerm, RowBinding};
pub use value::{OutputRecord, Value};

/// Target type of an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnType {
    Integer,
    Float,
    Timestamp,
    String,
}

impl ColumnType {
    pub const ALL: [ColumnType; 4] =
        [ColumnType::Integer, ColumnType::Float, ColumnType::Timestamp, ColumnType::String];

    /// Name used in configuration files and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Integer => "long",
            ColumnType::Float => "double",
            ColumnType::Timestamp => "timestamp",
            ColumnType::String => "string",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "long" | "integer" | "int" => Ok(ColumnType::Integer),
            "double" | "float" => Ok(ColumnType::Float),
            "timestamp" => Ok(ColumnType::Timestamp),
            "string" => Ok(ColumnType::String),
            other => Err(Error::InvalidConfig(format!(
                "unsupported column type '{}' (expected long, double, timestamp or string)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for ColumnType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> Self {
        value.as_str().to_string()
    }
}

/// One output column: its name, target type, and position in the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    name: String,
    column_type: ColumnType,
    index: usize,
}

impl ColumnDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered, name-unique list of output columns.
///
/// Column order defines the order of values in every emitted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSchema {
    columns: Vec<ColumnDescriptor>,
}

impl TargetSchema {
    /// Builds a schema from `(name, type)` pairs, assigning indices in order.
    ///
    /// Fails if the list is empty or a name occurs twice.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ColumnType)>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut descriptors = Vec::new();

        for (index, (name, column_type)) in columns.into_iter().enumerate() {
            let name = name.into();
            if name.is_empty() {
                return Err(Error::InvalidConfig(format!("column {} has an empty name", index)));
            }
            if !seen.insert(name.clone()) {
                return Err(Error::InvalidConfig(format!("duplicate column name '{}'", name)));
            }
            descriptors.push(ColumnDescriptor { name, column_type, index });
        }

        if descriptors.is_empty() {
            return Err(Error::InvalidConfig("at least one column is required".to_string()));
        }

        Ok(Self { columns: descriptors })
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(ColumnDescriptor::name)
    }
}
