//! Job configuration: endpoint, query text, and target columns.
//!
//! ```toml
//! endpoint = "http://localhost:3030/dataset"
//! query = "SELECT ?name ?age WHERE { ?p <http://example.org/name> ?name ; <http://example.org/age> ?age }"
//!
//! [[columns]]
//! name = "name"
//! type = "string"
//!
//! [[columns]]
//! name = "age"
//! type = "long"
//! ```

use crate::core::{ColumnType, TargetSchema};
use crate::error::{Error, Result};
use crate::querying::http_endpoint::HttpOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// One configured output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnConfig {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self { name: name.into(), column_type }
    }
}

/// Parses the `name:type` shorthand used on the command line.
impl FromStr for ColumnConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, column_type) = s.rsplit_once(':').ok_or_else(|| {
            Error::InvalidConfig(format!("column '{}' must be written as name:type", s))
        })?;
        Ok(Self::new(name.trim(), column_type.parse()?))
    }
}

/// Settings for one ingestion job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub endpoint: String,
    pub query: String,
    pub columns: Vec<ColumnConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl InputConfig {
    pub fn new(
        endpoint: impl Into<String>,
        query: impl Into<String>,
        columns: Vec<ColumnConfig>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            query: query.into(),
            columns,
            timeout_secs: None,
            auth_token: None,
        }
    }

    /// Loads a config file, JSON if the extension is `.json`, TOML otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks required settings are present and the columns form a valid schema.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::InvalidConfig("endpoint is required".to_string()));
        }
        if self.query.trim().is_empty() {
            return Err(Error::InvalidConfig("query is required".to_string()));
        }
        self.schema().map(|_| ())
    }

    pub fn schema(&self) -> Result<TargetSchema> {
        TargetSchema::new(self.columns.iter().map(|c| (c.name.clone(), c.column_type)))
    }

    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            timeout: self.timeout_secs.map(Duration::from_secs),
            auth_token: self.auth_token.clone(),
        }
    }
}
