//! Error types for SPARQL ingestion runs

use crate::core::ColumnType;
use thiserror::Error;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, Error>;

/// A requested column is not among the query's result variables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("SPARQL query does not return column {column_name}")]
pub struct MissingColumnError {
    pub column_name: String,
}

/// A bound term could not be converted to the column's target type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot coerce value {raw_value:?} of column {column_name} to {target_type}")]
pub struct CoercionError {
    pub column_name: String,
    pub raw_value: String,
    pub target_type: ColumnType,
}

/// Main error type for ingestion runs
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    MissingColumn(#[from] MissingColumnError),

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// The query text failed to parse
    #[error("Query syntax error: {0}")]
    QuerySyntax(String),

    /// The query did not produce a solution sequence
    #[error("Query is not a SELECT query")]
    NotSelect,

    /// No dataset is mounted under the endpoint
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// HTTP transport error: connection, timeout, body read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Query failed with status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    /// The endpoint answered with something other than SPARQL results
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Malformed SPARQL results document
    #[error("Results parse error: {0}")]
    ResultsParse(String),

    /// Store error
    #[error("Store error: {0}")]
    Store(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<oxigraph::sparql::results::QueryResultsParseError> for Error {
    fn from(err: oxigraph::sparql::results::QueryResultsParseError) -> Self {
        Error::ResultsParse(err.to_string())
    }
}

impl From<oxigraph::sparql::QueryEvaluationError> for Error {
    fn from(err: oxigraph::sparql::QueryEvaluationError) -> Self {
        Error::Store(err.to_string())
    }
}

impl From<oxigraph::store::StorageError> for Error {
    fn from(err: oxigraph::store::StorageError) -> Self {
        Error::Store(err.to_string())
    }
}

impl From<oxigraph::store::LoaderError> for Error {
    fn from(err: oxigraph::store::LoaderError) -> Self {
        Error::Store(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::InvalidConfig(err.to_string())
    }
}
