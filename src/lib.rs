//! # sparql-ingest
//!
//! sparql-ingest runs a SPARQL `SELECT` query against an endpoint and streams
//! the result table into a typed record sink.
//!
//! Every requested column has a target type (long, double, timestamp or
//! string). Before the first row is read the result variables are checked
//! against the requested columns; each row is then coerced term by term and
//! handed to the sink, which is finalized exactly once however the run ends.
//!
//! ## Features
//!
//! - SPARQL 1.1 Protocol client with streaming result parsing
//! - In-process Oxigraph datasets for local runs and tests
//! - JSON Lines and CSV sinks
//!
//! ## Example
//!
//! ```rust
//! use sparql_ingest::core::{ColumnType, TargetSchema};
//! use sparql_ingest::execution::QueryExecutor;
//! use sparql_ingest::querying::StoreEngine;
//! use sparql_ingest::sink::MemorySink;
//!
//! fn example() -> sparql_ingest::Result<()> {
//!     let mut engine = StoreEngine::new();
//!     engine.mount_turtle(
//!         "http://localhost/dataset",
//!         r#"<http://example.org/alice> <http://example.org/age> 30 ."#,
//!     )?;
//!
//!     let schema = TargetSchema::new([("age", ColumnType::Integer)])?;
//!     let mut sink = MemorySink::new();
//!     QueryExecutor::new(engine).execute(
//!         "http://localhost/dataset",
//!         "SELECT ?age WHERE { ?s <http://example.org/age> ?age }",
//!         &schema,
//!         &mut sink,
//!     )?;
//!     assert_eq!(sink.records().len(), 1);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::return_self_not_must_use)]

/// Core data structures and types
pub mod core;

/// Job configuration
pub mod config;

/// Result validation, coercion and query execution
pub mod execution;

/// Job lifecycle
pub mod job;

/// SPARQL engines
pub mod querying;

/// Output sinks
pub mod sink;

pub mod error;

// Re-export commonly used types
pub use error::{CoercionError, Error, MissingColumnError, Result};
