//! Query Execution Module
//!
//! This module turns a SPARQL result stream into typed output records.
//!
//! # Components
//!
//! - **validator** - Checks the result variables cover the target schema
//! - **coercion** - Converts RDF terms into column values by target type
//! - **QueryExecutor** - Drives one query from open to sink finalization
//!
//! # Example
//!
//! ```ignore
//! use sparql_ingest::execution::QueryExecutor;
//! use sparql_ingest::querying::StoreEngine;
//! use sparql_ingest::sink::MemorySink;
//!
//! let executor = QueryExecutor::new(engine);
//! let mut sink = MemorySink::new();
//! executor.execute("http://localhost/dataset", query, &schema, &mut sink)?;
//! ```

pub mod coercion;
pub mod query_executor;
pub mod validator;

// Re-export main types for convenience
pub use coercion::Coercer;
pub use query_executor::QueryExecutor;
pub use validator::validate;
