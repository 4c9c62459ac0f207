//! SPARQL query execution collaborators.
//!
//! - [`query_processing`] defines the engine and execution-handle traits
//! - [`http_endpoint`] talks to remote SPARQL 1.1 Protocol endpoints
//! - [`oxigraph_adapter`] answers queries from in-process Oxigraph stores

pub mod http_endpoint;
pub mod oxigraph_adapter;
pub mod query_processing;

pub use http_endpoint::{HttpOptions, HttpSparqlEngine};
pub use oxigraph_adapter::StoreEngine;
pub use query_processing::{QueryExecution, SparqlEngine};
