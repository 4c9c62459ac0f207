//! In-process SPARQL engine backed by Oxigraph stores.
//!
//! Each dataset is an Oxigraph [`Store`] mounted under an endpoint string,
//! so code written against [`SparqlEngine`] can be exercised without a
//! network round trip.
//!
//! # Example
//!
//! ```ignore
//! use sparql_ingest::querying::oxigraph_adapter::StoreEngine;
//! use sparql_ingest::querying::query_processing::{QueryExecution, SparqlEngine};
//!
//! let mut engine = StoreEngine::new();
//! engine.mount_turtle(
//!     "http://localhost/dataset",
//!     r#"<http://example.org/alice> <http://example.org/name> "Alice" ."#,
//! )?;
//!
//! let mut execution = engine.execute_select(
//!     "http://localhost/dataset",
//!     "SELECT ?name WHERE { ?s <http://example.org/name> ?name }",
//! )?;
//! while let Some(row) = execution.next_row() {
//!     println!("name: {:?}", row?.get("name"));
//! }
//! ```

use crate::core::RowBinding;
use crate::error::{Error, Result};
use crate::querying::query_processing::{QueryExecution, SparqlEngine};
use log::debug;
use oxigraph::io::RdfFormat;
use oxigraph::sparql::{QueryResults, SparqlEvaluator};
use oxigraph::store::Store;
use std::collections::HashMap;

/// Engine answering queries from locally mounted Oxigraph stores.
#[derive(Default)]
pub struct StoreEngine {
    datasets: HashMap<String, Store>,
}

impl StoreEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts `store` under `endpoint`, replacing any previous dataset there.
    pub fn mount(&mut self, endpoint: impl Into<String>, store: Store) {
        self.datasets.insert(endpoint.into(), store);
    }

    /// Creates a store from Turtle text and mounts it under `endpoint`.
    pub fn mount_turtle(&mut self, endpoint: impl Into<String>, turtle: &str) -> Result<()> {
        self.mount_data(endpoint, RdfFormat::Turtle, turtle)
    }

    pub fn mount_data(
        &mut self,
        endpoint: impl Into<String>,
        format: RdfFormat,
        data: &str,
    ) -> Result<()> {
        let store = Store::new()?;
        store.load_from_reader(format, data.as_bytes())?;
        let endpoint = endpoint.into();
        debug!("Mounted dataset with {} quads at {}", store.len()?, endpoint);
        self.mount(endpoint, store);
        Ok(())
    }
}

impl SparqlEngine for StoreEngine {
    type Execution = StoreExecution;

    fn execute_select(&self, endpoint: &str, query: &str) -> Result<StoreExecution> {
        let store =
            self.datasets.get(endpoint).ok_or_else(|| Error::UnknownEndpoint(endpoint.to_string()))?;

        let prepared = SparqlEvaluator::new()
            .parse_query(query)
            .map_err(|e| Error::QuerySyntax(e.to_string()))?;

        match prepared.on_store(store).execute()? {
            QueryResults::Solutions(solutions) => {
                let variables =
                    solutions.variables().iter().map(|v| v.as_str().to_string()).collect();
                let rows = solutions
                    .map(|solution| solution.map(|s| RowBinding::from(&s)).map_err(Error::from))
                    .collect::<Result<Vec<_>>>()?;
                Ok(StoreExecution { variables, rows: Some(rows.into_iter()) })
            }
            _ => Err(Error::NotSelect),
        }
    }
}

/// A SELECT result evaluated against a mounted store.
pub struct StoreExecution {
    variables: Vec<String>,
    rows: Option<std::vec::IntoIter<RowBinding>>,
}

impl QueryExecution for StoreExecution {
    fn variables(&self) -> &[String] {
        &self.variables
    }

    fn next_row(&mut self) -> Option<Result<RowBinding>> {
        self.rows.as_mut()?.next().map(Ok)
    }

    fn close(&mut self) {
        self.rows = None;
    }
}
