//! Query Executor
//!
//! This module provides the `QueryExecutor` which runs one SPARQL SELECT
//! query and streams its rows into a [`RecordSink`].
//!
//! # Process
//!
//! 1. Open a query execution handle through a [`SparqlEngine`]
//! 2. Validate the result variables against the target schema, once
//! 3. Coerce each row in schema order and hand it to the sink
//! 4. Close the handle and finalize the sink on every exit path

use crate::core::TargetSchema;
use crate::error::Result;
use crate::execution::coercion::Coercer;
use crate::execution::validator;
use crate::querying::query_processing::{QueryExecution, SparqlEngine};
use crate::sink::RecordSink;
use log::{debug, info};

/// Executor for SPARQL SELECT queries against a typed target schema.
///
/// # Example
///
/// ```ignore
/// let executor = QueryExecutor::new(HttpSparqlEngine::new(HttpOptions::default())?);
/// let mut sink = MemorySink::new();
///
/// let emitted = executor.execute(endpoint, query, &schema, &mut sink)?;
/// println!("Emitted {} records", emitted);
/// ```
pub struct QueryExecutor<E: SparqlEngine> {
    engine: E,
    coercer: Coercer,
}

impl<E: SparqlEngine> QueryExecutor<E> {
    /// Creates an executor that reads offset-less timestamps as UTC.
    pub fn new(engine: E) -> Self {
        Self::with_coercer(engine, Coercer::utc())
    }

    pub fn with_coercer(engine: E, coercer: Coercer) -> Self {
        Self { engine, coercer }
    }

    /// Runs `query` against `endpoint` and emits one record per result row.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Endpoint reference understood by the engine
    /// * `query` - SPARQL SELECT query text
    /// * `schema` - Columns to emit, in output order
    /// * `sink` - Receives the records; finalized exactly once
    ///
    /// # Returns
    ///
    /// The number of records emitted.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered:
    /// - Engine errors opening or reading the result
    /// - `MissingColumn` if a schema column is not a result variable
    /// - `Coercion` if a bound term does not fit its column type
    /// - Sink errors
    ///
    /// Rows before a failing row have already been emitted; the failing row
    /// and everything after it are not.
    pub fn execute<S: RecordSink + ?Sized>(
        &self,
        endpoint: &str,
        query: &str,
        schema: &TargetSchema,
        sink: &mut S,
    ) -> Result<u64> {
        info!("Executing SPARQL query against {}", endpoint);

        let outcome = self.open_and_drain(endpoint, query, schema, sink);
        let finished = sink.finish();

        let emitted = outcome?;
        finished?;
        info!("Emitted {} records", emitted);
        Ok(emitted)
    }

    fn open_and_drain<S: RecordSink + ?Sized>(
        &self,
        endpoint: &str,
        query: &str,
        schema: &TargetSchema,
        sink: &mut S,
    ) -> Result<u64> {
        let mut execution = self.engine.execute_select(endpoint, query)?;
        debug!("Query returned variables {:?}", execution.variables());

        let outcome = self.drain(&mut execution, schema, sink);
        execution.close();
        outcome
    }

    fn drain<S: RecordSink + ?Sized>(
        &self,
        execution: &mut E::Execution,
        schema: &TargetSchema,
        sink: &mut S,
    ) -> Result<u64> {
        validator::validate(execution.variables(), schema)?;

        let mut emitted = 0u64;
        while let Some(row) = execution.next_row() {
            let record = self.coercer.coerce_row(schema, &row?)?;
            sink.add_record(record)?;
            emitted += 1;
        }
        Ok(emitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ColumnType, RdfTerm, RowBinding, Value};
    use crate::error::Error;
    use crate::sink::MemorySink;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Engine replaying canned rows and recording how often its handle closes.
    struct ScriptedEngine {
        variables: Vec<String>,
        rows: Vec<RowBinding>,
        closes: Rc<Cell<usize>>,
    }

    struct ScriptedExecution {
        variables: Vec<String>,
        rows: std::vec::IntoIter<RowBinding>,
        closes: Rc<Cell<usize>>,
        closed: bool,
    }

    impl SparqlEngine for ScriptedEngine {
        type Execution = ScriptedExecution;

        fn execute_select(&self, _endpoint: &str, _query: &str) -> Result<ScriptedExecution> {
            Ok(ScriptedExecution {
                variables: self.variables.clone(),
                rows: self.rows.clone().into_iter(),
                closes: Rc::clone(&self.closes),
                closed: false,
            })
        }
    }

    impl QueryExecution for ScriptedExecution {
        fn variables(&self) -> &[String] {
            &self.variables
        }

        fn next_row(&mut self) -> Option<Result<RowBinding>> {
            if self.closed {
                return None;
            }
            self.rows.next().map(Ok)
        }

        fn close(&mut self) {
            if !self.closed {
                self.closed = true;
                self.closes.set(self.closes.get() + 1);
            }
        }
    }

    fn engine(rows: Vec<RowBinding>) -> (ScriptedEngine, Rc<Cell<usize>>) {
        let closes = Rc::new(Cell::new(0));
        let engine = ScriptedEngine {
            variables: vec!["name".to_string(), "age".to_string()],
            rows,
            closes: Rc::clone(&closes),
        };
        (engine, closes)
    }

    fn person(name: &str, age: &str) -> RowBinding {
        RowBinding::new()
            .with("name", RdfTerm::simple_literal(name))
            .with("age", RdfTerm::simple_literal(age))
    }

    #[test]
    fn test_success_closes_and_finishes_once() {
        let (engine, closes) = engine(vec![person("Alice", "30"), person("Carol", "41")]);
        let executor = QueryExecutor::new(engine);
        let schema =
            TargetSchema::new([("age", ColumnType::Integer), ("name", ColumnType::String)])
                .unwrap();
        let mut sink = MemorySink::new();

        let emitted = executor.execute("mem:", "SELECT * {}", &schema, &mut sink).unwrap();

        assert_eq!(emitted, 2);
        assert_eq!(closes.get(), 1);
        assert_eq!(sink.finish_calls(), 1);
        assert_eq!(
            sink.records()[0].values(),
            &[Value::Integer(30), Value::String("Alice".into())]
        );
    }

    #[test]
    fn test_missing_column_emits_nothing() {
        let (engine, closes) = engine(vec![person("Alice", "30")]);
        let executor = QueryExecutor::new(engine);
        let schema = TargetSchema::new([("email", ColumnType::String)]).unwrap();
        let mut sink = MemorySink::new();

        let err = executor.execute("mem:", "SELECT * {}", &schema, &mut sink).unwrap_err();

        assert!(matches!(err, Error::MissingColumn(ref e) if e.column_name == "email"));
        assert!(sink.records().is_empty());
        assert_eq!(closes.get(), 1);
        assert_eq!(sink.finish_calls(), 1);
    }

    #[test]
    fn test_coercion_failure_stops_stream() {
        let (engine, closes) =
            engine(vec![person("Alice", "30"), person("Bob", "notanumber"), person("Eve", "5")]);
        let executor = QueryExecutor::new(engine);
        let schema =
            TargetSchema::new([("name", ColumnType::String), ("age", ColumnType::Integer)])
                .unwrap();
        let mut sink = MemorySink::new();

        let err = executor.execute("mem:", "SELECT * {}", &schema, &mut sink).unwrap_err();

        match err {
            Error::Coercion(e) => {
                assert_eq!(e.column_name, "age");
                assert_eq!(e.raw_value, "notanumber");
                assert_eq!(e.target_type, ColumnType::Integer);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(sink.records().len(), 1);
        assert_eq!(closes.get(), 1);
        assert_eq!(sink.finish_calls(), 1);
    }

    #[test]
    fn test_open_failure_still_finishes_sink() {
        struct FailingEngine;
        impl SparqlEngine for FailingEngine {
            type Execution = ScriptedExecution;
            fn execute_select(&self, endpoint: &str, _query: &str) -> Result<ScriptedExecution> {
                Err(Error::UnknownEndpoint(endpoint.to_string()))
            }
        }

        let executor = QueryExecutor::new(FailingEngine);
        let schema = TargetSchema::new([("name", ColumnType::String)]).unwrap();
        let mut sink = MemorySink::new();

        let err = executor.execute("http://down", "SELECT * {}", &schema, &mut sink).unwrap_err();
        assert!(matches!(err, Error::UnknownEndpoint(_)));
        assert_eq!(sink.finish_calls(), 1);
    }
}
