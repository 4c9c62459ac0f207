//! Job lifecycle around a single SPARQL ingestion task.
//!
//! A job is one transaction: the schema is built from configuration, the
//! task count is fixed to one, the task runs, and an empty [`ConfigDiff`]
//! is returned for resume bookkeeping.

use crate::config::InputConfig;
use crate::core::TargetSchema;
use crate::error::{Error, Result};
use crate::execution::QueryExecutor;
use crate::querying::query_processing::SparqlEngine;
use crate::sink::RecordSink;
use log::info;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// Settings changes to carry into the next run. Always empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigDiff(Map<String, JsonValue>);

impl ConfigDiff {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of one completed task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskReport {
    pub records: u64,
}

/// The SPARQL input job.
pub struct SparqlInput<E: SparqlEngine> {
    executor: QueryExecutor<E>,
}

impl<E: SparqlEngine> SparqlInput<E> {
    pub const TASK_COUNT: usize = 1;

    pub fn new(engine: E) -> Self {
        Self { executor: QueryExecutor::new(engine) }
    }

    pub fn with_executor(executor: QueryExecutor<E>) -> Self {
        Self { executor }
    }

    /// Validates `config`, builds its schema, and runs the job.
    pub fn transaction<S: RecordSink + ?Sized>(
        &self,
        config: &InputConfig,
        sink: &mut S,
    ) -> Result<ConfigDiff> {
        config.validate()?;
        let schema = config.schema()?;
        self.resume(config, &schema, Self::TASK_COUNT, sink)
    }

    /// Runs every task of a job whose schema is already known.
    pub fn resume<S: RecordSink + ?Sized>(
        &self,
        config: &InputConfig,
        schema: &TargetSchema,
        task_count: usize,
        sink: &mut S,
    ) -> Result<ConfigDiff> {
        if task_count != Self::TASK_COUNT {
            return Err(Error::InvalidConfig(format!(
                "SPARQL input runs exactly {} task, got {}",
                Self::TASK_COUNT,
                task_count
            )));
        }

        let mut reports = Vec::with_capacity(task_count);
        for task_index in 0..task_count {
            reports.push(self.run(config, schema, task_index, sink)?);
        }
        self.cleanup(config, schema, task_count, &reports);
        Ok(ConfigDiff::default())
    }

    /// Runs one task: executes the query and streams its rows into `sink`.
    pub fn run<S: RecordSink + ?Sized>(
        &self,
        config: &InputConfig,
        schema: &TargetSchema,
        task_index: usize,
        sink: &mut S,
    ) -> Result<TaskReport> {
        info!("Starting task {} ({} columns)", task_index, schema.len());
        let records = self.executor.execute(&config.endpoint, &config.query, schema, sink)?;
        Ok(TaskReport { records })
    }

    pub fn cleanup(
        &self,
        _config: &InputConfig,
        _schema: &TargetSchema,
        _task_count: usize,
        _reports: &[TaskReport],
    ) {
    }

    /// Schema inference is not supported; the diff is always empty.
    pub fn guess(&self, _config: &InputConfig) -> ConfigDiff {
        ConfigDiff::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnConfig;
    use crate::core::{ColumnType, Value};
    use crate::execution::Coercer;
    use chrono::FixedOffset;
    use crate::querying::StoreEngine;
    use crate::sink::MemorySink;

    const ENDPOINT: &str = "http://localhost/dataset";

    fn input() -> SparqlInput<StoreEngine> {
        let mut engine = StoreEngine::new();
        engine
            .mount_turtle(ENDPOINT, r#"<http://example.org/a> <http://example.org/p> "1" ."#)
            .unwrap();
        SparqlInput::new(engine)
    }

    fn config() -> InputConfig {
        InputConfig::new(
            ENDPOINT,
            "SELECT ?v WHERE { ?s <http://example.org/p> ?v }",
            vec![ColumnConfig::new("v", ColumnType::Integer)],
        )
    }

    #[test]
    fn test_transaction_returns_empty_diff() {
        let mut sink = MemorySink::new();
        let diff = input().transaction(&config(), &mut sink).unwrap();
        assert!(diff.is_empty());
        assert_eq!(sink.records().len(), 1);
        assert_eq!(sink.finish_calls(), 1);
    }

    #[test]
    fn test_resume_rejects_multiple_tasks() {
        let config = config();
        let schema = config.schema().unwrap();
        let mut sink = MemorySink::new();
        let result = input().resume(&config, &schema, 2, &mut sink);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
        assert!(!sink.is_finished());
    }

    #[test]
    fn test_run_reports_records() {
        let config = config();
        let schema = config.schema().unwrap();
        let mut sink = MemorySink::new();
        let report = input().run(&config, &schema, 0, &mut sink).unwrap();
        assert_eq!(report, TaskReport { records: 1 });
    }

    #[test]
    fn test_executor_zone_reaches_tasks() {
        let mut engine = StoreEngine::new();
        engine
            .mount_turtle(ENDPOINT, r#"<http://example.org/a> <http://example.org/at> "2023-01-15T19:30:00" ."#)
            .unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let input =
            SparqlInput::with_executor(QueryExecutor::with_coercer(engine, Coercer::with_default_zone(tokyo)));
        let config = InputConfig::new(
            ENDPOINT,
            "SELECT ?at WHERE { ?s <http://example.org/at> ?at }",
            vec![ColumnConfig::new("at", ColumnType::Timestamp)],
        );
        let mut sink = MemorySink::new();

        input.transaction(&config, &mut sink).unwrap();

        assert_eq!(sink.records()[0].values(), &[Value::Timestamp(1_673_778_600_000)]);
    }

    #[test]
    fn test_guess_is_noop() {
        assert!(input().guess(&config()).is_empty());
        assert_eq!(TaskReport::default().records, 0);
    }
}
