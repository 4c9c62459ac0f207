//! Config Loading Tests

use sparql_ingest::config::{ColumnConfig, InputConfig};
use sparql_ingest::core::ColumnType;
use sparql_ingest::Error;
use std::fs;
use std::time::Duration;

const JOB_TOML: &str = r#"
endpoint = "http://localhost:3030/dataset"
query = "SELECT ?name ?age ?at WHERE { ?p <http://example.org/name> ?name }"
timeout_secs = 30

[[columns]]
name = "name"
type = "string"

[[columns]]
name = "age"
type = "long"

[[columns]]
name = "at"
type = "timestamp"
"#;

const JOB_JSON: &str = r#"{
  "endpoint": "http://localhost:3030/dataset",
  "query": "SELECT ?score WHERE { ?p <http://example.org/score> ?score }",
  "columns": [ { "name": "score", "type": "double" } ],
  "auth_token": "abc"
}"#;

#[test]
fn test_toml_job() {
    let config = InputConfig::from_toml_str(JOB_TOML).unwrap();

    assert_eq!(config.endpoint, "http://localhost:3030/dataset");
    assert_eq!(
        config.columns,
        vec![
            ColumnConfig::new("name", ColumnType::String),
            ColumnConfig::new("age", ColumnType::Integer),
            ColumnConfig::new("at", ColumnType::Timestamp),
        ]
    );
    let schema = config.schema().unwrap();
    assert_eq!(schema.names().collect::<Vec<_>>(), vec!["name", "age", "at"]);
    assert_eq!(config.http_options().timeout, Some(Duration::from_secs(30)));
    assert_eq!(config.http_options().auth_token, None);
}

#[test]
fn test_json_job() {
    let config = InputConfig::from_json_str(JOB_JSON).unwrap();

    assert_eq!(config.columns, vec![ColumnConfig::new("score", ColumnType::Float)]);
    assert_eq!(config.timeout_secs, None);
    assert_eq!(config.http_options().auth_token.as_deref(), Some("abc"));
}

#[test]
fn test_job_files_by_extension() {
    let dir = std::env::temp_dir().join(format!("sparql_ingest_config_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let toml_path = dir.join("job.toml");
    let json_path = dir.join("job.json");
    fs::write(&toml_path, JOB_TOML).unwrap();
    fs::write(&json_path, JOB_JSON).unwrap();

    assert_eq!(InputConfig::from_file(&toml_path).unwrap().columns.len(), 3);
    assert_eq!(InputConfig::from_file(&json_path).unwrap().columns.len(), 1);

    let missing = InputConfig::from_file(dir.join("absent.toml"));
    assert!(matches!(missing, Err(Error::InvalidConfig(_))));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_settings_are_rejected() {
    let no_query = r#"
endpoint = "http://localhost:3030/dataset"
query = "   "
columns = [{ name = "a", type = "string" }]
"#;
    match InputConfig::from_toml_str(no_query) {
        Err(Error::InvalidConfig(msg)) => assert!(msg.contains("query")),
        other => panic!("expected config error, got {:?}", other),
    }

    let no_columns = r#"{ "endpoint": "http://e", "query": "SELECT * {}", "columns": [] }"#;
    assert!(matches!(InputConfig::from_json_str(no_columns), Err(Error::InvalidConfig(_))));

    let no_endpoint = r#"{ "query": "SELECT * {}", "columns": [] }"#;
    assert!(matches!(InputConfig::from_json_str(no_endpoint), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_unknown_column_type_is_rejected() {
    let text = r#"
endpoint = "http://localhost:3030/dataset"
query = "SELECT ?a WHERE { ?a ?b ?c }"
columns = [{ name = "a", type = "blob" }]
"#;
    assert!(matches!(InputConfig::from_toml_str(text), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_duplicate_columns_are_rejected() {
    let config = InputConfig::new(
        "http://localhost:3030/dataset",
        "SELECT ?a WHERE { ?a ?b ?c }",
        vec![ColumnConfig::new("a", ColumnType::String), ColumnConfig::new("a", ColumnType::Integer)],
    );
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
}
