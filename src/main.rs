//! sparql-ingest CLI - Run a SPARQL SELECT query and write typed records.
//!
//! Usage:
//!   sparql-ingest --config job.toml --output people.csv --format csv
//!   sparql-ingest --endpoint http://localhost:3030/ds --query-file q.rq --column name:string --column age:long

use clap::{Parser, ValueEnum};
use log::info;
use sparql_ingest::config::{ColumnConfig, InputConfig};
use sparql_ingest::job::SparqlInput;
use sparql_ingest::querying::HttpSparqlEngine;
use sparql_ingest::sink::{CsvSink, JsonLinesSink, RecordSink};
use sparql_ingest::{Error, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Jsonl,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "sparql-ingest")]
#[command(about = "Stream SPARQL SELECT results into typed records")]
struct Args {
    /// Job config file (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SPARQL endpoint URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// SPARQL query text
    #[arg(short, long, conflicts_with = "query_file")]
    query: Option<String>,

    /// File containing the SPARQL query
    #[arg(long)]
    query_file: Option<PathBuf>,

    /// Output column as name:type (long, double, timestamp, string); repeatable
    #[arg(long = "column", value_name = "NAME:TYPE")]
    columns: Vec<ColumnConfig>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Jsonl)]
    format: OutputFormat,

    /// HTTP request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn build_config(args: &Args) -> Result<InputConfig> {
    let mut config = match &args.config {
        Some(path) => InputConfig::from_file(path)?,
        None => InputConfig::new(String::new(), String::new(), Vec::new()),
    };

    if let Some(endpoint) = &args.endpoint {
        config.endpoint.clone_from(endpoint);
    }
    if let Some(query) = &args.query {
        config.query.clone_from(query);
    }
    if let Some(path) = &args.query_file {
        config.query = fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
    }
    if !args.columns.is_empty() {
        config.columns.clone_from(&args.columns);
    }
    if args.timeout_secs.is_some() {
        config.timeout_secs = args.timeout_secs;
    }

    config.validate()?;
    Ok(config)
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    })
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;
    let schema = config.schema()?;

    let writer = open_output(args.output.as_ref())?;
    let mut sink: Box<dyn RecordSink> = match args.format {
        OutputFormat::Jsonl => Box::new(JsonLinesSink::new(writer, &schema)),
        OutputFormat::Csv => Box::new(CsvSink::new(writer, &schema)),
    };

    let input = SparqlInput::new(HttpSparqlEngine::new(config.http_options())?);
    input.transaction(&config, &mut sink)?;
    info!("Done");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
