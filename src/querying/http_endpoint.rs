//! HTTP client for remote SPARQL endpoints (Apache Jena Fuseki, Oxigraph server, etc.)
//!
//! Queries are sent with the SPARQL 1.1 Protocol "query via POST with
//! URL-encoded parameters" operation. The response body is parsed as it
//! arrives, so large result sets are never buffered in full.

use crate::core::RowBinding;
use crate::error::{Error, Result};
use crate::querying::query_processing::{check_syntax, QueryExecution, SparqlEngine};
use log::debug;
use oxigraph::sparql::results::{
    QueryResultsFormat, QueryResultsParser, ReaderQueryResultsParserOutput, ReaderSolutionsParser,
};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use std::time::Duration;

const ACCEPT_RESULTS: &str = "application/sparql-results+json, \
     application/sparql-results+xml;q=0.9, \
     text/tab-separated-values;q=0.8";

const USER_AGENT: &str = concat!("sparql-ingest/", env!("CARGO_PKG_VERSION"));

/// Connection options for [`HttpSparqlEngine`].
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    pub timeout: Option<Duration>,
    pub auth_token: Option<String>,
}

/// Engine that sends queries to a SPARQL 1.1 Protocol endpoint.
pub struct HttpSparqlEngine {
    client: Client,
    auth_token: Option<String>,
}

impl HttpSparqlEngine {
    pub fn new(options: HttpOptions) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, auth_token: options.auth_token })
    }
}

impl SparqlEngine for HttpSparqlEngine {
    type Execution = HttpExecution;

    fn execute_select(&self, endpoint: &str, query: &str) -> Result<HttpExecution> {
        check_syntax(query)?;
        let url = Url::parse(endpoint)
            .map_err(|e| Error::InvalidConfig(format!("invalid endpoint '{}': {}", endpoint, e)))?;

        debug!("POST {} ({} bytes of query text)", url, query.len());

        let mut request =
            self.client.post(url).header(ACCEPT, ACCEPT_RESULTS).form(&[("query", query)]);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        let response = request.send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Status { status, body });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let format = results_format(&content_type)?;
        debug!("Endpoint answered {} ({:?})", status, format);

        match QueryResultsParser::from_format(format).for_reader(response)? {
            ReaderQueryResultsParserOutput::Solutions(solutions) => {
                let variables =
                    solutions.variables().iter().map(|v| v.as_str().to_string()).collect();
                Ok(HttpExecution { variables, solutions: Some(solutions) })
            }
            ReaderQueryResultsParserOutput::Boolean(_) => Err(Error::NotSelect),
        }
    }
}

/// Picks the results parser for a response `Content-Type`.
pub fn results_format(content_type: &str) -> Result<QueryResultsFormat> {
    let media_type = content_type.split(';').next().unwrap_or_default().trim().to_lowercase();
    match media_type.as_str() {
        // Some endpoints label SPARQL JSON results as plain JSON.
        "application/json" => Ok(QueryResultsFormat::Json),
        "application/xml" | "text/xml" => Ok(QueryResultsFormat::Xml),
        other => QueryResultsFormat::from_media_type(other).ok_or_else(|| {
            Error::Protocol(format!("unsupported results media type '{}'", content_type))
        }),
    }
}

/// A SELECT result streamed from an HTTP response body.
pub struct HttpExecution {
    variables: Vec<String>,
    solutions: Option<ReaderSolutionsParser<Response>>,
}

impl QueryExecution for HttpExecution {
    fn variables(&self) -> &[String] {
        &self.variables
    }

    fn next_row(&mut self) -> Option<Result<RowBinding>> {
        let solutions = self.solutions.as_mut()?;
        solutions
            .next()
            .map(|solution| solution.map(|s| RowBinding::from(&s)).map_err(Error::from))
    }

    fn close(&mut self) {
        if self.solutions.take().is_some() {
            debug!("Released HTTP result stream");
        }
    }
}

impl Drop for HttpExecution {
    fn drop(&mut self) {
        self.close();
    }
}
