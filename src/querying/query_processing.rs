use crate::core::RowBinding;
use crate::error::{Error, Result};
use oxigraph::sparql::SparqlEvaluator;

/// An open, single-pass SELECT result.
///
/// The result variables are known before the first row is read. Rows can
/// only be read front to back, once.
pub trait QueryExecution {
    /// Variable names declared by the result, in result order.
    fn variables(&self) -> &[String];

    /// Next row, or `None` once the result is exhausted or closed.
    fn next_row(&mut self) -> Option<Result<RowBinding>>;

    /// Releases the underlying result. Calling it more than once is a no-op.
    fn close(&mut self);
}

/// Something that can run a SPARQL SELECT query against an endpoint.
pub trait SparqlEngine {
    type Execution: QueryExecution;

    fn execute_select(&self, endpoint: &str, query: &str) -> Result<Self::Execution>;
}

impl<E: SparqlEngine + ?Sized> SparqlEngine for &E {
    type Execution = E::Execution;

    fn execute_select(&self, endpoint: &str, query: &str) -> Result<Self::Execution> {
        (**self).execute_select(endpoint, query)
    }
}

/// Parses `query` locally so syntax errors surface before any request is made.
pub fn check_syntax(query: &str) -> Result<()> {
    SparqlEvaluator::new()
        .parse_query(query)
        .map(|_| ())
        .map_err(|e| Error::QuerySyntax(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_syntax() {
        assert!(check_syntax("SELECT ?s WHERE { ?s ?p ?o }").is_ok());
        assert!(matches!(check_syntax("SELEKT ?s WHERE { ?s ?p ?o }"), Err(Error::QuerySyntax(_))));
    }
}
