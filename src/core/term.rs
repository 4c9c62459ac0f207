//! RDF terms as seen by the coercion layer.

use oxigraph::model::vocab::{rdf, xsd};
use oxigraph::model::Term;
use oxigraph::sparql::QuerySolution;
use std::collections::HashMap;
use std::fmt;

/// A term bound to a result variable.
///
/// Only two kinds matter for coercion: literals, which carry a lexical form
/// and a datatype, and resources (IRIs and blank nodes), which are opaque
/// identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RdfTerm {
    Literal { lexical: String, datatype: String, language: Option<String> },
    Resource(String),
}

/// Borrowed view of a literal term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralRef<'a> {
    pub lexical: &'a str,
    pub datatype: &'a str,
    pub language: Option<&'a str>,
}

impl RdfTerm {
    /// A literal without datatype annotation (`xsd:string`).
    pub fn simple_literal(lexical: impl Into<String>) -> Self {
        Self::typed_literal(lexical, xsd::STRING.as_str())
    }

    pub fn typed_literal(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        RdfTerm::Literal { lexical: lexical.into(), datatype: datatype.into(), language: None }
    }

    pub fn language_literal(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        RdfTerm::Literal {
            lexical: lexical.into(),
            datatype: rdf::LANG_STRING.as_str().to_string(),
            language: Some(language.into()),
        }
    }

    pub fn resource(identifier: impl Into<String>) -> Self {
        RdfTerm::Resource(identifier.into())
    }

    /// Returns the literal parts if this term is a literal.
    pub fn as_literal(&self) -> Option<LiteralRef<'_>> {
        match self {
            RdfTerm::Literal { lexical, datatype, language } => Some(LiteralRef {
                lexical,
                datatype,
                language: language.as_deref(),
            }),
            RdfTerm::Resource(_) => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, RdfTerm::Literal { .. })
    }

    /// Lexical form for literals, full identifier for resources.
    pub fn text(&self) -> &str {
        match self {
            RdfTerm::Literal { lexical, .. } => lexical,
            RdfTerm::Resource(identifier) => identifier,
        }
    }
}

impl fmt::Display for RdfTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl From<&Term> for RdfTerm {
    fn from(term: &Term) -> Self {
        match term {
            Term::NamedNode(node) => RdfTerm::Resource(node.as_str().to_string()),
            // Blank nodes keep their `_:` prefix so they stay distinguishable from IRIs.
            Term::BlankNode(node) => RdfTerm::Resource(node.to_string()),
            Term::Literal(literal) => RdfTerm::Literal {
                lexical: literal.value().to_string(),
                datatype: literal.datatype().as_str().to_string(),
                language: literal.language().map(str::to_string),
            },
            #[allow(unreachable_patterns)]
            other => RdfTerm::Resource(other.to_string()),
        }
    }
}

/// One result row: variable name to bound term.
///
/// Variables left unbound by the query (e.g. under `OPTIONAL`) are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowBinding {
    terms: HashMap<String, RdfTerm>,
}

impl RowBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, variable: impl Into<String>, term: RdfTerm) -> Self {
        self.insert(variable, term);
        self
    }

    pub fn insert(&mut self, variable: impl Into<String>, term: RdfTerm) {
        self.terms.insert(variable.into(), term);
    }

    pub fn get(&self, variable: &str) -> Option<&RdfTerm> {
        self.terms.get(variable)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl From<&QuerySolution> for RowBinding {
    fn from(solution: &QuerySolution) -> Self {
        let mut binding = RowBinding::new();
        for (variable, term) in solution.iter() {
            binding.insert(variable.as_str(), RdfTerm::from(term));
        }
        binding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::{BlankNode, Literal, NamedNode};

    #[test]
    fn test_named_node_is_bare_iri() {
        let term = Term::from(NamedNode::new("http://example.org/thing").unwrap());
        assert_eq!(RdfTerm::from(&term), RdfTerm::resource("http://example.org/thing"));
    }

    #[test]
    fn test_blank_node_keeps_prefix() {
        let term = Term::from(BlankNode::new("b0").unwrap());
        assert_eq!(RdfTerm::from(&term).text(), "_:b0");
    }

    #[test]
    fn test_literal_parts() {
        let term = Term::from(Literal::new_language_tagged_literal("bonjour", "fr").unwrap());
        let converted = RdfTerm::from(&term);
        let literal = converted.as_literal().unwrap();
        assert_eq!(literal.lexical, "bonjour");
        assert_eq!(literal.language, Some("fr"));
        assert_eq!(literal.datatype, rdf::LANG_STRING.as_str());

        let typed = Term::from(Literal::new_typed_literal("42", xsd::INTEGER));
        let converted = RdfTerm::from(&typed);
        assert_eq!(converted.as_literal().unwrap().datatype, xsd::INTEGER.as_str());
        assert!(converted.is_literal());
    }

    #[test]
    fn test_row_binding_lookup() {
        let row = RowBinding::new()
            .with("name", RdfTerm::simple_literal("Alice"))
            .with("page", RdfTerm::resource("http://example.org/alice"));
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("name").map(RdfTerm::text), Some("Alice"));
        assert!(row.get("age").is_none());
    }
}
