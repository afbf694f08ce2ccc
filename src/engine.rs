//! Filter engine - applies a query to a sequence of records.
//!
//! [`QueryEngine::filter`] parses the query on every call. Callers that run
//! the same query repeatedly can [`QueryEngine::compile`] it once and reuse
//! the resulting [`CompiledQuery`].

use crate::expression::Expression;
use crate::parser::{ParseWarning, Parser};
use crate::value::Context;

/// A parsed query ready to be applied to records
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    source: String,
    expression: Expression,
    warnings: Vec<ParseWarning>,
    /// Result for every record when the query reads no fields
    constant: Option<bool>,
}

impl CompiledQuery {
    fn new(source: &str, expression: Expression, warnings: Vec<ParseWarning>) -> Self {
        let constant = expression
            .is_constant()
            .then(|| expression.evaluate(&Context::new()));
        Self {
            source: source.to_string(),
            expression,
            warnings,
            constant,
        }
    }

    /// The query text this was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Diagnostics collected while parsing
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Whether some part of the query was replaced by constant false
    pub fn is_degraded(&self) -> bool {
        self.warnings.iter().any(ParseWarning::degrades_to_false)
    }

    /// Check a single record
    pub fn matches(&self, record: &Context) -> bool {
        match self.constant {
            Some(result) => result,
            None => self.expression.evaluate(record),
        }
    }

    /// Matching records, in input order
    pub fn apply<'a>(&self, records: &'a [Context]) -> Vec<&'a Context> {
        let matched: Vec<&Context> = match self.constant {
            Some(true) => records.iter().collect(),
            Some(false) => Vec::new(),
            None => records.iter().filter(|r| self.matches(r)).collect(),
        };
        log::debug!(
            "Query '{}' matched {} of {} records",
            self.source,
            matched.len(),
            records.len()
        );
        matched
    }

    /// Number of matching records
    pub fn count(&self, records: &[Context]) -> usize {
        match self.constant {
            Some(true) => records.len(),
            Some(false) => 0,
            None => records.iter().filter(|r| self.matches(r)).count(),
        }
    }
}

/// Engine that filters records with query strings
#[derive(Debug, Default, Clone)]
pub struct QueryEngine {
    parser: Parser,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    /// Parse a query once for repeated use
    pub fn compile(&self, query: &str) -> CompiledQuery {
        let (expression, warnings) = self.parser.parse_with_warnings(query);
        if !warnings.is_empty() {
            log::debug!("Query '{}' parsed with {} warning(s)", query, warnings.len());
        }
        CompiledQuery::new(query, expression, warnings)
    }

    /// Records matching `query`, cloned in input order.
    ///
    /// Returns an empty vector when nothing matches, including when the
    /// query is malformed.
    pub fn filter(&self, records: &[Context], query: &str) -> Vec<Context> {
        self.compile(query)
            .apply(records)
            .into_iter()
            .cloned()
            .collect()
    }
}

/// Filter records with a default engine
pub fn filter(records: &[Context], query: &str) -> Vec<Context> {
    QueryEngine::new().filter(records, query)
}
