//! Query parser - converts query text into an expression tree.
//!
//! The parser works directly on string spans. At each level it strips one
//! pair of enclosing parentheses, then splits on the left-most `" OR "` at
//! nesting depth zero, then on the left-most `" AND "`, then handles a
//! `"NOT "` prefix, then a comparison (`" = "`, `" > "`, `" < "` in that
//! order), and finally treats what is left as a boolean constant or a field
//! name. Keywords are case-sensitive and operators need exactly one space on
//! each side.
//!
//! Parsing is total. An empty span, or a span wrapped in parentheses that do
//! not balance, becomes a constant-false expression;
//! [`Parser::parse_with_warnings`] reports where that happened. A stray
//! parenthesis anywhere else is ordinary text.

pub mod warning;

pub use warning::ParseWarning;

use crate::expression::Expression;
use crate::value::coerce::{parse_bool, parse_literal};
use crate::value::Value;

const OR_OPERATOR: &str = " OR ";
const AND_OPERATOR: &str = " AND ";
const NOT_PREFIX: &str = "NOT ";

/// Comparison operators in match priority order
const COMPARISON_OPERATORS: [(&str, Comparison); 3] = [
    (" = ", Comparison::Equals),
    (" > ", Comparison::GreaterThan),
    (" < ", Comparison::LessThan),
];

#[derive(Debug, Clone, Copy)]
enum Comparison {
    Equals,
    GreaterThan,
    LessThan,
}

impl Comparison {
    fn build(self, field: &str, value: Value) -> Expression {
        match self {
            Comparison::Equals => Expression::equals(field, value),
            Comparison::GreaterThan => Expression::greater_than(field, value),
            Comparison::LessThan => Expression::less_than(field, value),
        }
    }
}

/// Query parser
#[derive(Debug, Default, Clone, Copy)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a query. Never fails; malformed input yields an expression that
    /// is false for every record.
    pub fn parse(&self, query: &str) -> Expression {
        self.parse_with_warnings(query).0
    }

    /// Parse a query and also return the diagnostics collected on the way.
    ///
    /// The expression is identical to the one [`Parser::parse`] returns.
    pub fn parse_with_warnings(&self, query: &str) -> (Expression, Vec<ParseWarning>) {
        let mut state = ParseState::default();
        let expr = state.parse_span(query, None);
        (expr, state.warnings)
    }
}

#[derive(Default)]
struct ParseState {
    warnings: Vec<ParseWarning>,
}

impl ParseState {
    fn parse_span(&mut self, span: &str, enclosing: Option<&str>) -> Expression {
        let span = span.trim();

        if span.is_empty() {
            let warning = match enclosing {
                None => ParseWarning::EmptyQuery,
                Some(enclosing) => ParseWarning::EmptySubexpression {
                    enclosing: enclosing.to_string(),
                },
            };
            return self.degrade(warning);
        }

        if span.starts_with('(') && span.ends_with(')') {
            if nesting_depth(span) != 0 {
                return self.degrade(ParseWarning::UnbalancedParentheses {
                    span: span.to_string(),
                });
            }
            if let Some(inner) = strip_enclosing_parens(span) {
                return self.parse_span(inner, Some(span));
            }
        }

        // OR binds loosest, so it is split first
        if let Some(index) = find_split_index(span, OR_OPERATOR) {
            let left = self.parse_span(&span[..index], Some(span));
            let right = self.parse_span(&span[index + OR_OPERATOR.len()..], Some(span));
            return Expression::or(left, right);
        }

        if let Some(index) = find_split_index(span, AND_OPERATOR) {
            let left = self.parse_span(&span[..index], Some(span));
            let right = self.parse_span(&span[index + AND_OPERATOR.len()..], Some(span));
            return Expression::and(left, right);
        }

        if let Some(rest) = span.strip_prefix(NOT_PREFIX) {
            return Expression::not_expr(self.parse_span(rest, Some(span)));
        }

        self.check_keyword_case(span);

        for (operator, comparison) in COMPARISON_OPERATORS {
            if let Some(index) = span.find(operator) {
                let field = span[..index].trim();
                let value = parse_literal(&span[index + operator.len()..]);
                return comparison.build(field, value);
            }
        }

        match parse_bool(span) {
            Some(b) => Expression::literal(b),
            None => Expression::variable(span),
        }
    }

    fn degrade(&mut self, warning: ParseWarning) -> Expression {
        log::debug!("{}", warning);
        self.warnings.push(warning);
        Expression::never()
    }

    /// Record keywords that were written in the wrong case and will be read
    /// as part of a field name or operand
    fn check_keyword_case(&mut self, span: &str) {
        let upper = span.to_ascii_uppercase();
        for (operator, keyword) in [(AND_OPERATOR, "AND"), (OR_OPERATOR, "OR")] {
            if upper.contains(operator) && !span.contains(operator) {
                self.warn_keyword(keyword, span);
            }
        }
        if upper.starts_with(NOT_PREFIX) && !span.starts_with(NOT_PREFIX) {
            self.warn_keyword("NOT", span);
        }
    }

    fn warn_keyword(&mut self, keyword: &'static str, span: &str) {
        let warning = ParseWarning::CaseSensitiveKeyword {
            keyword,
            span: span.to_string(),
        };
        log::debug!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Find the left-most occurrence of `operator` outside any parentheses.
fn find_split_index(span: &str, operator: &str) -> Option<usize> {
    let bytes = span.as_bytes();
    let op = operator.as_bytes();
    if bytes.len() < op.len() {
        return None;
    }

    let mut level: i32 = 0;
    for i in 0..=bytes.len() - op.len() {
        match bytes[i] {
            b'(' => level += 1,
            b')' => level -= 1,
            _ if level == 0 && &bytes[i..i + op.len()] == op => return Some(i),
            _ => {}
        }
    }
    None
}

/// Parenthesis depth left open at the end of the span
fn nesting_depth(span: &str) -> i32 {
    span.bytes().fold(0, |level, b| match b {
        b'(' => level + 1,
        b')' => level - 1,
        _ => level,
    })
}

/// Interior of the span if one pair of parentheses encloses all of it.
///
/// `(a) OR (b)` starts and ends with parentheses that belong to different
/// groups, which is detected by the depth returning to zero before the last
/// character.
fn strip_enclosing_parens(span: &str) -> Option<&str> {
    if !(span.starts_with('(') && span.ends_with(')')) {
        return None;
    }

    let last = span.len() - 1;
    let mut level: i32 = 0;
    for (i, b) in span.bytes().enumerate() {
        match b {
            b'(' => level += 1,
            b')' => level -= 1,
            _ => {}
        }
        if level == 0 && i < last {
            return None;
        }
    }
    Some(&span[1..last])
}

/// Parse a query with a default parser
pub fn parse(query: &str) -> Expression {
    Parser::new().parse(query)
}
