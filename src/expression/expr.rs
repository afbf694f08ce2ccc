//! Expression tree definitions.

use crate::value::{is_truthy, Context, Value};
use std::fmt;

/// Expression tree node
///
/// Comparison nodes hold the field name on the left and an operand that was
/// fixed when the query was parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Constant value, evaluated by truthiness
    Literal(Value),

    /// Field reference, evaluated by the truthiness of the field's value
    Variable(String),

    /// `field = value`
    Equals { field: String, value: Value },

    /// `field > value`
    GreaterThan { field: String, value: Value },

    /// `field < value`
    LessThan { field: String, value: Value },

    And(Box<Expression>, Box<Expression>),

    Or(Box<Expression>, Box<Expression>),

    Not(Box<Expression>),
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// Constant-false expression, the result of every malformed query
    pub fn never() -> Self {
        Expression::Literal(Value::Boolean(false))
    }

    /// Create a field reference
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }

    /// Create an equality comparison
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expression::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a greater-than comparison
    pub fn greater_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expression::GreaterThan {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a less-than comparison
    pub fn less_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expression::LessThan {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an AND expression
    pub fn and(left: Expression, right: Expression) -> Self {
        Expression::And(Box::new(left), Box::new(right))
    }

    /// Create an OR expression
    pub fn or(left: Expression, right: Expression) -> Self {
        Expression::Or(Box::new(left), Box::new(right))
    }

    /// Create a NOT expression
    pub fn not_expr(operand: Expression) -> Self {
        Expression::Not(Box::new(operand))
    }

    /// Raw value a `Variable` node refers to in the given record.
    ///
    /// Returns `None` for other node kinds and for missing fields.
    pub fn variable_value<'a>(&self, context: &'a Context) -> Option<&'a Value> {
        match self {
            Expression::Variable(name) => context.get(name),
            _ => None,
        }
    }

    /// Field names this expression reads, left to right, without duplicates
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, fields: &mut Vec<&'a str>) {
        match self {
            Expression::Literal(_) => {}
            Expression::Variable(name)
            | Expression::Equals { field: name, .. }
            | Expression::GreaterThan { field: name, .. }
            | Expression::LessThan { field: name, .. } => {
                if !fields.contains(&name.as_str()) {
                    fields.push(name.as_str());
                }
            }
            Expression::And(left, right) | Expression::Or(left, right) => {
                left.collect_fields(fields);
                right.collect_fields(fields);
            }
            Expression::Not(operand) => operand.collect_fields(fields),
        }
    }

    /// Check if this expression reads no fields
    pub fn is_constant(&self) -> bool {
        match self {
            Expression::Literal(_) => true,
            Expression::Variable(_)
            | Expression::Equals { .. }
            | Expression::GreaterThan { .. }
            | Expression::LessThan { .. } => false,
            Expression::And(left, right) | Expression::Or(left, right) => {
                left.is_constant() && right.is_constant()
            }
            Expression::Not(operand) => operand.is_constant(),
        }
    }

    fn is_connective(&self) -> bool {
        matches!(self, Expression::And(..) | Expression::Or(..))
    }

    /// Render `field op value`. String operands that the parser would trim or
    /// unquote are wrapped in one extra pair of quotes.
    fn fmt_comparison(
        f: &mut fmt::Formatter<'_>,
        field: &str,
        operator: &str,
        value: &Value,
    ) -> fmt::Result {
        match value {
            Value::String(text) if needs_quotes(text) => {
                write!(f, "{} {} '{}'", field, operator, text)
            }
            _ => write!(f, "{} {} {}", field, operator, value),
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_connective() {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

fn needs_quotes(text: &str) -> bool {
    let quoted = text.len() >= 2
        && ((text.starts_with('\'') && text.ends_with('\''))
            || (text.starts_with('"') && text.ends_with('"')));
    text.is_empty() || text.trim() != text || quoted
}

/// Renders the tree in query syntax. Nested AND/OR operands are
/// parenthesised, so re-parsing the text of a parsed query yields a tree that
/// evaluates the same on every record. Literals render by truthiness since
/// the grammar only has boolean constants.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{}", is_truthy(value)),
            Expression::Variable(name) => f.write_str(name),
            Expression::Equals { field, value } => Self::fmt_comparison(f, field, "=", value),
            Expression::GreaterThan { field, value } => {
                Self::fmt_comparison(f, field, ">", value)
            }
            Expression::LessThan { field, value } => Self::fmt_comparison(f, field, "<", value),
            Expression::And(left, right) => {
                left.fmt_operand(f)?;
                f.write_str(" AND ")?;
                right.fmt_operand(f)
            }
            Expression::Or(left, right) => {
                left.fmt_operand(f)?;
                f.write_str(" OR ")?;
                right.fmt_operand(f)
            }
            Expression::Not(operand) => {
                f.write_str("NOT ")?;
                operand.fmt_operand(f)
            }
        }
    }
}
