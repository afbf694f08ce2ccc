//! Expression evaluation implementation.
//!
//! Evaluation is total: a missing field, a type mismatch or an operand that
//! cannot be coerced makes the enclosing comparison false instead of failing.

use crate::expression::Expression;
use crate::value::coerce::{is_truthy, loose_eq, numeric_cmp};
use crate::value::{Context, Value};
use std::cmp::Ordering;

/// Evaluator for expressions against one record
pub struct ExpressionEvaluator<'a> {
    /// The record to evaluate against
    context: &'a Context,
}

impl<'a> ExpressionEvaluator<'a> {
    /// Create a new evaluator for a record
    pub fn new(context: &'a Context) -> Self {
        Self { context }
    }

    /// Evaluate an expression and return whether the record satisfies it
    pub fn evaluate(&self, expr: &Expression) -> bool {
        match expr {
            Expression::Literal(value) => is_truthy(value),

            Expression::Variable(name) => self.lookup(name).is_some_and(is_truthy),

            Expression::Equals { field, value } => self.lookup(field).is_some_and(|actual| {
                if actual.kind() != value.kind() {
                    log::trace!(
                        "Comparing {} field '{}' with {} operand '{}'",
                        actual.kind(),
                        field,
                        value.kind(),
                        value
                    );
                }
                loose_eq(actual, value)
            }),

            Expression::GreaterThan { field, value } => {
                self.compare(field, value, |ord| ord == Ordering::Greater)
            }

            Expression::LessThan { field, value } => {
                self.compare(field, value, |ord| ord == Ordering::Less)
            }

            // `&&` and `||` skip the right operand once the result is known
            Expression::And(left, right) => self.evaluate(left) && self.evaluate(right),

            Expression::Or(left, right) => self.evaluate(left) || self.evaluate(right),

            Expression::Not(operand) => !self.evaluate(operand),
        }
    }

    fn lookup(&self, field: &str) -> Option<&'a Value> {
        self.context.get(field)
    }

    /// Order the field's value against the operand and apply a predicate
    fn compare<F>(&self, field: &str, target: &Value, cmp_fn: F) -> bool
    where
        F: FnOnce(Ordering) -> bool,
    {
        let Some(actual) = self.lookup(field) else {
            return false;
        };
        match numeric_cmp(actual, target) {
            Some(ord) => cmp_fn(ord),
            None => {
                log::debug!(
                    "Cannot order {} field '{}' against {} operand '{}'",
                    actual.kind(),
                    field,
                    target.kind(),
                    target
                );
                false
            }
        }
    }
}

impl Expression {
    /// Evaluate this expression against a record
    pub fn evaluate(&self, context: &Context) -> bool {
        evaluate_expression(self, context)
    }
}

/// Helper function to evaluate an expression against a record
pub fn evaluate_expression(expr: &Expression, context: &Context) -> bool {
    ExpressionEvaluator::new(context).evaluate(expr)
}
