//! Expression trees for filter queries.
//!
//! This module provides:
//! - The expression tree produced by the query parser
//! - Evaluation of a tree against a single record
//! - Rendering a tree back into query text

pub mod eval;
pub mod expr;

pub use eval::{evaluate_expression, ExpressionEvaluator};
pub use expr::Expression;
