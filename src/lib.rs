//! A small boolean query language for filtering flat records.
//!
//! ```
//! use vibeql::{filter, Context, Value};
//!
//! let mut john = Context::new();
//! john.insert("department".to_string(), Value::from("Engineering"));
//! john.insert("age".to_string(), Value::Integer(34));
//!
//! let matched = filter(&[john], "department = Engineering AND age > 30");
//! assert_eq!(matched.len(), 1);
//! ```

pub mod engine;
pub mod expression;
pub mod input;
pub mod parser;
pub mod sample;
pub mod value;

pub use engine::{filter, CompiledQuery, QueryEngine};
pub use expression::Expression;
pub use parser::{parse, ParseWarning, Parser};
pub use value::{Context, Value, ValueKind};
