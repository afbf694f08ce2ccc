//! Diagnostics reported while parsing a query.
//!
//! Parsing never fails. A malformed query degrades to a constant-false
//! expression, and these warnings explain why a query matches less than it
//! appears to.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    #[error("Empty query matches nothing")]
    EmptyQuery,

    #[error("Empty sub-expression in '{enclosing}' is treated as false")]
    EmptySubexpression { enclosing: String },

    #[error("Unbalanced parentheses in '{span}', expression is treated as false")]
    UnbalancedParentheses { span: String },

    #[error("Keyword '{keyword}' in '{span}' is not uppercase and is read as text")]
    CaseSensitiveKeyword { keyword: &'static str, span: String },
}

impl ParseWarning {
    /// Whether the warning means part of the query became constant false
    pub fn degrades_to_false(&self) -> bool {
        match self {
            ParseWarning::EmptyQuery
            | ParseWarning::EmptySubexpression { .. }
            | ParseWarning::UnbalancedParentheses { .. } => true,
            ParseWarning::CaseSensitiveKeyword { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        assert_eq!(ParseWarning::EmptyQuery.to_string(), "Empty query matches nothing");

        let warning = ParseWarning::UnbalancedParentheses {
            span: "(a = 1".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Unbalanced parentheses in '(a = 1', expression is treated as false"
        );
        assert!(warning.degrades_to_false());

        let warning = ParseWarning::CaseSensitiveKeyword {
            keyword: "AND",
            span: "a = 1 and b = 2".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Keyword 'AND' in 'a = 1 and b = 2' is not uppercase and is read as text"
        );
        assert!(!warning.degrades_to_false());
    }
}
