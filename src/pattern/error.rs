//! Compile-time errors for the pattern grammar.
//!
//! Parsing is the only fallible stage; evaluation of a compiled pattern
//! is total. Every variant carries the 0-based character offset where
//! the expectation was violated.

use thiserror::Error;

/// A structural grammar violation in a pattern string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternSyntaxError {
    /// A specific token was required and not found
    #[error("expected `{expected}` at character {offset}")]
    Expected {
        /// The token the parser was looking for
        expected: &'static str,
        /// Offset where it should have appeared
        offset: usize,
    },

    /// A leaf was required but the input is not an identifier
    #[error("expected a type name at character {offset}")]
    ExpectedTypeName {
        /// Offset of the offending character
        offset: usize,
    },

    /// Bracket contents that resolve to no cardinality (a bare `..`,
    /// or an unrepresentably large bound)
    #[error("invalid range at character {offset}")]
    InvalidRange {
        /// Offset within or just past the offending range text
        offset: usize,
    },
}

impl PatternSyntaxError {
    /// 0-based character offset of the violation.
    pub fn offset(&self) -> usize {
        match self {
            PatternSyntaxError::Expected { offset, .. }
            | PatternSyntaxError::ExpectedTypeName { offset }
            | PatternSyntaxError::InvalidRange { offset } => *offset,
        }
    }

    /// The token the parser expected, when one can be named.
    pub fn expected_token(&self) -> Option<&'static str> {
        match self {
            PatternSyntaxError::Expected { expected, .. } => Some(expected),
            PatternSyntaxError::ExpectedTypeName { .. } => Some("type name"),
            PatternSyntaxError::InvalidRange { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_offset_accessor() {
        let err = PatternSyntaxError::Expected {
            expected: "]",
            offset: 7,
        };
        assert_eq!(err.offset(), 7);
        assert_eq!(err.expected_token(), Some("]"));

        let err = PatternSyntaxError::InvalidRange { offset: 4 };
        assert_eq!(err.offset(), 4);
        assert_eq!(err.expected_token(), None);
    }

    #[test]
    fn test_display_embeds_position() {
        let err = PatternSyntaxError::Expected {
            expected: ")",
            offset: 12,
        };
        assert_eq!(err.to_string(), "expected `)` at character 12");

        let err = PatternSyntaxError::ExpectedTypeName { offset: 0 };
        assert_eq!(err.to_string(), "expected a type name at character 0");
    }
}
