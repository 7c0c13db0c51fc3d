// File: crates/plot-expr/src/error.rs
// Summary: Error type shared by the tokenizer, identifier screen, and parser.

use thiserror::Error;

/// Anything that can go wrong between raw text and an evaluable AST.
///
/// Positions are byte offsets into the source string.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ExprError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at offset {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number '{text}' at offset {pos}")]
    InvalidNumber { text: String, pos: usize },

    #[error("identifier '{name}' is not allowed")]
    DisallowedIdentifier { name: String, pos: usize },

    #[error("attribute access is not allowed ('.' after '{name}' at offset {pos})")]
    AttributeAccess { name: String, pos: usize },

    #[error("syntax error at offset {pos}: {message}")]
    Syntax { pos: usize, message: String },

    #[error("expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("function '{name}' expects {expected} argument(s), got {got}")]
    Arity { name: String, expected: usize, got: usize },

    #[error("'{name}' is a function and must be called, e.g. {name}(x)")]
    NotAValue { name: String },

    #[error("'{name}' is not a function")]
    NotCallable { name: String },

    #[error("unknown function '{0}' in allow-list")]
    UnknownFunction(String),
}

impl ExprError {
    pub(crate) fn syntax(pos: usize, message: impl Into<String>) -> Self {
        Self::Syntax { pos, message: message.into() }
    }
}
