// ABOUTME: Error types for evaluation failures, with spec-exact message formats

use thiserror::Error;

/// Errors produced during evaluation. Converted to a `Value::Err` by the
/// evaluator (spec.md §3/§7) — never unwound via `panic!`; an `EvalError`
/// is data, not an exception.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Function '{function}' passed incorrect type for argument {position}. Got {actual}, Expected {expected}.")]
    TypeError {
        function: String,
        expected: String,
        actual: String,
        position: usize,
    },

    #[error("Function '{function}' passed incorrect number of arguments. Got {actual}, Expected {expected}.")]
    ArityError {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("Unbound Symbol '{0}'")]
    UnboundSymbol(String),

    #[error("Cannot operate on non-number!")]
    NotANumber,

    #[error("Division By Zero.")]
    DivisionByZero,

    #[error("Function passed too many arguments. Got {got}, Expected {expected}.")]
    TooManyArguments { got: usize, expected: usize },

    #[error("Function format invalid. Symbol '&' not followed by single symbol.")]
    BadRestFormal,

    #[error("S-Expression starts with incorrect type. Got {got}, Expected {expected}.")]
    BadSexprHead { got: String, expected: String },

    #[error("Function '{function}' passed {{}} for argument {position}.")]
    EmptyArgument { function: String, position: usize },

    #[error("Value is not callable")]
    NotCallable,

    #[error("{0}")]
    Message(String),
}

impl EvalError {
    pub fn type_error(function: &str, expected: &str, actual: &str, position: usize) -> Self {
        EvalError::TypeError {
            function: function.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            position,
        }
    }

    pub fn arity_error(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        EvalError::ArityError {
            function: function.to_string(),
            expected: expected.into(),
            actual,
        }
    }
}
