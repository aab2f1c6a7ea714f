//! Error types for PARAM and DOC reading, writing and value access.

use thiserror::Error;

/// Errors that can occur while reading text forms or accessing values.
#[derive(Error, Debug)]
pub enum Error {
    /// The input violates the text format or a value-model invariant:
    /// malformed structure, a wrong-arity sequence, a scalar that does not
    /// match its tag, an overlong fixed string, or a duplicate map key.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A value-model accessor was asked for a variant the value does not hold.
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Convenience alias used throughout paramio-core.
pub type Result<T> = std::result::Result<T, Error>;
